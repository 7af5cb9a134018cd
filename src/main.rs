use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use gilir::api::{self, AppState};
use gilir::history::HistoryStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let metrics_port: Option<u16> = std::env::var("GILIR_METRICS_PORT")
        .ok()
        .and_then(|s| s.parse().ok());
    gilir::observability::init(metrics_port);

    let port = std::env::var("GILIR_PORT").unwrap_or_else(|_| "8080".into());
    let bind = std::env::var("GILIR_BIND").unwrap_or_else(|_| "0.0.0.0".into());
    let data_dir = std::env::var("GILIR_DATA_DIR").unwrap_or_else(|_| "./data".into());

    // Ensure data directory exists
    std::fs::create_dir_all(&data_dir)?;

    let history_path = Path::new(&data_dir).join("history.json");
    let store = HistoryStore::open(&history_path)?;
    info!(
        "loaded {} stored rotation(s) from {}",
        store.len(),
        history_path.display()
    );

    let state = Arc::new(AppState::new(store));
    let app = api::build_router(state);

    let addr = format!("{bind}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!("gilir listening on {addr}");
    info!("  data_dir: {data_dir}");
    info!(
        "  metrics: {}",
        metrics_port.map_or("disabled".to_string(), |p| format!(
            "http://0.0.0.0:{p}/metrics"
        ))
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gilir stopped");
    Ok(())
}

/// Resolve on SIGTERM or ctrl-c so in-flight requests can drain.
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to register SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
    }
    info!("shutdown signal received");
}
