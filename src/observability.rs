use std::net::SocketAddr;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: schedules rotated and persisted.
pub const ROTATIONS_TOTAL: &str = "gilir_rotations_total";

/// Counter: rotation requests rejected at the input boundary.
pub const ROTATIONS_REJECTED_TOTAL: &str = "gilir_rotations_rejected_total";

/// Counter: stored rotations deleted.
pub const HISTORY_DELETES_TOTAL: &str = "gilir_history_deletes_total";

// ── USE metrics (resource utilization) ──────────────────────────

/// Gauge: records currently held in the history store.
pub const HISTORY_RECORDS: &str = "gilir_history_records";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}
