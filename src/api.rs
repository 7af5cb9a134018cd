use std::sync::{Arc, RwLock};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::dates;
use crate::engine;
use crate::history::HistoryStore;
use crate::input::{self, ParseError};
use crate::model::Schedule;
use crate::observability;

/// Shared handler state: the single process-wide history store.
pub struct AppState {
    pub store: RwLock<HistoryStore>,
}

impl AppState {
    pub fn new(store: HistoryStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }
}

/// Build the application router: one embedded form page plus the JSON API.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/rotate", post(rotate))
        .route("/api/history", get(history_list))
        .route(
            "/api/history/{date}",
            get(history_get).delete(history_delete),
        )
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

// ── Responses ─────────────────────────────────────────────

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    records: usize,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct RotateResponse {
    date: String,
    display_date: String,
    schedule: Schedule,
}

#[derive(Serialize)]
struct HistoryListResponse {
    dates: Vec<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

// ── Handlers ──────────────────────────────────────────────

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let records = state.store.read().expect("history lock poisoned").len();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        records,
    })
}

/// Parse the raw form text, rotate, persist under the computed collection
/// date, and echo the rotated schedule back.
async fn rotate(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<RotateResponse>, ApiError> {
    let schedule = input::parse_schedule(&body).map_err(|e| {
        metrics::counter!(observability::ROTATIONS_REJECTED_TOTAL).increment(1);
        let status = match e {
            ParseError::MissingLine(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ParseError::Empty | ParseError::Malformed(_) => StatusCode::BAD_REQUEST,
        };
        api_error(status, e.to_string())
    })?;

    let target = dates::collection_date(Local::now().date_naive());
    let date = dates::date_key(target);
    let rotated = engine::rotate(&schedule);

    let mut store = state.store.write().expect("history lock poisoned");
    store.put(date.clone(), rotated.clone()).map_err(|e| {
        tracing::error!("history rewrite failed: {e}");
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to persist rotation",
        )
    })?;

    metrics::counter!(observability::ROTATIONS_TOTAL).increment(1);
    metrics::gauge!(observability::HISTORY_RECORDS).set(store.len() as f64);
    info!("rotated schedule stored for {date}");

    Ok(Json(RotateResponse {
        display_date: dates::display_date(target),
        date,
        schedule: rotated,
    }))
}

async fn history_list(State(state): State<Arc<AppState>>) -> Json<HistoryListResponse> {
    let store = state.store.read().expect("history lock poisoned");
    Json(HistoryListResponse {
        dates: store.list_keys(),
    })
}

async fn history_get(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> Result<Json<RotateResponse>, ApiError> {
    let store = state.store.read().expect("history lock poisoned");
    let schedule = store
        .get(&date)
        .cloned()
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("no rotation stored for {date}")))?;

    let display_date = dates::parse_date_key(&date)
        .map(dates::display_date)
        .unwrap_or_else(|| date.clone());

    Ok(Json(RotateResponse {
        date,
        display_date,
        schedule,
    }))
}

async fn history_delete(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().expect("history lock poisoned");
    let removed = store.delete(&date).map_err(|e| {
        tracing::error!("history rewrite failed: {e}");
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to persist deletion",
        )
    })?;

    if !removed {
        return Err(api_error(
            StatusCode::NOT_FOUND,
            format!("no rotation stored for {date}"),
        ));
    }

    metrics::counter!(observability::HISTORY_DELETES_TOTAL).increment(1);
    metrics::gauge!(observability::HISTORY_RECORDS).set(store.len() as f64);
    info!("deleted stored rotation for {date}");
    Ok(StatusCode::NO_CONTENT)
}
