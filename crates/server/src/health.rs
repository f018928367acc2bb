use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use crate::cache::DatasetCache;
use crate::error_convert::public_message;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the application start time. Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Health check response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub dataset: String,
    pub cases: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Health check handler.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(datasets): State<Arc<DatasetCache>>) -> Json<HealthResponse> {
    let (dataset, cases) = match datasets.get() {
        Ok(d) => ("loaded".to_string(), d.len()),
        Err(e) => (format!("error: {}", public_message(&e)), 0),
    };

    let uptime = START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0);

    Json(HealthResponse {
        status: "ok".to_string(),
        dataset,
        cases,
        uptime_seconds: uptime,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
