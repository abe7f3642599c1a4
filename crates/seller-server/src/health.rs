//! Readiness probe
//!
//! `/healthz` (served by the API router) only says the process is up. `/readyz` also
//! checks that the store answers.

use std::time::{Duration, Instant};

use axum::{extract::State, http::StatusCode, Json};
use seller_core::RequestContext;
use seller_db::Database;
use serde::Serialize;
use tracing::warn;

/// Upper bound on the readiness ping
const READY_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessReport {
    pub ready: bool,
    pub version: &'static str,
    pub response_time_ms: u64,
    pub pool_size: u32,
    pub pool_idle: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Readiness check (Kubernetes)
pub async fn readiness(State(db): State<Database>) -> (StatusCode, Json<ReadinessReport>) {
    let start = Instant::now();
    let ctx = RequestContext::new().with_timeout(READY_TIMEOUT);
    let result = db.ping(&ctx).await;
    let stats = db.stats();

    let (status, message) = match result {
        Ok(()) => (StatusCode::OK, None),
        Err(err) => {
            warn!(error = %err, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Some(err.kind().to_string()))
        }
    };

    let report = ReadinessReport {
        ready: status == StatusCode::OK,
        version: env!("CARGO_PKG_VERSION"),
        response_time_ms: start.elapsed().as_millis() as u64,
        pool_size: stats.size,
        pool_idle: stats.idle,
        message,
    };
    (status, Json(report))
}
