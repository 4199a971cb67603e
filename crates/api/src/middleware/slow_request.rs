//! Slow request logging.
//!
//! Requests are never retried or cancelled here; exceeding the threshold
//! only produces a WARN event with the method, URI and elapsed time.

use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Time the inner service and log it when it exceeds
/// `ServerConfig::slow_request_threshold_ms`.
pub async fn log_slow_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    let elapsed = started.elapsed();
    if elapsed > state.config.slow_request_threshold() {
        tracing::warn!(
            %method,
            %uri,
            status = response.status().as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Slow request"
        );
    }
    response
}
