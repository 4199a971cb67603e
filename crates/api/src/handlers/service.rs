//! Handlers for whole-store maintenance.

use agora_db::repositories::ServiceRepo;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /service/status -- row counts per table.
pub async fn status(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let status = ServiceRepo::status(&state.pool).await?;
    Ok(Json(DataResponse { data: status }))
}

/// POST /service/clear -- drop every row and return the (empty) counts.
pub async fn clear(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    ServiceRepo::clear(&state.pool).await?;
    tracing::warn!("All forum data cleared");

    let status = ServiceRepo::status(&state.pool).await?;
    Ok(Json(DataResponse { data: status }))
}
