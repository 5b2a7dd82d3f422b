//! Health check endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::database::connection::health_check;
use crate::error::ServiceError;
use crate::state::AppState;

/// GET /api/health
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServiceError> {
    health_check(&state.pool).await?;
    Ok((StatusCode::OK, Json(json!({ "status": "ok" }))))
}
