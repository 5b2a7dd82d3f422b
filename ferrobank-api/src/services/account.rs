//! Account profile lookup and update

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::error::ServiceError;
use crate::models::AccountProfile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountLookupRequest {
    pub account_number: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub account_number: String,
    pub name: String,
    pub email: String,
}

/// POST /api/getUserByAccountNumber
pub async fn get_user_by_account_number(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AccountLookupRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let account = state
        .accounts
        .get(&req.account_number)
        .await?
        .ok_or_else(|| ServiceError::NotFound("account not found".to_string()))?;

    Ok((StatusCode::OK, Json(AccountProfile::from(&account))))
}

/// PUT /api/updateUserByAccountNumber
pub async fn update_user_by_account_number(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .accounts
        .update_profile(&req.account_number, &req.name, &req.email)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "profile updated" })),
    ))
}
