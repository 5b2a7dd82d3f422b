//! Registration and login

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::ServiceError;
use crate::models::Account;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub account_number: String,
    pub name: String,
    pub email: String,
    pub password: String,
    /// Stored as-is (e.g. "Cliente"); not an enumerated vocabulary.
    #[serde(rename = "type")]
    pub account_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub account_number: String,
    pub password: String,
}

/// POST /api/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    // Check before hashing; bcrypt is the expensive step.
    if state.accounts.exists(&req.account_number).await {
        return Err(ServiceError::Conflict("account already exists".to_string()));
    }

    let password_hash = state.auth.hash_password(&req.password)?;
    let account = Account::new(
        req.account_number,
        req.name,
        req.email,
        password_hash,
        req.account_type,
    );
    state.accounts.create(&account).await?;

    info!("Registered account {}", account.account_number);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "account registered" })),
    ))
}

/// POST /api/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let account = state
        .accounts
        .get(&req.account_number)
        .await?
        .ok_or_else(|| ServiceError::NotFound("account not found".to_string()))?;

    if !state
        .auth
        .verify_password(&req.password, &account.password_hash)?
    {
        return Err(ServiceError::Unauthenticated(
            "invalid credentials".to_string(),
        ));
    }

    let token = state.auth.generate_token(&account.account_number)?;

    info!("Login for account {}", account.account_number);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "login successful", "token": token })),
    ))
}
