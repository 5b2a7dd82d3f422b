//! Loan issuance
//!
//! Policy: one active loan per account. On approval the principal is
//! credited to the account balance and added to the report's debts, and the
//! report totals are refreshed, all in the same unit of work.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ferrobank::money;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::ServiceError;
use crate::models::Loan;
use crate::services::report;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub account_number: String,
    pub amount: Decimal,
    pub term: i64,
}

/// POST /api/askForLoan
pub async fn ask_for_loan(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoanRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let principal = money::require_positive(req.amount)?;
    if req.term <= 0 {
        return Err(ServiceError::InvalidRequest(
            "term must be a positive number of weeks".to_string(),
        ));
    }

    let mut tx = state
        .pool
        .begin()
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to begin transaction: {}", e)))?;

    if !state
        .accounts
        .exists_on(&mut tx, &req.account_number)
        .await?
    {
        return Err(ServiceError::NotFound("account not found".to_string()));
    }

    if state
        .loans
        .has_active_loan_on(&mut tx, &req.account_number)
        .await?
    {
        return Err(ServiceError::Conflict(
            "account already has an active loan".to_string(),
        ));
    }

    let loan = Loan::approved(&req.account_number, principal, req.term);
    state.loans.insert(&mut tx, &loan).await?;
    state
        .accounts
        .adjust_balance(&mut tx, &req.account_number, principal)
        .await?;
    state
        .reports
        .add_debt(&mut tx, &req.account_number, principal)
        .await?;
    report::refresh_report(&state, &mut tx, &req.account_number).await?;

    tx.commit()
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to commit loan: {}", e)))?;

    info!(
        "Approved loan of {} over {} week(s) for account {}",
        principal, req.term, req.account_number
    );
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "loan approved" })),
    ))
}
