//! Balance operations: transfer, withdraw, deposit, and the per-account
//! transaction listing
//!
//! Each mutating operation runs on one database transaction: the validation
//! reads, the balance adjustment(s), and the ledger append either all land
//! or none do. Returning early drops the transaction, which rolls it back
//! and returns the connection to the pool.

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
use crate::models::LedgerEntry;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub account_number: String,
    pub destination_account_number: String,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRequest {
    pub account_number: String,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListRequest {
    pub account_number: String,
}

/// PUT /api/transferMoney
///
/// Validation order: source exists, destination exists, sufficient funds.
pub async fn transfer_money(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransferRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let amount = money::require_positive(req.amount)?;
    if req.account_number == req.destination_account_number {
        return Err(ServiceError::InvalidRequest(
            "source and destination accounts must differ".to_string(),
        ));
    }

    let mut tx = state
        .pool
        .begin()
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to begin transaction: {}", e)))?;

    let source = state
        .accounts
        .get_on(&mut tx, &req.account_number)
        .await?
        .ok_or_else(|| ServiceError::NotFound("account not found".to_string()))?;

    if !state
        .accounts
        .exists_on(&mut tx, &req.destination_account_number)
        .await?
    {
        return Err(ServiceError::NotFound(
            "destination account not found".to_string(),
        ));
    }

    if source.balance < amount {
        return Err(ServiceError::InsufficientFunds);
    }

    state
        .accounts
        .adjust_balance(&mut tx, &req.account_number, -amount)
        .await?;
    state
        .accounts
        .adjust_balance(&mut tx, &req.destination_account_number, amount)
        .await?;
    state
        .ledger
        .append(
            &mut tx,
            &LedgerEntry::transfer(&req.account_number, &req.destination_account_number, amount),
        )
        .await?;

    tx.commit()
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to commit transfer: {}", e)))?;

    info!(
        "Transferred {} from {} to {}",
        amount, req.account_number, req.destination_account_number
    );
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "transfer completed" })),
    ))
}

/// PUT /api/withdrawMoney
pub async fn withdraw_money(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MovementRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let amount = money::require_positive(req.amount)?;

    let mut tx = state
        .pool
        .begin()
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to begin transaction: {}", e)))?;

    let account = state
        .accounts
        .get_on(&mut tx, &req.account_number)
        .await?
        .ok_or_else(|| ServiceError::NotFound("account not found".to_string()))?;

    if account.balance < amount {
        return Err(ServiceError::InsufficientFunds);
    }

    state
        .accounts
        .adjust_balance(&mut tx, &req.account_number, -amount)
        .await?;
    state
        .ledger
        .append(&mut tx, &LedgerEntry::withdrawal(&req.account_number, amount))
        .await?;

    tx.commit()
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to commit withdrawal: {}", e)))?;

    info!("Withdrew {} from {}", amount, req.account_number);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "withdrawal completed" })),
    ))
}

/// PUT /api/depositMoney
pub async fn deposit_money(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MovementRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let amount = money::require_positive(req.amount)?;

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

    state
        .accounts
        .adjust_balance(&mut tx, &req.account_number, amount)
        .await?;
    state
        .ledger
        .append(&mut tx, &LedgerEntry::deposit(&req.account_number, amount))
        .await?;

    tx.commit()
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to commit deposit: {}", e)))?;

    info!("Deposited {} to {}", amount, req.account_number);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "deposit completed" })),
    ))
}

/// POST /api/getTransactionsByUser
pub async fn get_transactions_by_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransactionListRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let entries = state.ledger.list_for_account(&req.account_number).await?;

    if entries.is_empty() {
        return Err(ServiceError::NotFound(
            "no transactions for account".to_string(),
        ));
    }

    Ok((StatusCode::CREATED, Json(entries)))
}
