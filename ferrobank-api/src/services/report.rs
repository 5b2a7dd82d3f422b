//! Report aggregation
//!
//! Income and outcome are computed from the ledger and loan tables and
//! cached in the per-account report row. The report endpoints refresh the
//! row before serving it, so totals are correct even before the first loan
//! creates the row. `debts` is read as stored; it is maintained directly by
//! loan issuance and the interest job.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ferrobank::types::{Direction, TransactionKind};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use sqlx::SqliteConnection;

use crate::error::ServiceError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub account_number: String,
}

/// Total income: transfers received + deposits + loan principal.
///
/// Storage errors propagate so a refresh aborts instead of caching a
/// partial total.
pub async fn calculate_total_income(
    state: &AppState,
    conn: &mut SqliteConnection,
    account_number: &str,
) -> Result<Decimal, ServiceError> {
    let transfers_received = state
        .ledger
        .sum_amounts(
            &mut *conn,
            TransactionKind::Transfer,
            Direction::Received,
            account_number,
        )
        .await?;
    let deposits = state
        .ledger
        .sum_amounts(
            &mut *conn,
            TransactionKind::Deposit,
            Direction::Sent,
            account_number,
        )
        .await?;
    let loans = state.loans.sum_principal(&mut *conn, account_number).await?;

    Ok(transfers_received + deposits + loans)
}

/// Total outcome: transfers sent + withdrawals.
pub async fn calculate_total_outcome(
    state: &AppState,
    conn: &mut SqliteConnection,
    account_number: &str,
) -> Result<Decimal, ServiceError> {
    let transfers_sent = state
        .ledger
        .sum_amounts(
            &mut *conn,
            TransactionKind::Transfer,
            Direction::Sent,
            account_number,
        )
        .await?;
    let withdrawals = state
        .ledger
        .sum_amounts(
            &mut *conn,
            TransactionKind::Withdrawal,
            Direction::Sent,
            account_number,
        )
        .await?;

    Ok(transfers_sent + withdrawals)
}

/// Recompute both totals and upsert the report row on the caller's open
/// unit of work. Returns the recomputed (income, outcome) pair.
pub async fn refresh_report(
    state: &AppState,
    conn: &mut SqliteConnection,
    account_number: &str,
) -> Result<(Decimal, Decimal), ServiceError> {
    let income = calculate_total_income(state, &mut *conn, account_number).await?;
    let outcome = calculate_total_outcome(state, &mut *conn, account_number).await?;
    state
        .reports
        .upsert_totals(conn, account_number, income, outcome)
        .await?;

    Ok((income, outcome))
}

/// POST /api/reportTotalIncome
pub async fn report_total_income(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReportRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let mut tx = state
        .pool
        .begin()
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to begin transaction: {}", e)))?;

    let (income, _) = refresh_report(&state, &mut tx, &req.account_number).await?;

    tx.commit()
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to commit report refresh: {}", e)))?;

    Ok((StatusCode::OK, Json(json!({ "totalIncome": income }))))
}

/// POST /api/reportTotalOutcome
pub async fn report_total_outcome(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReportRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let mut tx = state
        .pool
        .begin()
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to begin transaction: {}", e)))?;

    let (_, outcome) = refresh_report(&state, &mut tx, &req.account_number).await?;

    tx.commit()
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to commit report refresh: {}", e)))?;

    Ok((StatusCode::OK, Json(json!({ "totalOutcome": outcome }))))
}

/// POST /api/reportTotalDebts
pub async fn report_total_debts(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReportRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let report = state.reports.get(&req.account_number).await?;
    let debts = report.map(|r| r.debts).unwrap_or(Decimal::ZERO);

    Ok((StatusCode::OK, Json(json!({ "totalDebts": debts }))))
}
