//! Ledger data models

use chrono::{DateTime, Utc};
use ferrobank::types::TransactionKind;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// One immutable money-movement record
///
/// Transfers carry two distinct accounts; withdrawals and deposits are
/// single-account movements recorded on the source side with no destination.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: Uuid,
    pub source_account: String,
    pub destination_account: Option<String>,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn transfer(source: &str, destination: &str, amount: Decimal) -> Self {
        Self::record(source, Some(destination), TransactionKind::Transfer, amount)
    }

    pub fn withdrawal(source: &str, amount: Decimal) -> Self {
        Self::record(source, None, TransactionKind::Withdrawal, amount)
    }

    pub fn deposit(source: &str, amount: Decimal) -> Self {
        Self::record(source, None, TransactionKind::Deposit, amount)
    }

    fn record(
        source: &str,
        destination: Option<&str>,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_account: source.to_string(),
            destination_account: destination.map(str::to_string),
            kind,
            amount,
            created_at: Utc::now(),
        }
    }
}
