//! Denormalized per-account report row

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Cached income/outcome totals plus the authoritative debt figure.
///
/// Income and outcome are recomputed from the ledger and loan tables on
/// refresh; `debts` is only ever incremented, by loan issuance and by the
/// interest recalculation job.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub account_number: String,
    pub historical_income: Decimal,
    pub historical_outcome: Decimal,
    pub debts: Decimal,
    pub updated_at: DateTime<Utc>,
}
