//! Loan and interest-history data models

use chrono::{DateTime, NaiveDate, Utc};
use ferrobank::types::LoanStatus;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// A loan row; immutable once created. Accrued interest is tracked in the
/// interest history, not on the loan itself.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: Uuid,
    pub account_number: String,
    pub principal: Decimal,
    pub term_weeks: i64,
    pub status: LoanStatus,
    pub requested_at: DateTime<Utc>,
}

impl Loan {
    /// Approved loan requested now.
    pub fn approved(account_number: &str, principal: Decimal, term_weeks: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_number: account_number.to_string(),
            principal,
            term_weeks,
            status: LoanStatus::Approved,
            requested_at: Utc::now(),
        }
    }
}

/// One interest charge; one row per completed accrual period.
#[derive(Debug, Clone)]
pub struct InterestAccrual {
    pub id: Uuid,
    pub account_number: String,
    pub interest_amount: Decimal,
    pub accrued_on: NaiveDate,
}

impl InterestAccrual {
    pub fn new(account_number: &str, interest_amount: Decimal, accrued_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_number: account_number.to_string(),
            interest_amount,
            accrued_on,
        }
    }
}
