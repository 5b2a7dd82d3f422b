//! Account data models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// A customer account row
///
/// The account type (e.g. "Cliente") is caller-supplied and stored as-is;
/// nothing in the system branches on it. The balance is mutated only by the
/// balance operations and by loan issuance, always inside their unit of
/// work.
#[derive(Debug, Clone)]
pub struct Account {
    pub account_number: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub account_type: String,
    pub balance: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// New account with a zero opening balance.
    pub fn new(
        account_number: String,
        name: String,
        email: String,
        password_hash: String,
        account_type: String,
    ) -> Self {
        Self {
            account_number,
            name,
            email,
            password_hash,
            account_type,
            balance: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }
}

/// Public view of an account; the password hash never leaves the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub account_number: String,
    pub name: String,
    pub email: String,
    pub account_type: String,
    pub balance: Decimal,
}

impl From<&Account> for AccountProfile {
    fn from(account: &Account) -> Self {
        Self {
            account_number: account.account_number.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            account_type: account.account_type.clone(),
            balance: account.balance,
        }
    }
}
