//! Shared helpers for service-level tests

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::config::ApiConfig;
use crate::database::initialize_database;
use crate::models::Account;
use crate::state::AppState;

/// Fresh application state over an in-memory database with migrations
/// applied.
pub async fn test_state() -> Arc<AppState> {
    let config = ApiConfig::for_tests();
    let pool = initialize_database(&config.database)
        .await
        .expect("failed to create test database");
    Arc::new(AppState::new(pool, &config))
}

/// Insert an account directly, with a placeholder password hash and the
/// given opening balance. Tests that exercise real credentials go through
/// the register endpoint instead.
pub async fn seed_account(state: &AppState, account_number: &str, balance: Decimal) {
    let mut account = Account::new(
        account_number.to_string(),
        format!("Account {}", account_number),
        format!("{}@example.com", account_number),
        "placeholder-hash".to_string(),
        "Cliente".to_string(),
    );
    account.balance = balance;
    state
        .accounts
        .create(&account)
        .await
        .expect("failed to seed account");
}

/// Current balance of an account.
pub async fn balance_of(state: &AppState, account_number: &str) -> Decimal {
    state
        .accounts
        .get(account_number)
        .await
        .expect("failed to fetch account")
        .expect("account missing")
        .balance
}
