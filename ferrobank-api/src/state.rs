//! Application state shared across request handlers and background jobs

use sqlx::SqlitePool;

use crate::config::ApiConfig;
use crate::database::repositories::{
    AccountRepository, LedgerRepository, LoanRepository, ReportRepository,
};
use crate::middleware::auth::AuthService;

/// Application state shared across services
pub struct AppState {
    /// Database connection pool; mutating operations begin their unit of
    /// work here
    pub pool: SqlitePool,
    /// Account directory
    pub accounts: AccountRepository,
    /// Append-only money-movement log
    pub ledger: LedgerRepository,
    /// Loans and their interest history
    pub loans: LoanRepository,
    /// Denormalized per-account report rows
    pub reports: ReportRepository,
    /// Token issuing/verification and password hashing
    pub auth: AuthService,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &ApiConfig) -> Self {
        Self {
            accounts: AccountRepository::new(pool.clone()),
            ledger: LedgerRepository::new(pool.clone()),
            loans: LoanRepository::new(pool.clone()),
            reports: ReportRepository::new(pool.clone()),
            auth: AuthService::new(config.jwt_secret.clone()),
            pool,
        }
    }
}
