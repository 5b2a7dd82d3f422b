//! Account directory: existence checks, lookup, and balance mutation

use ferrobank::money;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use tracing::warn;

use crate::error::ServiceError;
use crate::models::Account;

pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account row.
    pub async fn create(&self, account: &Account) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (account_number, name, email, password_hash, account_type, balance, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&account.account_number)
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(&account.account_type)
        .bind(account.balance.to_string())
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to create account: {}", e)))?;

        Ok(())
    }

    /// True iff an account with this number exists.
    ///
    /// Storage errors are logged and reported as absent so callers can treat
    /// the check as a plain boolean.
    pub async fn exists(&self, account_number: &str) -> bool {
        let result = sqlx::query("SELECT 1 FROM accounts WHERE account_number = $1")
            .bind(account_number)
            .fetch_optional(&self.pool)
            .await;

        match result {
            Ok(row) => row.is_some(),
            Err(e) => {
                warn!("Existence check failed for account {}: {}", account_number, e);
                false
            }
        }
    }

    /// Existence check on the caller's open unit of work; storage errors
    /// propagate so the operation aborts and rolls back.
    pub async fn exists_on(
        &self,
        conn: &mut SqliteConnection,
        account_number: &str,
    ) -> Result<bool, ServiceError> {
        let row = sqlx::query("SELECT 1 FROM accounts WHERE account_number = $1")
            .bind(account_number)
            .fetch_optional(conn)
            .await
            .map_err(|e| ServiceError::Database(format!("Failed to check account: {}", e)))?;

        Ok(row.is_some())
    }

    /// Fetch an account by number.
    pub async fn get(&self, account_number: &str) -> Result<Option<Account>, ServiceError> {
        let row = sqlx::query(
            "SELECT account_number, name, email, password_hash, account_type, balance, created_at \
             FROM accounts WHERE account_number = $1",
        )
        .bind(account_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to fetch account: {}", e)))?;

        row.as_ref().map(row_to_account).transpose()
    }

    /// Fetch an account on the caller's open unit of work.
    pub async fn get_on(
        &self,
        conn: &mut SqliteConnection,
        account_number: &str,
    ) -> Result<Option<Account>, ServiceError> {
        let row = sqlx::query(
            "SELECT account_number, name, email, password_hash, account_type, balance, created_at \
             FROM accounts WHERE account_number = $1",
        )
        .bind(account_number)
        .fetch_optional(conn)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to fetch account: {}", e)))?;

        row.as_ref().map(row_to_account).transpose()
    }

    /// Apply `balance += delta` (delta may be negative) on the caller's open
    /// unit of work. The stored text balance is read, adjusted in decimal
    /// space, and written back; it is never touched by SQL arithmetic.
    pub async fn adjust_balance(
        &self,
        conn: &mut SqliteConnection,
        account_number: &str,
        delta: Decimal,
    ) -> Result<(), ServiceError> {
        let row = sqlx::query("SELECT balance FROM accounts WHERE account_number = $1")
            .bind(account_number)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| ServiceError::Database(format!("Failed to read balance: {}", e)))?
            .ok_or_else(|| ServiceError::NotFound("account not found".to_string()))?;

        let balance: String = row
            .try_get("balance")
            .map_err(|e| ServiceError::Database(format!("Failed to get balance: {}", e)))?;
        let updated = money::parse_stored(&balance)? + delta;

        sqlx::query("UPDATE accounts SET balance = $1 WHERE account_number = $2")
            .bind(updated.to_string())
            .bind(account_number)
            .execute(conn)
            .await
            .map_err(|e| ServiceError::Database(format!("Failed to update balance: {}", e)))?;

        Ok(())
    }

    /// Update the mutable profile fields.
    pub async fn update_profile(
        &self,
        account_number: &str,
        name: &str,
        email: &str,
    ) -> Result<(), ServiceError> {
        sqlx::query("UPDATE accounts SET name = $1, email = $2 WHERE account_number = $3")
            .bind(name)
            .bind(email)
            .bind(account_number)
            .execute(&self.pool)
            .await
            .map_err(|e| ServiceError::Database(format!("Failed to update account: {}", e)))?;

        Ok(())
    }
}

/// Convert a row to an Account
fn row_to_account(row: &SqliteRow) -> Result<Account, ServiceError> {
    let balance: String = row
        .try_get("balance")
        .map_err(|e| ServiceError::Database(format!("Failed to get balance: {}", e)))?;

    Ok(Account {
        account_number: row
            .try_get("account_number")
            .map_err(|e| ServiceError::Database(format!("Failed to get account_number: {}", e)))?,
        name: row
            .try_get("name")
            .map_err(|e| ServiceError::Database(format!("Failed to get name: {}", e)))?,
        email: row
            .try_get("email")
            .map_err(|e| ServiceError::Database(format!("Failed to get email: {}", e)))?,
        password_hash: row
            .try_get("password_hash")
            .map_err(|e| ServiceError::Database(format!("Failed to get password_hash: {}", e)))?,
        account_type: row
            .try_get("account_type")
            .map_err(|e| ServiceError::Database(format!("Failed to get account_type: {}", e)))?,
        balance: money::parse_stored(&balance)?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| ServiceError::Database(format!("Failed to get created_at: {}", e)))?,
    })
}
