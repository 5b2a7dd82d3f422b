//! Denormalized per-account report rows

use chrono::Utc;
use ferrobank::money;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

use crate::error::ServiceError;
use crate::models::Report;

pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch the report row for an account.
    pub async fn get(&self, account_number: &str) -> Result<Option<Report>, ServiceError> {
        let row = sqlx::query(
            "SELECT account_number, historical_income, historical_outcome, debts, updated_at \
             FROM reports WHERE account_number = $1",
        )
        .bind(account_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to fetch report: {}", e)))?;

        row.as_ref().map(row_to_report).transpose()
    }

    /// Write the recomputed income/outcome totals, inserting the row on
    /// first refresh. `debts` is left untouched on update; it is mutated
    /// only through [`Self::add_debt`].
    pub async fn upsert_totals(
        &self,
        conn: &mut SqliteConnection,
        account_number: &str,
        income: Decimal,
        outcome: Decimal,
    ) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO reports (account_number, historical_income, historical_outcome, debts, updated_at)
            VALUES ($1, $2, $3, '0', $4)
            ON CONFLICT (account_number) DO UPDATE SET
                historical_income = excluded.historical_income,
                historical_outcome = excluded.historical_outcome,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(account_number)
        .bind(income.to_string())
        .bind(outcome.to_string())
        .bind(Utc::now())
        .execute(conn)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to upsert report: {}", e)))?;

        Ok(())
    }

    /// Add to the account's debts on the caller's open unit of work,
    /// creating the report row if it does not exist yet. Debts only ever
    /// grow; there is no repayment path.
    pub async fn add_debt(
        &self,
        conn: &mut SqliteConnection,
        account_number: &str,
        amount: Decimal,
    ) -> Result<(), ServiceError> {
        let row = sqlx::query("SELECT debts FROM reports WHERE account_number = $1")
            .bind(account_number)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| ServiceError::Database(format!("Failed to read debts: {}", e)))?;

        match row {
            Some(row) => {
                let debts: String = row
                    .try_get("debts")
                    .map_err(|e| ServiceError::Database(format!("Failed to get debts: {}", e)))?;
                let updated = money::parse_stored(&debts)? + amount;

                sqlx::query(
                    "UPDATE reports SET debts = $1, updated_at = $2 WHERE account_number = $3",
                )
                .bind(updated.to_string())
                .bind(Utc::now())
                .bind(account_number)
                .execute(conn)
                .await
                .map_err(|e| ServiceError::Database(format!("Failed to update debts: {}", e)))?;
            }
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO reports (account_number, historical_income, historical_outcome, debts, updated_at)
                    VALUES ($1, '0', '0', $2, $3)
                    "#,
                )
                .bind(account_number)
                .bind(amount.to_string())
                .bind(Utc::now())
                .execute(conn)
                .await
                .map_err(|e| ServiceError::Database(format!("Failed to insert report: {}", e)))?;
            }
        }

        Ok(())
    }
}

/// Convert a row to a Report
fn row_to_report(row: &SqliteRow) -> Result<Report, ServiceError> {
    let income: String = row
        .try_get("historical_income")
        .map_err(|e| ServiceError::Database(format!("Failed to get historical_income: {}", e)))?;
    let outcome: String = row
        .try_get("historical_outcome")
        .map_err(|e| ServiceError::Database(format!("Failed to get historical_outcome: {}", e)))?;
    let debts: String = row
        .try_get("debts")
        .map_err(|e| ServiceError::Database(format!("Failed to get debts: {}", e)))?;

    Ok(Report {
        account_number: row
            .try_get("account_number")
            .map_err(|e| ServiceError::Database(format!("Failed to get account_number: {}", e)))?,
        historical_income: money::parse_stored(&income)?,
        historical_outcome: money::parse_stored(&outcome)?,
        debts: money::parse_stored(&debts)?,
        updated_at: row
            .try_get("updated_at")
            .map_err(|e| ServiceError::Database(format!("Failed to get updated_at: {}", e)))?,
    })
}
