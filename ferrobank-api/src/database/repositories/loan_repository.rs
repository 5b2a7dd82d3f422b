//! Loans and their interest history

use ferrobank::money;
use ferrobank::types::LoanStatus;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::models::{InterestAccrual, Loan};

pub struct LoanRepository {
    pool: SqlitePool,
}

impl LoanRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a loan row on the caller's open unit of work.
    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        loan: &Loan,
    ) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO loans (id, account_number, principal, term_weeks, status, requested_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(loan.id.to_string())
        .bind(&loan.account_number)
        .bind(loan.principal.to_string())
        .bind(loan.term_weeks)
        .bind(String::from(loan.status))
        .bind(loan.requested_at)
        .execute(conn)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to insert loan: {}", e)))?;

        Ok(())
    }

    /// True iff the account already has an approved loan.
    pub async fn has_active_loan_on(
        &self,
        conn: &mut SqliteConnection,
        account_number: &str,
    ) -> Result<bool, ServiceError> {
        let row = sqlx::query("SELECT 1 FROM loans WHERE account_number = $1 AND status = $2")
            .bind(account_number)
            .bind(String::from(LoanStatus::Approved))
            .fetch_optional(conn)
            .await
            .map_err(|e| ServiceError::Database(format!("Failed to check active loan: {}", e)))?;

        Ok(row.is_some())
    }

    /// Sum of all principal ever issued to the account; zero when none.
    pub async fn sum_principal(
        &self,
        conn: &mut SqliteConnection,
        account_number: &str,
    ) -> Result<Decimal, ServiceError> {
        let rows = sqlx::query("SELECT principal FROM loans WHERE account_number = $1")
            .bind(account_number)
            .fetch_all(conn)
            .await
            .map_err(|e| ServiceError::Database(format!("Failed to sum loan principal: {}", e)))?;

        let mut total = Decimal::ZERO;
        for row in &rows {
            let principal: String = row
                .try_get("principal")
                .map_err(|e| ServiceError::Database(format!("Failed to get principal: {}", e)))?;
            total += money::parse_stored(&principal)?;
        }

        Ok(total)
    }

    /// All approved loans; the interest job filters for overdue ones.
    pub async fn list_approved(&self) -> Result<Vec<Loan>, ServiceError> {
        let rows = sqlx::query(
            "SELECT id, account_number, principal, term_weeks, status, requested_at \
             FROM loans WHERE status = $1",
        )
        .bind(String::from(LoanStatus::Approved))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to list approved loans: {}", e)))?;

        rows.iter().map(row_to_loan).collect()
    }

    /// Number of interest accruals recorded for the account, all dates.
    pub async fn count_accruals(&self, account_number: &str) -> Result<i64, ServiceError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS accrual_count FROM interest_history WHERE account_number = $1",
        )
        .bind(account_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to count accruals: {}", e)))?;

        row.try_get("accrual_count")
            .map_err(|e| ServiceError::Database(format!("Failed to get accrual_count: {}", e)))
    }

    /// Insert one interest-history row on the caller's open unit of work.
    pub async fn insert_accrual(
        &self,
        conn: &mut SqliteConnection,
        accrual: &InterestAccrual,
    ) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO interest_history (id, account_number, interest_amount, accrued_on)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(accrual.id.to_string())
        .bind(&accrual.account_number)
        .bind(accrual.interest_amount.to_string())
        .bind(accrual.accrued_on)
        .execute(conn)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to insert accrual: {}", e)))?;

        Ok(())
    }
}

/// Convert a row to a Loan
fn row_to_loan(row: &SqliteRow) -> Result<Loan, ServiceError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| ServiceError::Database(format!("Failed to get id: {}", e)))?;
    let id = Uuid::parse_str(&id)
        .map_err(|e| ServiceError::Database(format!("Failed to parse id: {}", e)))?;

    let status: String = row
        .try_get("status")
        .map_err(|e| ServiceError::Database(format!("Failed to get status: {}", e)))?;
    let status = LoanStatus::try_from(status).map_err(ServiceError::Database)?;

    let principal: String = row
        .try_get("principal")
        .map_err(|e| ServiceError::Database(format!("Failed to get principal: {}", e)))?;

    Ok(Loan {
        id,
        account_number: row
            .try_get("account_number")
            .map_err(|e| ServiceError::Database(format!("Failed to get account_number: {}", e)))?,
        principal: money::parse_stored(&principal)?,
        term_weeks: row
            .try_get("term_weeks")
            .map_err(|e| ServiceError::Database(format!("Failed to get term_weeks: {}", e)))?,
        status,
        requested_at: row
            .try_get("requested_at")
            .map_err(|e| ServiceError::Database(format!("Failed to get requested_at: {}", e)))?,
    })
}
