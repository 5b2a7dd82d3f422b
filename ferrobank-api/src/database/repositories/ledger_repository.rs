//! Append-only ledger of money movements

use ferrobank::money;
use ferrobank::types::{Direction, TransactionKind};
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::models::LedgerEntry;

pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert one immutable record on the caller's open unit of work.
    /// Amount sign is not validated here; callers pre-validate.
    pub async fn append(
        &self,
        conn: &mut SqliteConnection,
        entry: &LedgerEntry,
    ) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO ledger_entries (id, source_account, destination_account, kind, amount, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.id.to_string())
        .bind(&entry.source_account)
        .bind(entry.destination_account.as_deref())
        .bind(String::from(entry.kind))
        .bind(entry.amount.to_string())
        .bind(entry.created_at)
        .execute(conn)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to append ledger entry: {}", e)))?;

        Ok(())
    }

    /// Movements where the account is the source, newest first.
    pub async fn list_for_account(
        &self,
        account_number: &str,
    ) -> Result<Vec<LedgerEntry>, ServiceError> {
        let rows = sqlx::query(
            "SELECT id, source_account, destination_account, kind, amount, created_at \
             FROM ledger_entries WHERE source_account = $1 ORDER BY created_at DESC",
        )
        .bind(account_number)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ServiceError::Database(format!("Failed to list ledger entries: {}", e)))?;

        rows.iter().map(row_to_entry).collect()
    }

    /// Sum of all amounts of the given kind where the account sits on the
    /// given side; zero when no rows match. The stored text amounts are
    /// summed in decimal space.
    pub async fn sum_amounts(
        &self,
        conn: &mut SqliteConnection,
        kind: TransactionKind,
        direction: Direction,
        account_number: &str,
    ) -> Result<Decimal, ServiceError> {
        let query = match direction {
            Direction::Sent => {
                "SELECT amount FROM ledger_entries WHERE kind = $1 AND source_account = $2"
            }
            Direction::Received => {
                "SELECT amount FROM ledger_entries WHERE kind = $1 AND destination_account = $2"
            }
        };

        let rows = sqlx::query(query)
            .bind(String::from(kind))
            .bind(account_number)
            .fetch_all(conn)
            .await
            .map_err(|e| ServiceError::Database(format!("Failed to sum ledger entries: {}", e)))?;

        let mut total = Decimal::ZERO;
        for row in &rows {
            let amount: String = row
                .try_get("amount")
                .map_err(|e| ServiceError::Database(format!("Failed to get amount: {}", e)))?;
            total += money::parse_stored(&amount)?;
        }

        Ok(total)
    }
}

/// Convert a row to a LedgerEntry
fn row_to_entry(row: &SqliteRow) -> Result<LedgerEntry, ServiceError> {
    let id: String = row
        .try_get("id")
        .map_err(|e| ServiceError::Database(format!("Failed to get id: {}", e)))?;
    let id = Uuid::parse_str(&id)
        .map_err(|e| ServiceError::Database(format!("Failed to parse id: {}", e)))?;

    let kind: String = row
        .try_get("kind")
        .map_err(|e| ServiceError::Database(format!("Failed to get kind: {}", e)))?;
    let kind = TransactionKind::try_from(kind).map_err(ServiceError::Database)?;

    let amount: String = row
        .try_get("amount")
        .map_err(|e| ServiceError::Database(format!("Failed to get amount: {}", e)))?;

    Ok(LedgerEntry {
        id,
        source_account: row
            .try_get("source_account")
            .map_err(|e| ServiceError::Database(format!("Failed to get source_account: {}", e)))?,
        destination_account: row.try_get("destination_account").map_err(|e| {
            ServiceError::Database(format!("Failed to get destination_account: {}", e))
        })?,
        kind,
        amount: money::parse_stored(&amount)?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| ServiceError::Database(format!("Failed to get created_at: {}", e)))?,
    })
}
