//! Overdue-loan interest recalculation job
//!
//! The sweep scans approved loans, works out how many 15-day periods each
//! overdue loan has completed, and accrues whatever is not yet recorded:
//! one interest-history row per missing period plus a matching increment of
//! the account's report debts, committed per loan. Re-running the sweep on
//! the same day is a no-op.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ferrobank::interest;
use rust_decimal::Decimal;
use tracing::{error, info};

use crate::error::ServiceError;
use crate::models::InterestAccrual;
use crate::state::AppState;

/// Summary of one sweep run
#[derive(Debug, Default)]
pub struct SweepOutcome {
    pub loans_inspected: usize,
    pub periods_accrued: i64,
    pub interest_accrued: Decimal,
}

/// Run the sweep once over all approved loans.
///
/// Any storage error aborts the whole sweep; the next scheduled run
/// re-evaluates every loan from scratch.
pub async fn recalculate_interest(state: &AppState) -> Result<SweepOutcome, ServiceError> {
    let now = Utc::now();
    let today = now.date_naive();
    let loans = state.loans.list_approved().await?;

    let mut outcome = SweepOutcome {
        loans_inspected: loans.len(),
        ..SweepOutcome::default()
    };

    for loan in &loans {
        let due = interest::due_date(loan.requested_at, loan.term_weeks);
        let periods = interest::accrual_periods(interest::days_overdue(now, due));
        if periods == 0 {
            continue;
        }

        let recorded = state.loans.count_accruals(&loan.account_number).await?;
        if recorded >= periods {
            continue;
        }
        let missing = periods - recorded;

        let mut tx = state.pool.begin().await.map_err(|e| {
            ServiceError::Database(format!("Failed to begin accrual transaction: {}", e))
        })?;

        let mut accrued = Decimal::ZERO;
        for _ in 0..missing {
            let accrual = InterestAccrual::new(
                &loan.account_number,
                interest::interest_for_period(loan.principal),
                today,
            );
            state.loans.insert_accrual(&mut tx, &accrual).await?;
            accrued += accrual.interest_amount;
        }
        state
            .reports
            .add_debt(&mut tx, &loan.account_number, accrued)
            .await?;

        tx.commit()
            .await
            .map_err(|e| ServiceError::Database(format!("Failed to commit accrual: {}", e)))?;

        info!(
            "Accrued {} of interest over {} period(s) for account {}",
            accrued, missing, loan.account_number
        );
        outcome.periods_accrued += missing;
        outcome.interest_accrued += accrued;
    }

    Ok(outcome)
}

/// Run the sweep once at startup, then on every interval tick.
pub async fn run_scheduler(state: Arc<AppState>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        // The first tick completes immediately, covering the startup run.
        ticker.tick().await;
        match recalculate_interest(&state).await {
            Ok(outcome) if outcome.periods_accrued > 0 => {
                info!(
                    "Interest sweep accrued {} over {} period(s) across {} loan(s)",
                    outcome.interest_accrued, outcome.periods_accrued, outcome.loans_inspected
                );
            }
            Ok(_) => {}
            Err(e) => error!("Interest sweep failed: {}", e),
        }
    }
}
