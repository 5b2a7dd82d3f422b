//! Tests for the interest recalculation sweep

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use ferrobank::types::LoanStatus;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::jobs::interest::recalculate_interest;
    use crate::models::{InterestAccrual, Loan};
    use crate::state::AppState;
    use crate::test_support::{seed_account, test_state};

    /// Insert an approved loan requested `weeks_ago` weeks in the past.
    async fn seed_loan(state: &AppState, account_number: &str, weeks_ago: i64, term_weeks: i64) {
        let loan = Loan {
            id: Uuid::new_v4(),
            account_number: account_number.to_string(),
            principal: dec!(1000),
            term_weeks,
            status: LoanStatus::Approved,
            requested_at: Utc::now() - Duration::weeks(weeks_ago),
        };
        let mut conn = state.pool.acquire().await.unwrap();
        state.loans.insert(&mut conn, &loan).await.unwrap();
    }

    #[tokio::test]
    async fn overdue_loan_accrues_one_row_per_completed_period() {
        let state = test_state().await;
        seed_account(&state, "400", dec!(0)).await;
        // One-week term requested ten weeks ago: 63 days overdue, 4 periods.
        seed_loan(&state, "400", 10, 1).await;

        let outcome = recalculate_interest(&state).await.unwrap();
        assert_eq!(outcome.loans_inspected, 1);
        assert_eq!(outcome.periods_accrued, 4);
        // 5% of 1000 per period.
        assert_eq!(outcome.interest_accrued, dec!(200.00));

        assert_eq!(state.loans.count_accruals("400").await.unwrap(), 4);
        let report = state.reports.get("400").await.unwrap().unwrap();
        assert_eq!(report.debts, dec!(200.00));
    }

    #[tokio::test]
    async fn rerunning_the_sweep_the_same_day_is_a_no_op() {
        let state = test_state().await;
        seed_account(&state, "400", dec!(0)).await;
        seed_loan(&state, "400", 10, 1).await;

        recalculate_interest(&state).await.unwrap();
        let second = recalculate_interest(&state).await.unwrap();

        assert_eq!(second.periods_accrued, 0);
        assert_eq!(state.loans.count_accruals("400").await.unwrap(), 4);
        let report = state.reports.get("400").await.unwrap().unwrap();
        assert_eq!(report.debts, dec!(200.00));
    }

    #[tokio::test]
    async fn loans_not_yet_due_accrue_nothing() {
        let state = test_state().await;
        seed_account(&state, "400", dec!(0)).await;
        // Requested now, due four weeks out.
        seed_loan(&state, "400", 0, 4).await;

        let outcome = recalculate_interest(&state).await.unwrap();
        assert_eq!(outcome.loans_inspected, 1);
        assert_eq!(outcome.periods_accrued, 0);
        assert_eq!(state.loans.count_accruals("400").await.unwrap(), 0);
        assert!(state.reports.get("400").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn an_incomplete_period_accrues_nothing() {
        let state = test_state().await;
        seed_account(&state, "400", dec!(0)).await;
        // Two weeks overdue: 14 days, one day short of a period.
        seed_loan(&state, "400", 3, 1).await;

        let outcome = recalculate_interest(&state).await.unwrap();
        assert_eq!(outcome.periods_accrued, 0);
    }

    #[tokio::test]
    async fn only_the_missing_periods_are_accrued() {
        let state = test_state().await;
        seed_account(&state, "400", dec!(0)).await;
        seed_loan(&state, "400", 10, 1).await;

        // Two periods already recorded by earlier sweeps.
        let earlier = (Utc::now() - Duration::days(20)).date_naive();
        let mut conn = state.pool.acquire().await.unwrap();
        for _ in 0..2 {
            let accrual = InterestAccrual::new("400", dec!(50.00), earlier);
            state.loans.insert_accrual(&mut conn, &accrual).await.unwrap();
        }
        drop(conn);

        let outcome = recalculate_interest(&state).await.unwrap();
        assert_eq!(outcome.periods_accrued, 2);
        assert_eq!(outcome.interest_accrued, dec!(100.00));
        assert_eq!(state.loans.count_accruals("400").await.unwrap(), 4);
    }
}
