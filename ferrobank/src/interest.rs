//! Interest accrual rules for overdue loans
//!
//! A loan falls due `term_weeks` weeks after it was requested. Once the due
//! date has passed, interest is charged in fixed 15-day periods: each
//! completed period accrues a flat 5% of the principal. The recalculation
//! job compares the number of completed periods against the accruals already
//! recorded and charges only the difference.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

/// Length of one accrual period, in days.
pub const ACCRUAL_PERIOD_DAYS: i64 = 15;

/// Flat interest rate charged per accrual period, as a fraction of principal.
pub fn period_rate() -> Decimal {
    Decimal::new(5, 2) // 0.05
}

/// Due date of a loan: request date plus the term in weeks.
pub fn due_date(requested_at: DateTime<Utc>, term_weeks: i64) -> DateTime<Utc> {
    requested_at + Duration::weeks(term_weeks)
}

/// Whole days elapsed since the due date; zero when the loan is not yet due.
pub fn days_overdue(now: DateTime<Utc>, due: DateTime<Utc>) -> i64 {
    (now - due).num_days().max(0)
}

/// Number of completed accrual periods for a loan overdue by `days`.
pub fn accrual_periods(days_overdue: i64) -> i64 {
    days_overdue / ACCRUAL_PERIOD_DAYS
}

/// Interest charged for a single accrual period on the given principal.
pub fn interest_for_period(principal: Decimal) -> Decimal {
    principal * period_rate()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn due_date_adds_term_in_weeks() {
        let requested = at("2026-01-01T00:00:00Z");
        assert_eq!(due_date(requested, 2), at("2026-01-15T00:00:00Z"));
    }

    #[test]
    fn days_overdue_is_zero_before_due_date() {
        let due = at("2026-03-01T00:00:00Z");
        assert_eq!(days_overdue(at("2026-02-20T00:00:00Z"), due), 0);
        assert_eq!(days_overdue(due, due), 0);
    }

    #[test]
    fn partial_periods_do_not_accrue() {
        assert_eq!(accrual_periods(0), 0);
        assert_eq!(accrual_periods(14), 0);
        assert_eq!(accrual_periods(15), 1);
        assert_eq!(accrual_periods(29), 1);
        assert_eq!(accrual_periods(30), 2);
    }

    #[test]
    fn period_interest_is_five_percent_of_principal() {
        assert_eq!(interest_for_period(dec!(1000)), dec!(50.00));
        assert_eq!(interest_for_period(dec!(250.50)), dec!(12.5250));
    }

    #[test]
    fn sixty_three_days_overdue_is_four_periods() {
        // One-week loan requested ten weeks ago.
        let requested = at("2026-01-01T00:00:00Z");
        let now = requested + Duration::weeks(10);
        let due = due_date(requested, 1);
        assert_eq!(days_overdue(now, due), 63);
        assert_eq!(accrual_periods(63), 4);
    }
}
