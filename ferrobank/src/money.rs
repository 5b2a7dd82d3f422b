//! Decimal money helpers
//!
//! Every amount in the system is a `rust_decimal::Decimal`. Arithmetic and
//! aggregation happen in decimal space only; the storage layer round-trips
//! amounts through their text form.

use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// Validate a caller-supplied amount for a money movement or a loan.
///
/// Zero and negative amounts are rejected; every movement is denominated in
/// a strictly positive amount.
pub fn require_positive(amount: Decimal) -> Result<Decimal> {
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    Ok(amount)
}

/// Parse an amount from its stored text form.
pub fn parse_stored(raw: &str) -> Result<Decimal> {
    raw.parse::<Decimal>()
        .map_err(|e| Error::Parse(format!("stored amount {:?} is not a decimal: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn accepts_positive_amounts() {
        assert_eq!(require_positive(dec!(0.01)).unwrap(), dec!(0.01));
        assert_eq!(require_positive(dec!(1000)).unwrap(), dec!(1000));
    }

    #[test]
    fn rejects_zero_and_negative_amounts() {
        assert!(matches!(
            require_positive(Decimal::ZERO),
            Err(Error::InvalidAmount(_))
        ));
        assert!(matches!(
            require_positive(dec!(-5)),
            Err(Error::InvalidAmount(_))
        ));
    }

    #[test]
    fn parses_stored_text_amounts() {
        assert_eq!(parse_stored("70").unwrap(), dec!(70));
        assert_eq!(parse_stored("12.50").unwrap(), dec!(12.50));
        assert!(matches!(parse_stored("not-a-number"), Err(Error::Parse(_))));
    }
}
