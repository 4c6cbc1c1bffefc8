//! Monetary helpers for QP Bank amounts.
//!
//! Balances are plain [`Decimal`] values in dollars. Nothing here ever goes
//! through binary floating point.

use rust_decimal::Decimal;
use std::fmt;

use crate::BankError;

/// Decimal places kept for display and accepted on input.
pub const CENT_PLACES: u32 = 2;

/// Parse a dollar amount typed at the teller.
///
/// Accepts an optional leading `$` and surrounding whitespace. Zero and
/// negative values parse successfully; rejecting them is the ledger's job.
pub fn parse_amount(text: &str) -> Result<Decimal, BankError> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();

    if digits.is_empty() {
        return Err(BankError::invalid_input("amount is required"));
    }

    let value: Decimal = digits
        .parse()
        .map_err(|_| BankError::invalid_input(format!("'{}' is not a valid amount", trimmed)))?;

    let value = value.normalize();
    if value.scale() > CENT_PLACES {
        return Err(BankError::invalid_input(format!(
            "'{}' has more than {} decimal places",
            trimmed, CENT_PLACES
        )));
    }

    Ok(value)
}

/// Check if the amount is strictly positive.
pub fn is_positive(amount: Decimal) -> bool {
    amount > Decimal::ZERO
}

/// Display wrapper rendering an amount as `$1234.50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dollars(pub Decimal);

impl fmt::Display for Dollars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0.round_dp(CENT_PLACES);
        value.rescale(CENT_PLACES);
        write!(f, "${}", value)
    }
}

impl From<Decimal> for Dollars {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100").unwrap(), Decimal::from(100));
        assert_eq!(parse_amount(" $30.50 ").unwrap(), Decimal::new(3050, 2));
        assert_eq!(parse_amount("1.500").unwrap(), Decimal::new(15, 1));
    }

    #[test]
    fn test_parse_amount_keeps_non_positive_values() {
        assert_eq!(parse_amount("0").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("-5").unwrap(), Decimal::from(-5));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(matches!(
            parse_amount("ten dollars"),
            Err(BankError::InvalidInput { .. })
        ));
        assert!(matches!(parse_amount("   "), Err(BankError::InvalidInput { .. })));
    }

    #[test]
    fn test_parse_amount_rejects_fractional_cents() {
        let err = parse_amount("0.005").unwrap_err();
        assert!(err.to_string().contains("more than 2 decimal places"));
    }

    #[test]
    fn test_dollars_display() {
        assert_eq!(Dollars(Decimal::from(70)).to_string(), "$70.00");
        assert_eq!(Dollars(Decimal::new(5, 1)).to_string(), "$0.50");
        assert_eq!(Dollars(Decimal::new(123456, 3)).to_string(), "$123.46");
        assert_eq!(Dollars(Decimal::ZERO).to_string(), "$0.00");
    }

    #[test]
    fn test_repeated_cents_are_exact() {
        let dime = parse_amount("0.10").unwrap();
        let total: Decimal = std::iter::repeat(dime).take(10).sum();
        assert_eq!(total, Decimal::ONE);
    }

    #[test]
    fn test_is_positive() {
        assert!(is_positive(Decimal::new(1, 2)));
        assert!(!is_positive(Decimal::ZERO));
        assert!(!is_positive(Decimal::from(-1)));
    }
}
