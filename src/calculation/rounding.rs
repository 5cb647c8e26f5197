//! Currency rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to whole currency units, halves away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_to_unit;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_to_unit(Decimal::from_str("1234.5").unwrap()), Decimal::new(1235, 0));
/// assert_eq!(round_to_unit(Decimal::from_str("1234.49").unwrap()), Decimal::new(1234, 0));
/// assert_eq!(round_to_unit(Decimal::from_str("-2.5").unwrap()), Decimal::new(-3, 0));
/// ```
pub fn round_to_unit(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes `round(amount * fraction)` to whole units.
pub fn fraction_of(amount: Decimal, fraction: Decimal) -> Decimal {
    round_to_unit(amount * fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_midpoint_rounds_up_for_positive_values() {
        assert_eq!(round_to_unit(dec("0.5")), dec("1"));
        assert_eq!(round_to_unit(dec("2.5")), dec("3"));
    }

    #[test]
    fn test_fraction_of_salary() {
        assert_eq!(fraction_of(dec("10000"), dec("0.10")), dec("1000"));
        assert_eq!(fraction_of(dec("12345"), dec("0.10")), dec("1235"));
        assert_eq!(fraction_of(dec("33333"), dec("0.12")), dec("4000"));
    }
}
