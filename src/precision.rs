//! Exact base-10 arithmetic helpers.
//!
//! Every quotient produced by the engine is quantized to [`INTERNAL_SCALE`]
//! decimal places. Additions and subtractions of quantized values never
//! need rounding, so totals always equal the sum of their lines exactly.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for intermediate results.
pub const INTERNAL_SCALE: u32 = 12;

/// Number of decimal places used when presenting money.
pub const CURRENCY_SCALE: u32 = 2;

/// Rounds a value to the internal precision budget using banker's rounding.
pub fn quantize(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(INTERNAL_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Divides `amount` by `divisor` and quantizes the quotient.
///
/// Callers only pass the fixed period counts and day counts, which are
/// never zero.
pub fn divide(amount: Decimal, divisor: Decimal) -> Decimal {
    quantize(amount / divisor)
}

/// Applies a percentage-scale rate (e.g. `17.206` for 17.206%) to an amount.
///
/// # Example
///
/// ```
/// use payroll_engine::precision::percent_of;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let imss = percent_of(Decimal::from(180_000), Decimal::from_str("17.206").unwrap());
/// assert_eq!(imss, Decimal::from_str("30970.8").unwrap());
/// ```
pub fn percent_of(amount: Decimal, rate_percent: Decimal) -> Decimal {
    divide(amount * rate_percent, Decimal::ONE_HUNDRED)
}

/// Rounds a value to whole cents, half away from zero, for display.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_quantize_keeps_twelve_places() {
        let value = dec("1") / dec("3");
        assert_eq!(quantize(value), dec("0.333333333333"));
        assert_eq!(quantize(value).scale(), INTERNAL_SCALE);
    }

    #[test]
    fn test_quantize_uses_bankers_rounding() {
        assert_eq!(quantize(dec("0.0000000000005")), dec("0"));
        assert_eq!(quantize(dec("0.0000000000015")), dec("0.000000000002"));
    }

    #[test]
    fn test_divide_daily_salary() {
        assert_eq!(divide(dec("180000"), dec("365")), dec("493.150684931507"));
    }

    #[test]
    fn test_percent_of_state_payroll_tax() {
        assert_eq!(percent_of(dec("180000"), dec("4.0")), dec("7200"));
    }

    #[test]
    fn test_round_currency_half_away_from_zero() {
        assert_eq!(round_currency(dec("616.435")), dec("616.44"));
        assert_eq!(round_currency(dec("-616.435")), dec("-616.44"));
        assert_eq!(round_currency(dec("123.287671232877")), dec("123.29"));
    }

    #[test]
    fn test_sums_of_quantized_values_are_exact() {
        let a = divide(dec("7397.260273972603"), dec("12"));
        let b = divide(dec("1479.452054794521"), dec("12"));
        let total = a + b;
        assert_eq!(total - b, a);
        assert_eq!(total - a, b);
    }
}
