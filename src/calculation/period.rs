//! Pay period conversion.
//!
//! This module converts amounts between a pay period and its annual
//! equivalent, and derives the daily salary used by the mandatory benefits.

use rust_decimal::Decimal;

use crate::models::PayPeriod;
use crate::precision::divide;

/// Calendar days used to derive the daily salary.
pub const DAYS_PER_YEAR: u32 = 365;

/// Converts a per-period amount to its annual equivalent.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::to_annual;
/// use payroll_engine::models::PayPeriod;
/// use rust_decimal::Decimal;
///
/// let annual = to_annual(Decimal::from(15000), PayPeriod::Monthly);
/// assert_eq!(annual, Decimal::from(180000));
///
/// // Two pay runs per month, not 26 fortnights.
/// let annual = to_annual(Decimal::from(7500), PayPeriod::BiWeekly);
/// assert_eq!(annual, Decimal::from(180000));
/// ```
pub fn to_annual(amount: Decimal, period: PayPeriod) -> Decimal {
    amount * period.periods_per_year()
}

/// Converts an annual amount to one pay run of `period`.
///
/// The quotient is quantized to the internal precision. For any amount
/// with at most that many decimal places, `from_annual(to_annual(x, p), p)`
/// returns `x` exactly.
pub fn from_annual(amount: Decimal, period: PayPeriod) -> Decimal {
    divide(amount, period.periods_per_year())
}

/// Returns the daily salary for an annual salary (calendar days).
pub fn daily_salary(annual_salary: Decimal) -> Decimal {
    divide(annual_salary, Decimal::from(DAYS_PER_YEAR))
}
