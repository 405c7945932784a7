//! ISR (income tax) calculation.
//!
//! This module evaluates the progressive ISR table against an annual
//! salary. The table is validated when the configuration loads, so the
//! evaluator only has to find the matching bracket.

use rust_decimal::Decimal;
use tracing::error;

use crate::config::{IsrBracket, TaxConfig};
use crate::precision::quantize;

/// Finds the bracket that taxes `annual_salary`.
///
/// Brackets are ordered by lower limit, so this is the last bracket whose
/// lower limit does not exceed the salary. A sub-cent amount above a
/// declared upper limit stays in that bracket until the next one starts.
/// Returns `None` only for a salary below the first lower limit.
pub fn find_bracket(brackets: &[IsrBracket], annual_salary: Decimal) -> Option<&IsrBracket> {
    brackets
        .iter()
        .rev()
        .find(|bracket| bracket.lower_limit <= annual_salary)
}

/// Calculates annual ISR for an annual salary.
///
/// Tax is `(salary - lower_limit) * rate + fixed_amount` for the matching
/// bracket. A salary below the first bracket is taxed at zero and logged
/// as an integrity error. Validated tables start at zero, so only a
/// negative salary reaches that path.
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::calculate_isr;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = ConfigLoader::load("./config/mx2024").unwrap();
/// let isr = calculate_isr(Decimal::from(180000), loader.config());
/// assert_eq!(isr, Decimal::from_str("18633.358048").unwrap());
/// ```
pub fn calculate_isr(annual_salary: Decimal, config: &TaxConfig) -> Decimal {
    match find_bracket(config.isr_brackets(), annual_salary) {
        Some(bracket) => quantize(bracket.tax_at(annual_salary)),
        None => {
            error!(
                annual_salary = %annual_salary,
                config_version = %config.metadata().version,
                "No ISR bracket matches salary; taxing at zero"
            );
            Decimal::ZERO
        }
    }
}
