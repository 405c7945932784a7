//! Mandatory benefits: aguinaldo, vacation premium, and PTU.
//!
//! Aguinaldo and vacation premium are derived from the daily salary and
//! returned as annual amounts. PTU is supplied by the caller per pay run and
//! only reprojected.

use rust_decimal::Decimal;

use crate::config::BenefitsConfig;
use crate::models::PayPeriod;
use crate::precision::quantize;

use super::period::to_annual;

/// Vacation days granted before the first tenure step is reached.
pub const DEFAULT_VACATION_DAYS: u32 = 12;

/// Returns the vacation days for a tenure.
///
/// Uses the highest step whose `years` does not exceed `tenure_years`, or
/// [`DEFAULT_VACATION_DAYS`] when tenure is below the first step.
pub fn vacation_days(tenure_years: Decimal, config: &BenefitsConfig) -> u32 {
    config
        .vacation_days_by_tenure
        .iter()
        .take_while(|step| step.years <= tenure_years)
        .last()
        .map_or(DEFAULT_VACATION_DAYS, |step| step.days)
}

/// Annual aguinaldo: `daily_salary * aguinaldo_days`.
pub fn aguinaldo(daily_salary: Decimal, config: &BenefitsConfig) -> Decimal {
    quantize(daily_salary * Decimal::from(config.aguinaldo_days))
}

/// Annual vacation premium: `daily_salary * vacation_days * premium_rate`.
pub fn vacation_premium(
    daily_salary: Decimal,
    tenure_years: Decimal,
    config: &BenefitsConfig,
) -> Decimal {
    let days = Decimal::from(vacation_days(tenure_years, config));
    quantize(daily_salary * days * config.vacation_premium_rate)
}

/// Annual PTU from an amount given per pay run of `period`.
pub fn ptu(ptu_amount: Option<Decimal>, period: PayPeriod) -> Decimal {
    ptu_amount.map_or(Decimal::ZERO, |amount| to_annual(amount, period))
}
