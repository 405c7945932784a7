//! Social-security contributions and jurisdiction payroll tax.
//!
//! Every function takes an annual salary and returns an annual amount.
//! Rates in the configuration are percentages.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxConfig;
use crate::models::RiskClass;
use crate::precision::percent_of;

/// Payroll tax rate (percent) applied when a jurisdiction code is unknown.
pub const DEFAULT_PAYROLL_TAX_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 1);

/// IMSS employer contribution for a risk class.
pub fn imss_employer(annual_salary: Decimal, risk_class: RiskClass, config: &TaxConfig) -> Decimal {
    let rate = config.social_security().imss.risk_classes.rate(risk_class);
    percent_of(annual_salary, rate)
}

/// IMSS employee contribution.
pub fn imss_employee(annual_salary: Decimal, config: &TaxConfig) -> Decimal {
    percent_of(annual_salary, config.social_security().imss.employee_rate)
}

/// SAR employer retirement contribution.
pub fn sar_employer(annual_salary: Decimal, config: &TaxConfig) -> Decimal {
    percent_of(annual_salary, config.social_security().sar.employer_rate)
}

/// SAR employee retirement contribution.
pub fn sar_employee(annual_salary: Decimal, config: &TaxConfig) -> Decimal {
    percent_of(annual_salary, config.social_security().sar.employee_rate)
}

/// INFONAVIT housing-fund contribution (employer only).
pub fn infonavit(annual_salary: Decimal, config: &TaxConfig) -> Decimal {
    percent_of(annual_salary, config.social_security().infonavit.rate)
}

/// Returns the payroll tax rate for a jurisdiction code.
///
/// Unknown codes fall back to [`DEFAULT_PAYROLL_TAX_RATE`] so that
/// jurisdictions added after the table was published still calculate.
pub fn jurisdiction_rate(code: &str, config: &TaxConfig) -> Decimal {
    match config.jurisdiction(code) {
        Some(jurisdiction) => jurisdiction.payroll_tax_rate,
        None => {
            debug!(
                jurisdiction = code,
                default_rate = %DEFAULT_PAYROLL_TAX_RATE,
                "Unknown jurisdiction, using default payroll tax rate"
            );
            DEFAULT_PAYROLL_TAX_RATE
        }
    }
}

/// Jurisdiction payroll tax.
pub fn payroll_tax(annual_salary: Decimal, jurisdiction: &str, config: &TaxConfig) -> Decimal {
    percent_of(annual_salary, jurisdiction_rate(jurisdiction, config))
}
