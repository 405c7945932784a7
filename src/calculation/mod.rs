//! Calculation logic for the payroll engine.
//!
//! This module contains the calculators for pay period conversion,
//! progressive ISR, IMSS/SAR/INFONAVIT contributions, jurisdiction payroll
//! tax, mandatory benefits (aguinaldo, vacation premium, PTU), the
//! additional-benefits aggregator, and the orchestrator that combines them.

mod additional_benefits;
mod isr;
mod mandatory_benefits;
mod payroll;
mod period;
mod social_security;

pub use additional_benefits::{AggregatedBenefits, aggregate_additional_benefits};
pub use isr::{calculate_isr, find_bracket};
pub use mandatory_benefits::{
    DEFAULT_VACATION_DAYS, aguinaldo, ptu, vacation_days, vacation_premium,
};
pub use payroll::calculate_payroll;
pub use period::{DAYS_PER_YEAR, daily_salary, from_annual, to_annual};
pub use social_security::{
    DEFAULT_PAYROLL_TAX_RATE, imss_employee, imss_employer, infonavit, jurisdiction_rate,
    payroll_tax, sar_employee, sar_employer,
};
