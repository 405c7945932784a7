//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod benefit;
mod calculation_result;
mod input;
mod pay_period;

pub use benefit::{BenefitEntry, BenefitKind, Denomination};
pub use calculation_result::{
    AdditionalBenefitsBreakdown, AmountPair, BreakdownLine, CalculationResult, EmployeeDeductions,
    EmployerCosts,
};
pub use input::{
    AdditionalBenefits, CalculationInput, CustomBenefit, MAX_GROSS_SALARY, RiskClass,
};
pub use pay_period::PayPeriod;
