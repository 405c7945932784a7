//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structure for the `/calculate`
//! endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AdditionalBenefits, CalculationInput, PayPeriod, RiskClass};

/// Request body for the `/calculate` endpoint.
///
/// Amounts may be sent as JSON numbers or strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Gross salary for one pay run.
    pub gross_salary: Decimal,
    /// `weekly`, `bi-weekly`, `monthly`, or `annual`.
    pub period: PayPeriod,
    /// Jurisdiction code, e.g. `"CDMX"`.
    pub jurisdiction: String,
    /// IMSS risk class, `"I"` through `"V"`.
    pub risk_class: RiskClass,
    /// Profit-share amount for one pay run.
    #[serde(default)]
    pub ptu_amount: Option<Decimal>,
    /// Years of service.
    pub employee_tenure_years: Decimal,
    /// Optional employer-paid extras.
    #[serde(default)]
    pub additional_benefits: Option<AdditionalBenefits>,
}

impl From<CalculationRequest> for CalculationInput {
    fn from(req: CalculationRequest) -> Self {
        CalculationInput {
            gross_salary: req.gross_salary,
            period: req.period,
            jurisdiction: req.jurisdiction.trim().to_string(),
            risk_class: req.risk_class,
            ptu_amount: req.ptu_amount,
            employee_tenure_years: req.employee_tenure_years,
            additional_benefits: req.additional_benefits,
        }
    }
}
