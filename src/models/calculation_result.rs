//! Calculation result models for the payroll engine.
//!
//! This module contains the [`CalculationResult`] type and the itemized
//! structures it carries: employer costs, employee deductions, and the
//! additional-benefits breakdown, each materialized in both the pay period
//! and annual form.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BenefitKind, CalculationInput, PayPeriod};

/// The same amount expressed per pay run and per year.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AmountPair;
/// use rust_decimal::Decimal;
///
/// let pair = AmountPair {
///     period: Decimal::from(500),
///     annual: Decimal::from(6000),
/// };
/// assert!(!pair.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountPair {
    /// Amount for one pay run.
    pub period: Decimal,
    /// Amount for a full year.
    pub annual: Decimal,
}

impl AmountPair {
    /// A pair of zeros.
    pub const ZERO: AmountPair = AmountPair {
        period: Decimal::ZERO,
        annual: Decimal::ZERO,
    };

    /// Returns true when both amounts are zero.
    pub fn is_zero(&self) -> bool {
        self.period.is_zero() && self.annual.is_zero()
    }
}

/// Costs the employer pays on top of gross salary.
///
/// `total` always equals the sum of the other fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerCosts {
    /// IMSS employer contribution.
    pub imss: Decimal,
    /// SAR employer retirement contribution.
    pub sar: Decimal,
    /// INFONAVIT housing-fund contribution.
    pub infonavit: Decimal,
    /// Jurisdiction payroll tax.
    pub payroll_tax: Decimal,
    /// Aguinaldo (annual bonus) accrual.
    pub aguinaldo: Decimal,
    /// Vacation premium accrual.
    pub vacation_premium: Decimal,
    /// Profit-share (PTU).
    pub ptu: Decimal,
    /// Sum of all additional benefits.
    pub additional_benefits: Decimal,
    /// Sum of every line above.
    pub total: Decimal,
}

impl EmployerCosts {
    /// Returns the named lines, excluding `total`.
    pub fn lines(&self) -> [Decimal; 8] {
        [
            self.imss,
            self.sar,
            self.infonavit,
            self.payroll_tax,
            self.aguinaldo,
            self.vacation_premium,
            self.ptu,
            self.additional_benefits,
        ]
    }

    /// Sums the named lines.
    pub fn sum_of_lines(&self) -> Decimal {
        self.lines().iter().sum()
    }

    pub(crate) fn totalled(mut self) -> Self {
        self.total = self.sum_of_lines();
        self
    }
}

/// Amounts withheld from the employee's gross salary.
///
/// `total` always equals the sum of the other fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDeductions {
    /// ISR income tax.
    pub isr: Decimal,
    /// IMSS employee contribution.
    pub imss: Decimal,
    /// SAR employee contribution.
    pub sar: Decimal,
    /// Sum of every line above.
    pub total: Decimal,
}

impl EmployeeDeductions {
    /// Returns the named lines, excluding `total`.
    pub fn lines(&self) -> [Decimal; 3] {
        [self.isr, self.imss, self.sar]
    }

    /// Sums the named lines.
    pub fn sum_of_lines(&self) -> Decimal {
        self.lines().iter().sum()
    }

    pub(crate) fn totalled(mut self) -> Self {
        self.total = self.sum_of_lines();
        self
    }
}

/// One optional benefit with a strictly positive contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownLine {
    /// Which benefit this line is for.
    pub kind: BenefitKind,
    /// Amount for one pay run.
    pub period: Decimal,
    /// Amount for a full year.
    pub annual: Decimal,
}

/// Itemized view of mandatory and additional benefits.
///
/// The three mandatory benefits are always present, even at zero.
/// `additional` only lists contributions greater than zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalBenefitsBreakdown {
    /// Aguinaldo accrual.
    pub aguinaldo: AmountPair,
    /// Vacation premium accrual.
    pub vacation_premium: AmountPair,
    /// Profit-share.
    pub ptu: AmountPair,
    /// Optional and custom benefits, in input order.
    #[serde(default)]
    pub additional: Vec<BreakdownLine>,
}

impl AdditionalBenefitsBreakdown {
    /// Finds the line for a given benefit kind.
    pub fn line(&self, kind: &BenefitKind) -> Option<&BreakdownLine> {
        self.additional.iter().find(|line| &line.kind == kind)
    }
}

/// The complete result of a payroll cost calculation.
///
/// Every money figure is materialized twice: in the requested pay period and
/// annualized. The annual figures are computed independently from the
/// annual salary rather than by scaling the period figures.
///
/// Invariants:
/// - `net_salary + employee_deductions.total == gross_salary`
/// - `total_company_cost == gross_salary + employer_costs.total`
/// - the same two relations hold for the annual fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Unique identifier for this calculation.
    pub id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The version of the tax tables used.
    pub config_version: String,
    /// The input the result was computed from.
    pub input: CalculationInput,
    /// The period the non-annual fields are expressed in.
    pub period: PayPeriod,
    /// Gross salary for one pay run.
    pub gross_salary: Decimal,
    /// Gross salary for a year.
    pub gross_salary_annual: Decimal,
    /// Employer costs for one pay run.
    pub employer_costs: EmployerCosts,
    /// Employer costs for a year.
    pub employer_costs_annual: EmployerCosts,
    /// Employee deductions for one pay run.
    pub employee_deductions: EmployeeDeductions,
    /// Employee deductions for a year.
    pub employee_deductions_annual: EmployeeDeductions,
    /// Take-home pay for one pay run.
    pub net_salary: Decimal,
    /// Take-home pay for a year.
    pub net_salary_annual: Decimal,
    /// Gross salary plus employer costs, per pay run.
    pub total_company_cost: Decimal,
    /// Gross salary plus employer costs, per year.
    pub total_company_cost_annual: Decimal,
    /// Itemized benefits. Always present on fresh results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_benefits_breakdown: Option<AdditionalBenefitsBreakdown>,
}
