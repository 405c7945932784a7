//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the validated
//! [`TaxConfig`] aggregate the calculators read from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::RiskClass;

use super::validation;

/// Metadata about the tax tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Human-readable name of the table set.
    pub name: String,
    /// Tax-year version, e.g. "2024".
    pub version: String,
    /// When the tables were last revised.
    pub last_updated: NaiveDate,
    /// Where the figures were published.
    pub source_url: String,
}

/// One band of the progressive ISR table.
///
/// Limits are annual MXN amounts; `rate` is a fraction (0.1792 for 17.92%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsrBracket {
    /// Inclusive lower bound.
    pub lower_limit: Decimal,
    /// Inclusive upper bound, `None` for the top bracket.
    pub upper_limit: Option<Decimal>,
    /// Marginal rate applied above `lower_limit`.
    pub rate: Decimal,
    /// Tax owed at exactly `lower_limit`.
    pub fixed_amount: Decimal,
}

impl IsrBracket {
    /// Tax this bracket assigns to `salary`, without range checks.
    pub fn tax_at(&self, salary: Decimal) -> Decimal {
        (salary - self.lower_limit) * self.rate + self.fixed_amount
    }
}

/// ISR section from isr.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsrConfig {
    /// Brackets ordered by `lower_limit`.
    pub tax_brackets: Vec<IsrBracket>,
}

/// IMSS employer rates per risk class, as percentages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskClassRates {
    /// Class I rate.
    #[serde(rename = "I")]
    pub class_i: Decimal,
    /// Class II rate.
    #[serde(rename = "II")]
    pub class_ii: Decimal,
    /// Class III rate.
    #[serde(rename = "III")]
    pub class_iii: Decimal,
    /// Class IV rate.
    #[serde(rename = "IV")]
    pub class_iv: Decimal,
    /// Class V rate.
    #[serde(rename = "V")]
    pub class_v: Decimal,
}

impl RiskClassRates {
    /// Returns the employer rate for a risk class.
    pub fn rate(&self, risk_class: RiskClass) -> Decimal {
        match risk_class {
            RiskClass::I => self.class_i,
            RiskClass::II => self.class_ii,
            RiskClass::III => self.class_iii,
            RiskClass::IV => self.class_iv,
            RiskClass::V => self.class_v,
        }
    }
}

/// IMSS contribution rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImssConfig {
    /// Employer rate by risk class.
    pub risk_classes: RiskClassRates,
    /// Flat employee rate.
    pub employee_rate: Decimal,
}

/// SAR retirement contribution rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarConfig {
    /// Employer rate.
    pub employer_rate: Decimal,
    /// Employee rate.
    pub employee_rate: Decimal,
}

/// INFONAVIT housing-fund rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfonavitConfig {
    /// Employer-only rate.
    pub rate: Decimal,
}

/// Social-security section from social_security.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialSecurityConfig {
    /// IMSS rates.
    pub imss: ImssConfig,
    /// SAR rates.
    pub sar: SarConfig,
    /// INFONAVIT rate.
    pub infonavit: InfonavitConfig,
}

/// A step of the tenure-to-vacation-days table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationStep {
    /// Years of service at which this step starts.
    pub years: Decimal,
    /// Vacation days granted from this step on.
    pub days: u32,
}

/// Mandatory-benefit section from benefits.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitsConfig {
    /// Days of salary paid as aguinaldo.
    pub aguinaldo_days: u32,
    /// Fraction of vacation pay paid as premium.
    pub vacation_premium_rate: Decimal,
    /// Tenure steps, ascending by `years`.
    pub vacation_days_by_tenure: Vec<VacationStep>,
}

/// A state or other jurisdiction that levies payroll tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jurisdiction {
    /// Short code, e.g. "CDMX".
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Payroll tax rate as a percentage.
    pub payroll_tax_rate: Decimal,
}

/// Jurisdictions file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JurisdictionsConfig {
    /// All known jurisdictions.
    pub jurisdictions: Vec<Jurisdiction>,
}

/// A non-fatal inconsistency found while validating the tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// The complete, validated tax configuration.
///
/// A `TaxConfig` can only be obtained through [`TaxConfig::new`], which
/// rejects invalid tables, so every instance the calculators see has
/// passed validation. It is never mutated after construction.
#[derive(Debug, Clone)]
pub struct TaxConfig {
    metadata: ConfigMetadata,
    isr: IsrConfig,
    social_security: SocialSecurityConfig,
    benefits: BenefitsConfig,
    jurisdictions: Vec<Jurisdiction>,
    warnings: Vec<ConfigWarning>,
}

impl TaxConfig {
    /// Validates and assembles a configuration from its sections.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first section that breaks an
    /// invariant. Non-fatal findings are kept in [`TaxConfig::warnings`].
    pub fn new(
        metadata: ConfigMetadata,
        isr: IsrConfig,
        social_security: SocialSecurityConfig,
        benefits: BenefitsConfig,
        jurisdictions: Vec<Jurisdiction>,
    ) -> EngineResult<Self> {
        let warnings = validation::validate_isr(&isr.tax_brackets)?;
        validation::validate_social_security(&social_security)?;
        validation::validate_benefits(&benefits)?;
        validation::validate_jurisdictions(&jurisdictions)?;

        Ok(Self {
            metadata,
            isr,
            social_security,
            benefits,
            jurisdictions,
            warnings,
        })
    }

    /// Returns the table metadata.
    pub fn metadata(&self) -> &ConfigMetadata {
        &self.metadata
    }

    /// Returns the ISR brackets, ordered by lower limit.
    pub fn isr_brackets(&self) -> &[IsrBracket] {
        &self.isr.tax_brackets
    }

    /// Returns the social-security rates.
    pub fn social_security(&self) -> &SocialSecurityConfig {
        &self.social_security
    }

    /// Returns the mandatory-benefit settings.
    pub fn benefits(&self) -> &BenefitsConfig {
        &self.benefits
    }

    /// Returns all jurisdictions.
    pub fn jurisdictions(&self) -> &[Jurisdiction] {
        &self.jurisdictions
    }

    /// Looks up a jurisdiction by exact code.
    pub fn jurisdiction(&self, code: &str) -> Option<&Jurisdiction> {
        self.jurisdictions.iter().find(|j| j.code == code)
    }

    /// Returns the non-fatal findings from validation.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }
}
