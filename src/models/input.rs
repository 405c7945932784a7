//! Calculation input models.
//!
//! This module defines the [`CalculationInput`] accepted by the engine,
//! the IMSS [`RiskClass`], and the optional [`AdditionalBenefits`] bag,
//! together with the boundary validation applied before any arithmetic.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::precision::INTERNAL_SCALE;

use super::{BenefitEntry, BenefitKind, Denomination, PayPeriod};

/// Largest gross salary accepted in a single calculation.
pub const MAX_GROSS_SALARY: i64 = 1_000_000_000_000;

/// IMSS workplace risk classification, from I (lowest) to V (highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskClass {
    /// Class I.
    I,
    /// Class II.
    II,
    /// Class III.
    III,
    /// Class IV.
    IV,
    /// Class V.
    V,
}

impl RiskClass {
    /// All classes, lowest risk first.
    pub const ALL: [RiskClass; 5] = [
        RiskClass::I,
        RiskClass::II,
        RiskClass::III,
        RiskClass::IV,
        RiskClass::V,
    ];

    /// Returns the roman numeral for this class.
    pub fn as_str(self) -> &'static str {
        match self {
            RiskClass::I => "I",
            RiskClass::II => "II",
            RiskClass::III => "III",
            RiskClass::IV => "IV",
            RiskClass::V => "V",
        }
    }

    /// Returns the label shown to payroll users, e.g. `"Clase III"`.
    pub fn label(self) -> String {
        format!("Clase {}", self.as_str())
    }
}

impl fmt::Display for RiskClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caller-defined bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomBenefit {
    /// Display name of the bonus.
    pub name: String,
    /// The amount, in the basis given by `is_annual`.
    pub amount: Decimal,
    /// Whether `amount` is yearly rather than per pay run.
    #[serde(default)]
    pub is_annual: bool,
}

/// Optional employer-paid extras on top of the mandatory wage structure.
///
/// Bonuses are quoted annually; allowances and insurance contributions are
/// quoted per pay run of the calculation's period. Absent fields contribute
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalBenefits {
    /// Yearly performance bonus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_bonus: Option<Decimal>,
    /// One-time signing bonus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_bonus: Option<Decimal>,
    /// Yearly retention bonus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_bonus: Option<Decimal>,
    /// Meal vouchers per pay run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_vouchers: Option<Decimal>,
    /// Transportation allowance per pay run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transportation: Option<Decimal>,
    /// Health insurance contribution per pay run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_insurance: Option<Decimal>,
    /// Life insurance contribution per pay run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_insurance: Option<Decimal>,
    /// Custom bonuses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other: Vec<CustomBenefit>,
}

impl AdditionalBenefits {
    /// Flattens the bag into tagged entries, named slots first.
    ///
    /// Absent slots produce no entry.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{AdditionalBenefits, BenefitKind, Denomination};
    /// use rust_decimal::Decimal;
    ///
    /// let benefits = AdditionalBenefits {
    ///     transportation: Some(Decimal::from(500)),
    ///     ..Default::default()
    /// };
    /// let entries = benefits.entries();
    /// assert_eq!(entries.len(), 1);
    /// assert_eq!(entries[0].kind, BenefitKind::Transportation);
    /// assert_eq!(entries[0].denomination, Denomination::Period);
    /// ```
    pub fn entries(&self) -> Vec<BenefitEntry> {
        let named = [
            (BenefitKind::PerformanceBonus, self.performance_bonus),
            (BenefitKind::SigningBonus, self.signing_bonus),
            (BenefitKind::RetentionBonus, self.retention_bonus),
            (BenefitKind::MealVouchers, self.meal_vouchers),
            (BenefitKind::Transportation, self.transportation),
            (BenefitKind::HealthInsurance, self.health_insurance),
            (BenefitKind::LifeInsurance, self.life_insurance),
        ];

        let mut entries: Vec<BenefitEntry> = named
            .into_iter()
            .filter_map(|(kind, amount)| {
                let amount = amount?;
                let denomination = kind.default_denomination()?;
                Some(BenefitEntry {
                    kind,
                    amount,
                    denomination,
                })
            })
            .collect();

        entries.extend(self.other.iter().map(|custom| BenefitEntry {
            kind: BenefitKind::Other(custom.name.clone()),
            amount: custom.amount,
            denomination: if custom.is_annual {
                Denomination::Annual
            } else {
                Denomination::Period
            },
        }));

        entries
    }

    fn validate(&self) -> EngineResult<()> {
        for (index, custom) in self.other.iter().enumerate() {
            if custom.name.trim().is_empty() {
                return Err(EngineError::invalid_input(
                    &format!("additional_benefits.other[{}].name", index),
                    "must not be blank",
                ));
            }
        }

        for entry in self.entries() {
            let field = match &entry.kind {
                BenefitKind::Other(name) => format!("additional_benefits.other[{}]", name),
                kind => format!("additional_benefits.{}", kind_field_name(kind)),
            };
            check_amount(&field, entry.amount)?;
        }

        Ok(())
    }
}

fn kind_field_name(kind: &BenefitKind) -> &'static str {
    match kind {
        BenefitKind::PerformanceBonus => "performance_bonus",
        BenefitKind::SigningBonus => "signing_bonus",
        BenefitKind::RetentionBonus => "retention_bonus",
        BenefitKind::MealVouchers => "meal_vouchers",
        BenefitKind::Transportation => "transportation",
        BenefitKind::HealthInsurance => "health_insurance",
        BenefitKind::LifeInsurance => "life_insurance",
        BenefitKind::Other(_) => "other",
    }
}

/// Everything the engine needs to cost one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Gross salary for one pay run of `period`.
    pub gross_salary: Decimal,
    /// The cadence `gross_salary` is expressed in.
    pub period: PayPeriod,
    /// Jurisdiction (state) code used for payroll tax, e.g. `"CDMX"`.
    pub jurisdiction: String,
    /// IMSS workplace risk classification.
    pub risk_class: RiskClass,
    /// Profit-share amount for one pay run of `period`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ptu_amount: Option<Decimal>,
    /// Years of service, fractional allowed.
    pub employee_tenure_years: Decimal,
    /// Optional extras paid by the employer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_benefits: Option<AdditionalBenefits>,
}

impl CalculationInput {
    /// Rejects input the calculators are not meant to see.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the gross salary is not positive or exceeds
    /// [`MAX_GROSS_SALARY`], when tenure, PTU, or any benefit amount is
    /// negative, when a custom benefit has a blank name, or when an amount
    /// carries more decimal places than the engine keeps internally.
    pub fn validate(&self) -> EngineResult<()> {
        if self.gross_salary <= Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "gross_salary",
                "must be greater than 0",
            ));
        }
        if self.gross_salary > Decimal::from(MAX_GROSS_SALARY) {
            return Err(EngineError::invalid_input(
                "gross_salary",
                format!("must not exceed {}", MAX_GROSS_SALARY),
            ));
        }
        check_scale("gross_salary", self.gross_salary)?;
        check_amount("employee_tenure_years", self.employee_tenure_years)?;

        if let Some(ptu) = self.ptu_amount {
            check_amount("ptu_amount", ptu)?;
        }

        if let Some(benefits) = &self.additional_benefits {
            benefits.validate()?;
        }

        Ok(())
    }
}

fn check_amount(field: &str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::invalid_input(field, "cannot be negative"));
    }
    if value > Decimal::from(MAX_GROSS_SALARY) {
        return Err(EngineError::invalid_input(
            field,
            format!("must not exceed {}", MAX_GROSS_SALARY),
        ));
    }
    check_scale(field, value)
}

fn check_scale(field: &str, value: Decimal) -> EngineResult<()> {
    if value.normalize().scale() > INTERNAL_SCALE {
        return Err(EngineError::invalid_input(
            field,
            format!("must have at most {} decimal places", INTERNAL_SCALE),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_input() -> CalculationInput {
        CalculationInput {
            gross_salary: dec("15000"),
            period: PayPeriod::Monthly,
            jurisdiction: "CDMX".to_string(),
            risk_class: RiskClass::III,
            ptu_amount: None,
            employee_tenure_years: dec("1"),
            additional_benefits: None,
        }
    }

    fn assert_invalid_field(input: &CalculationInput, expected_field: &str) {
        match input.validate() {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("Expected InvalidInput for {}, got {:?}", expected_field, other),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(create_test_input().validate().is_ok());
    }

    /// IN-001: zero salary is rejected at the boundary
    #[test]
    fn test_zero_salary_rejected() {
        let mut input = create_test_input();
        input.gross_salary = Decimal::ZERO;
        assert_invalid_field(&input, "gross_salary");
    }

    #[test]
    fn test_negative_salary_rejected() {
        let mut input = create_test_input();
        input.gross_salary = dec("-1");
        assert_invalid_field(&input, "gross_salary");
    }

    #[test]
    fn test_oversized_salary_rejected() {
        let mut input = create_test_input();
        input.gross_salary = Decimal::from(MAX_GROSS_SALARY) + Decimal::ONE;
        assert_invalid_field(&input, "gross_salary");
    }

    #[test]
    fn test_negative_tenure_rejected() {
        let mut input = create_test_input();
        input.employee_tenure_years = dec("-0.5");
        assert_invalid_field(&input, "employee_tenure_years");
    }

    #[test]
    fn test_zero_tenure_accepted() {
        let mut input = create_test_input();
        input.employee_tenure_years = Decimal::ZERO;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_negative_ptu_rejected() {
        let mut input = create_test_input();
        input.ptu_amount = Some(dec("-100"));
        assert_invalid_field(&input, "ptu_amount");
    }

    #[test]
    fn test_excess_precision_rejected() {
        let mut input = create_test_input();
        input.gross_salary = dec("15000.0000000000001");
        assert_invalid_field(&input, "gross_salary");
    }

    #[test]
    fn test_trailing_zeros_do_not_count_as_precision() {
        let mut input = create_test_input();
        input.gross_salary = dec("15000.00000000000000");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_negative_benefit_rejected() {
        let mut input = create_test_input();
        input.additional_benefits = Some(AdditionalBenefits {
            meal_vouchers: Some(dec("-10")),
            ..Default::default()
        });
        assert_invalid_field(&input, "additional_benefits.meal_vouchers");
    }

    #[test]
    fn test_blank_custom_benefit_name_rejected() {
        let mut input = create_test_input();
        input.additional_benefits = Some(AdditionalBenefits {
            other: vec![CustomBenefit {
                name: "  ".to_string(),
                amount: dec("100"),
                is_annual: false,
            }],
            ..Default::default()
        });
        assert_invalid_field(&input, "additional_benefits.other[0].name");
    }

    #[test]
    fn test_entries_skip_absent_slots() {
        let benefits = AdditionalBenefits {
            performance_bonus: Some(dec("12000")),
            health_insurance: Some(dec("800")),
            other: vec![CustomBenefit {
                name: "Gym".to_string(),
                amount: dec("6000"),
                is_annual: true,
            }],
            ..Default::default()
        };

        let entries = benefits.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].kind, BenefitKind::PerformanceBonus);
        assert_eq!(entries[0].denomination, Denomination::Annual);
        assert_eq!(entries[1].kind, BenefitKind::HealthInsurance);
        assert_eq!(entries[1].denomination, Denomination::Period);
        assert_eq!(entries[2].kind, BenefitKind::Other("Gym".to_string()));
        assert_eq!(entries[2].denomination, Denomination::Annual);
    }

    #[test]
    fn test_empty_bag_has_no_entries() {
        assert!(AdditionalBenefits::default().entries().is_empty());
    }

    #[test]
    fn test_risk_class_label() {
        assert_eq!(RiskClass::III.label(), "Clase III");
        assert_eq!(RiskClass::V.to_string(), "V");
    }

    #[test]
    fn test_deserialize_input_with_defaults() {
        let json = r#"{
            "gross_salary": "15000",
            "period": "monthly",
            "jurisdiction": "CDMX",
            "risk_class": "III",
            "employee_tenure_years": 1
        }"#;
        let input: CalculationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, create_test_input());
    }

    #[test]
    fn test_deserialize_custom_benefit_defaults_to_period() {
        let json = r#"{ "name": "Bono", "amount": 250 }"#;
        let custom: CustomBenefit = serde_json::from_str(json).unwrap();
        assert!(!custom.is_annual);
        assert_eq!(custom.amount, dec("250"));
    }
}
