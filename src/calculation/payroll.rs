//! Payroll calculation orchestrator.
//!
//! This module provides [`calculate_payroll`], the main entry point that
//! costs one employee. Every line is computed as an annual amount from the
//! annual salary and then projected into each target period on its own,
//! so the period and annual figures never derive from one another.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::TaxConfig;
use crate::error::EngineResult;
use crate::models::{
    AdditionalBenefitsBreakdown, AmountPair, CalculationInput, CalculationResult,
    EmployeeDeductions, EmployerCosts, PayPeriod,
};

use super::additional_benefits::aggregate_additional_benefits;
use super::isr::calculate_isr;
use super::mandatory_benefits::{aguinaldo, ptu, vacation_premium};
use super::period::{daily_salary, from_annual, to_annual};
use super::social_security::{
    imss_employee, imss_employer, infonavit, payroll_tax, sar_employee, sar_employer,
};

/// Annual amounts for every employer-cost and deduction line.
struct AnnualLines {
    imss_employer: Decimal,
    sar_employer: Decimal,
    infonavit: Decimal,
    payroll_tax: Decimal,
    aguinaldo: Decimal,
    vacation_premium: Decimal,
    ptu: Decimal,
    isr: Decimal,
    imss_employee: Decimal,
    sar_employee: Decimal,
}

impl AnnualLines {
    fn compute(input: &CalculationInput, annual_salary: Decimal, config: &TaxConfig) -> Self {
        let daily = daily_salary(annual_salary);
        let benefits = config.benefits();

        Self {
            imss_employer: imss_employer(annual_salary, input.risk_class, config),
            sar_employer: sar_employer(annual_salary, config),
            infonavit: infonavit(annual_salary, config),
            payroll_tax: payroll_tax(annual_salary, &input.jurisdiction, config),
            aguinaldo: aguinaldo(daily, benefits),
            vacation_premium: vacation_premium(daily, input.employee_tenure_years, benefits),
            ptu: ptu(input.ptu_amount, input.period),
            isr: calculate_isr(annual_salary, config),
            imss_employee: imss_employee(annual_salary, config),
            sar_employee: sar_employee(annual_salary, config),
        }
    }

    /// Employer costs in `target`, with the additional-benefits total
    /// already expressed in that period.
    fn employer_costs(&self, target: PayPeriod, additional_benefits: Decimal) -> EmployerCosts {
        EmployerCosts {
            imss: from_annual(self.imss_employer, target),
            sar: from_annual(self.sar_employer, target),
            infonavit: from_annual(self.infonavit, target),
            payroll_tax: from_annual(self.payroll_tax, target),
            aguinaldo: from_annual(self.aguinaldo, target),
            vacation_premium: from_annual(self.vacation_premium, target),
            ptu: from_annual(self.ptu, target),
            additional_benefits,
            total: Decimal::ZERO,
        }
        .totalled()
    }

    fn employee_deductions(&self, target: PayPeriod) -> EmployeeDeductions {
        EmployeeDeductions {
            isr: from_annual(self.isr, target),
            imss: from_annual(self.imss_employee, target),
            sar: from_annual(self.sar_employee, target),
            total: Decimal::ZERO,
        }
        .totalled()
    }

    fn pair(annual: Decimal, period: PayPeriod) -> AmountPair {
        AmountPair {
            period: from_annual(annual, period),
            annual,
        }
    }
}

/// Calculates employer cost, employee deductions, and net pay.
///
/// The input is validated first; nothing is computed for invalid input.
/// The returned result is a fresh value with its own id and timestamp and
/// shares nothing with `input`.
///
/// # Errors
///
/// Returns `InvalidInput` when [`CalculationInput::validate`] rejects the
/// input.
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::calculate_payroll;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{CalculationInput, PayPeriod, RiskClass};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/mx2024").unwrap();
/// let input = CalculationInput {
///     gross_salary: Decimal::from(15000),
///     period: PayPeriod::Monthly,
///     jurisdiction: "CDMX".to_string(),
///     risk_class: RiskClass::III,
///     ptu_amount: None,
///     employee_tenure_years: Decimal::ONE,
///     additional_benefits: None,
/// };
///
/// let result = calculate_payroll(&input, loader.config()).unwrap();
/// assert_eq!(result.gross_salary_annual, Decimal::from(180000));
/// assert_eq!(result.net_salary + result.employee_deductions.total, result.gross_salary);
/// ```
pub fn calculate_payroll(
    input: &CalculationInput,
    config: &TaxConfig,
) -> EngineResult<CalculationResult> {
    input.validate()?;

    let id = Uuid::new_v4();
    let period = input.period;
    let gross_salary_annual = to_annual(input.gross_salary, period);

    debug!(
        calculation_id = %id,
        period = %period,
        gross_salary_annual = %gross_salary_annual,
        jurisdiction = %input.jurisdiction,
        risk_class = %input.risk_class,
        "Starting payroll calculation"
    );

    let lines = AnnualLines::compute(input, gross_salary_annual, config);
    let aggregated = aggregate_additional_benefits(input.additional_benefits.as_ref(), period);

    let employer_costs = lines.employer_costs(period, aggregated.period_total);
    let employer_costs_annual = lines.employer_costs(PayPeriod::Annual, aggregated.annual_total);
    let employee_deductions = lines.employee_deductions(period);
    let employee_deductions_annual = lines.employee_deductions(PayPeriod::Annual);

    let gross_salary = input.gross_salary;
    let net_salary = gross_salary - employee_deductions.total;
    let net_salary_annual = gross_salary_annual - employee_deductions_annual.total;
    let total_company_cost = gross_salary + employer_costs.total;
    let total_company_cost_annual = gross_salary_annual + employer_costs_annual.total;

    let breakdown = AdditionalBenefitsBreakdown {
        aguinaldo: AnnualLines::pair(lines.aguinaldo, period),
        vacation_premium: AnnualLines::pair(lines.vacation_premium, period),
        ptu: AnnualLines::pair(lines.ptu, period),
        additional: aggregated.lines,
    };

    info!(
        calculation_id = %id,
        period = %period,
        total_company_cost = %total_company_cost,
        net_salary = %net_salary,
        "Payroll calculation complete"
    );

    Ok(CalculationResult {
        id,
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        config_version: config.metadata().version.clone(),
        input: input.clone(),
        period,
        gross_salary,
        gross_salary_annual,
        employer_costs,
        employer_costs_annual,
        employee_deductions,
        employee_deductions_annual,
        net_salary,
        net_salary_annual,
        total_company_cost,
        total_company_cost_annual,
        additional_benefits_breakdown: Some(breakdown),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures;
    use crate::error::EngineError;
    use crate::models::{AdditionalBenefits, BenefitKind, CustomBenefit, RiskClass};
    use crate::precision::round_currency;
    use proptest::prelude::*;
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

    /// PR-001: 15,000 monthly in CDMX, class III, one year of tenure
    #[test]
    fn test_reference_scenario_monthly() {
        let config = fixtures::tax_config();
        let result = calculate_payroll(&create_test_input(), &config).unwrap();

        assert_eq!(result.gross_salary_annual, dec("180000"));

        let costs = &result.employer_costs;
        assert_eq!(costs.imss, dec("2580.9"));
        assert_eq!(costs.sar, dec("300"));
        assert_eq!(costs.infonavit, dec("750"));
        assert_eq!(costs.payroll_tax, dec("600"));
        assert_eq!(round_currency(costs.aguinaldo), dec("616.44"));
        assert_eq!(round_currency(costs.vacation_premium), dec("123.29"));
        assert_eq!(costs.ptu, Decimal::ZERO);
        assert_eq!(costs.additional_benefits, Decimal::ZERO);
        assert_eq!(costs.total, dec("4970.626027397261"));

        let deductions = &result.employee_deductions;
        assert_eq!(deductions.isr, dec("1552.779837333333"));
        assert_eq!(deductions.imss, dec("416.25"));
        assert_eq!(deductions.sar, dec("168.75"));
        assert_eq!(result.net_salary, dec("12862.220162666667"));
        assert_eq!(result.total_company_cost, dec("19970.626027397261"));
    }

    #[test]
    fn test_reference_scenario_annual_figures() {
        let config = fixtures::tax_config();
        let result = calculate_payroll(&create_test_input(), &config).unwrap();

        let costs = &result.employer_costs_annual;
        assert_eq!(costs.imss, dec("30970.8"));
        assert_eq!(costs.payroll_tax, dec("7200"));
        assert_eq!(costs.aguinaldo, dec("7397.260273972605"));
        assert_eq!(costs.vacation_premium, dec("1479.452054794521"));
        assert_eq!(costs.total, dec("59647.512328767126"));

        let deductions = &result.employee_deductions_annual;
        assert_eq!(deductions.isr, dec("18633.358048"));
        assert_eq!(deductions.total, dec("25653.358048"));
        assert_eq!(result.net_salary_annual, dec("154346.641952"));
        assert_eq!(result.total_company_cost_annual, dec("239647.512328767126"));
    }

    #[test]
    fn test_result_metadata() {
        let config = fixtures::tax_config();
        let input = create_test_input();
        let result = calculate_payroll(&input, &config).unwrap();

        assert_eq!(result.input, input);
        assert_eq!(result.period, PayPeriod::Monthly);
        assert_eq!(result.config_version, "test");
        assert_eq!(result.engine_version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_each_result_gets_fresh_id() {
        let config = fixtures::tax_config();
        let input = create_test_input();
        let first = calculate_payroll(&input, &config).unwrap();
        let second = calculate_payroll(&input, &config).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.employer_costs, second.employer_costs);
    }

    #[test]
    fn test_invalid_input_rejected_before_calculation() {
        let config = fixtures::tax_config();
        let mut input = create_test_input();
        input.gross_salary = Decimal::ZERO;

        match calculate_payroll(&input, &config) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "gross_salary"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_jurisdiction_uses_default_rate() {
        let config = fixtures::tax_config();
        let mut input = create_test_input();
        input.jurisdiction = "ATLANTIS".to_string();

        let result = calculate_payroll(&input, &config).unwrap();
        assert_eq!(result.employer_costs_annual.payroll_tax, dec("3600"));
        assert_eq!(result.employer_costs.payroll_tax, dec("300"));
    }

    #[test]
    fn test_ptu_is_reprojected() {
        let config = fixtures::tax_config();
        let mut input = create_test_input();
        input.period = PayPeriod::BiWeekly;
        input.gross_salary = dec("7500");
        input.ptu_amount = Some(dec("250"));

        let result = calculate_payroll(&input, &config).unwrap();
        assert_eq!(result.employer_costs.ptu, dec("250"));
        assert_eq!(result.employer_costs_annual.ptu, dec("6000"));

        let breakdown = result.additional_benefits_breakdown.unwrap();
        assert_eq!(breakdown.ptu.period, dec("250"));
        assert_eq!(breakdown.ptu.annual, dec("6000"));
    }

    #[test]
    fn test_bi_weekly_matches_monthly_annual_figures() {
        let config = fixtures::tax_config();
        let monthly = calculate_payroll(&create_test_input(), &config).unwrap();

        let mut input = create_test_input();
        input.period = PayPeriod::BiWeekly;
        input.gross_salary = dec("7500");
        let bi_weekly = calculate_payroll(&input, &config).unwrap();

        assert_eq!(bi_weekly.gross_salary_annual, monthly.gross_salary_annual);
        assert_eq!(bi_weekly.employer_costs_annual, monthly.employer_costs_annual);
        assert_eq!(bi_weekly.employer_costs.payroll_tax, dec("300"));
    }

    /// PR-002: mandatory benefits always appear in the breakdown
    #[test]
    fn test_breakdown_always_has_mandatory_benefits() {
        let config = fixtures::tax_config();
        let result = calculate_payroll(&create_test_input(), &config).unwrap();
        let breakdown = result.additional_benefits_breakdown.unwrap();

        assert_eq!(breakdown.ptu, AmountPair::ZERO);
        assert_eq!(breakdown.aguinaldo.annual, dec("7397.260273972605"));
        assert_eq!(breakdown.aguinaldo.period, result.employer_costs.aguinaldo);
        assert_eq!(breakdown.vacation_premium.period, result.employer_costs.vacation_premium);
        assert!(breakdown.additional.is_empty());
    }

    #[test]
    fn test_additional_benefits_flow_into_costs() {
        let config = fixtures::tax_config();
        let mut input = create_test_input();
        input.additional_benefits = Some(AdditionalBenefits {
            performance_bonus: Some(dec("12000")),
            transportation: Some(dec("500")),
            other: vec![CustomBenefit {
                name: "Gym".to_string(),
                amount: dec("300"),
                is_annual: false,
            }],
            ..Default::default()
        });

        let result = calculate_payroll(&input, &config).unwrap();
        assert_eq!(result.employer_costs.additional_benefits, dec("1800"));
        assert_eq!(result.employer_costs_annual.additional_benefits, dec("21600"));

        let breakdown = result.additional_benefits_breakdown.unwrap();
        let transport = breakdown.line(&BenefitKind::Transportation).unwrap();
        assert_eq!(transport.annual, dec("6000"));
        assert!(breakdown.line(&BenefitKind::SigningBonus).is_none());
        assert_eq!(breakdown.additional.len(), 3);
    }

    #[test]
    fn test_tenure_increases_vacation_premium() {
        let config = fixtures::tax_config();
        let junior = calculate_payroll(&create_test_input(), &config).unwrap();

        let mut input = create_test_input();
        input.employee_tenure_years = dec("12");
        let senior = calculate_payroll(&input, &config).unwrap();

        assert!(senior.employer_costs.vacation_premium > junior.employer_costs.vacation_premium);
        assert_eq!(senior.employer_costs.aguinaldo, junior.employer_costs.aguinaldo);
    }

    #[test]
    fn test_sub_cent_salary_between_brackets_is_taxed() {
        let config = fixtures::tax_config();

        let mut low = create_test_input();
        low.gross_salary = dec("746.04");
        let low = calculate_payroll(&low, &config).unwrap();

        let mut mid = create_test_input();
        mid.gross_salary = dec("746.04125");
        let mid = calculate_payroll(&mid, &config).unwrap();

        assert_eq!(mid.gross_salary_annual, dec("8952.495"));
        assert!(mid.employee_deductions.isr > Decimal::ZERO);
        assert!(mid.employee_deductions.isr >= low.employee_deductions.isr);
    }

    fn arb_input() -> impl Strategy<Value = CalculationInput> {
        (
            1i64..500_000_000i64,
            prop_oneof![
                Just(PayPeriod::Weekly),
                Just(PayPeriod::BiWeekly),
                Just(PayPeriod::Monthly),
                Just(PayPeriod::Annual),
            ],
            prop_oneof![Just("CDMX"), Just("JAL"), Just("BC"), Just("XX")],
            0usize..5,
            0i64..4000,
            proptest::option::of(0i64..1_000_000i64),
            proptest::option::of(0i64..10_000_000i64),
        )
            .prop_map(
                |(cents, period, jurisdiction, class, tenure, ptu, bonus)| CalculationInput {
                    gross_salary: Decimal::new(cents, 2),
                    period,
                    jurisdiction: jurisdiction.to_string(),
                    risk_class: RiskClass::ALL[class],
                    ptu_amount: ptu.map(|c| Decimal::new(c, 2)),
                    employee_tenure_years: Decimal::new(tenure, 2),
                    additional_benefits: bonus.map(|c| AdditionalBenefits {
                        retention_bonus: Some(Decimal::new(c, 2)),
                        life_insurance: Some(Decimal::new(c / 12, 2)),
                        ..Default::default()
                    }),
                },
            )
    }

    proptest! {
        /// PR-003: totals, net pay, and company cost reconcile exactly
        #[test]
        fn prop_result_reconciles(input in arb_input()) {
            let config = fixtures::tax_config();
            let result = calculate_payroll(&input, &config).unwrap();

            prop_assert_eq!(result.employer_costs.total, result.employer_costs.sum_of_lines());
            prop_assert_eq!(result.employer_costs_annual.total, result.employer_costs_annual.sum_of_lines());
            prop_assert_eq!(result.employee_deductions.total, result.employee_deductions.sum_of_lines());
            prop_assert_eq!(
                result.employee_deductions_annual.total,
                result.employee_deductions_annual.sum_of_lines()
            );
            prop_assert_eq!(result.net_salary + result.employee_deductions.total, result.gross_salary);
            prop_assert_eq!(
                result.net_salary_annual + result.employee_deductions_annual.total,
                result.gross_salary_annual
            );
            prop_assert_eq!(result.total_company_cost, result.gross_salary + result.employer_costs.total);
            prop_assert_eq!(
                result.total_company_cost_annual,
                result.gross_salary_annual + result.employer_costs_annual.total
            );
            prop_assert_eq!(from_annual(result.gross_salary_annual, input.period), input.gross_salary);
        }
    }
}
