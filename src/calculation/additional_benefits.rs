//! Additional-benefits aggregation.
//!
//! The sparse [`AdditionalBenefits`] bag is flattened into tagged entries
//! and each one is normalized to a period amount and an annual amount in a
//! single pass.

use rust_decimal::Decimal;

use crate::models::{AdditionalBenefits, BreakdownLine, Denomination, PayPeriod};

use super::period::{from_annual, to_annual};

/// Normalized totals and itemized lines for the optional benefits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedBenefits {
    /// Sum of every entry, per pay run.
    pub period_total: Decimal,
    /// Sum of every entry, per year.
    pub annual_total: Decimal,
    /// One line per entry with a positive amount, in input order.
    pub lines: Vec<BreakdownLine>,
}

/// Aggregates optional benefits for a calculation in `period`.
///
/// Annual-denominated entries keep their amount as the annual figure and are
/// divided down for the period figure. Period-denominated entries do the
/// reverse. Entries whose amount is zero contribute nothing and are left out
/// of `lines`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::aggregate_additional_benefits;
/// use payroll_engine::models::{AdditionalBenefits, PayPeriod};
/// use rust_decimal::Decimal;
///
/// let benefits = AdditionalBenefits {
///     performance_bonus: Some(Decimal::from(12000)),
///     meal_vouchers: Some(Decimal::from(1000)),
///     ..Default::default()
/// };
/// let aggregated = aggregate_additional_benefits(Some(&benefits), PayPeriod::Monthly);
/// assert_eq!(aggregated.annual_total, Decimal::from(24000));
/// assert_eq!(aggregated.period_total, Decimal::from(2000));
/// ```
pub fn aggregate_additional_benefits(
    benefits: Option<&AdditionalBenefits>,
    period: PayPeriod,
) -> AggregatedBenefits {
    let Some(benefits) = benefits else {
        return AggregatedBenefits::default();
    };

    let mut aggregated = AggregatedBenefits::default();

    for entry in benefits.entries() {
        let (period_amount, annual_amount) = match entry.denomination {
            Denomination::Annual => (from_annual(entry.amount, period), entry.amount),
            Denomination::Period => (entry.amount, to_annual(entry.amount, period)),
        };

        aggregated.period_total += period_amount;
        aggregated.annual_total += annual_amount;

        if entry.amount > Decimal::ZERO {
            aggregated.lines.push(BreakdownLine {
                kind: entry.kind,
                period: period_amount,
                annual: annual_amount,
            });
        }
    }

    aggregated
}
