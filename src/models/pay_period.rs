//! Pay period model.
//!
//! This module defines the [`PayPeriod`] cadence used to frame salaries,
//! costs, and deductions.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The payroll cadence a salary is expressed in.
///
/// Bi-weekly follows the Mexican *quincena* convention of two pay runs per
/// month (24 per year), not one run every two weeks.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use rust_decimal::Decimal;
///
/// assert_eq!(PayPeriod::BiWeekly.periods_per_year(), Decimal::from(24));
/// assert_eq!(PayPeriod::Monthly.display_name(), "Mensual");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayPeriod {
    /// 52 pay runs per year.
    #[serde(rename = "weekly")]
    Weekly,
    /// 24 pay runs per year (quincenal).
    #[serde(rename = "bi-weekly", alias = "bi_weekly")]
    BiWeekly,
    /// 12 pay runs per year.
    #[serde(rename = "monthly")]
    Monthly,
    /// A single annual figure.
    #[serde(rename = "annual")]
    Annual,
}

impl PayPeriod {
    /// All periods, shortest first.
    pub const ALL: [PayPeriod; 4] = [
        PayPeriod::Weekly,
        PayPeriod::BiWeekly,
        PayPeriod::Monthly,
        PayPeriod::Annual,
    ];

    /// Returns the number of pay runs in a year for this period.
    pub fn periods_per_year(self) -> Decimal {
        match self {
            PayPeriod::Weekly => Decimal::from(52),
            PayPeriod::BiWeekly => Decimal::from(24),
            PayPeriod::Monthly => Decimal::from(12),
            PayPeriod::Annual => Decimal::ONE,
        }
    }

    /// Returns the wire identifier (`"bi-weekly"`, `"monthly"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            PayPeriod::Weekly => "weekly",
            PayPeriod::BiWeekly => "bi-weekly",
            PayPeriod::Monthly => "monthly",
            PayPeriod::Annual => "annual",
        }
    }

    /// Returns the Spanish label shown to payroll users.
    pub fn display_name(self) -> &'static str {
        match self {
            PayPeriod::Weekly => "Semanal",
            PayPeriod::BiWeekly => "Quincenal",
            PayPeriod::Monthly => "Mensual",
            PayPeriod::Annual => "Anual",
        }
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
