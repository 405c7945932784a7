//! Tagged benefit entries.
//!
//! The sparse [`AdditionalBenefits`](super::AdditionalBenefits) bag is
//! flattened into a list of [`BenefitEntry`] values so the aggregator can
//! treat every contribution the same way.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The basis an amount is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Denomination {
    /// The amount is a yearly figure.
    Annual,
    /// The amount is per pay run of the calculation's period.
    Period,
}

/// Identifies a single additional-benefit contribution.
///
/// Named variants are the well-known slots; [`BenefitKind::Other`] carries
/// the caller-supplied name of a custom bonus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitKind {
    /// Yearly performance bonus.
    PerformanceBonus,
    /// One-time signing bonus, annualized for display.
    SigningBonus,
    /// Yearly retention bonus.
    RetentionBonus,
    /// Meal vouchers paid each pay run.
    MealVouchers,
    /// Transportation allowance paid each pay run.
    Transportation,
    /// Employer health insurance contribution per pay run.
    HealthInsurance,
    /// Employer life insurance contribution per pay run.
    LifeInsurance,
    /// A custom bonus identified by name.
    Other(String),
}

impl BenefitKind {
    /// The basis a named slot is quoted in.
    ///
    /// Custom bonuses carry their own flag, so this returns `None` for them.
    pub fn default_denomination(&self) -> Option<Denomination> {
        match self {
            BenefitKind::PerformanceBonus
            | BenefitKind::SigningBonus
            | BenefitKind::RetentionBonus => Some(Denomination::Annual),
            BenefitKind::MealVouchers
            | BenefitKind::Transportation
            | BenefitKind::HealthInsurance
            | BenefitKind::LifeInsurance => Some(Denomination::Period),
            BenefitKind::Other(_) => None,
        }
    }
}

/// One contribution from the additional-benefits bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitEntry {
    /// Which benefit this is.
    pub kind: BenefitKind,
    /// The amount as supplied by the caller.
    pub amount: Decimal,
    /// The basis `amount` is quoted in.
    pub denomination: Denomination,
}
