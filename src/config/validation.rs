//! Load-time validation of the tax tables.
//!
//! Structural problems are fatal and reported as `InvalidConfig`. Boundary
//! inconsistencies in the ISR table that still leave it usable are returned
//! as [`ConfigWarning`]s and logged.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculation::DEFAULT_VACATION_DAYS;
use crate::error::{EngineError, EngineResult};
use crate::models::RiskClass;

use super::types::{BenefitsConfig, ConfigWarning, IsrBracket, Jurisdiction, SocialSecurityConfig};

/// Expected distance between a bracket's upper limit and the next lower limit.
pub const BRACKET_STEP: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Largest accepted jump in tax across a bracket boundary.
///
/// Published tables round fixed amounts to cents, which leaves a few
/// cents of discontinuity at some boundaries.
pub const CONTINUITY_TOLERANCE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Warning code for a gap or jump between adjacent bracket limits.
pub const WARNING_NON_CONTIGUOUS: &str = "isr_non_contiguous";

/// Warning code for a fixed amount that does not continue the previous bracket.
pub const WARNING_DISCONTINUOUS: &str = "isr_discontinuous";

fn percentage_in_range(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE_HUNDRED
}

fn fraction_in_range(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}

/// Validates the ISR bracket list.
///
/// The list must start at zero, be ordered without overlaps, and end with a
/// single unbounded bracket so every non-negative salary has a bracket.
pub fn validate_isr(brackets: &[IsrBracket]) -> EngineResult<Vec<ConfigWarning>> {
    const SECTION: &str = "isr";

    let Some(first) = brackets.first() else {
        return Err(EngineError::invalid_config(
            SECTION,
            "tax brackets are required",
        ));
    };

    if !first.lower_limit.is_zero() {
        return Err(EngineError::invalid_config(
            SECTION,
            format!(
                "first bracket must start at 0, found {}",
                first.lower_limit
            ),
        ));
    }

    for (i, bracket) in brackets.iter().enumerate() {
        if bracket.lower_limit < Decimal::ZERO {
            return Err(EngineError::invalid_config(
                SECTION,
                format!("bracket {}: lower_limit must be >= 0", i),
            ));
        }
        if let Some(upper) = bracket.upper_limit {
            if upper <= bracket.lower_limit {
                return Err(EngineError::invalid_config(
                    SECTION,
                    format!("bracket {}: upper_limit must be > lower_limit", i),
                ));
            }
        } else if i + 1 != brackets.len() {
            return Err(EngineError::invalid_config(
                SECTION,
                format!("bracket {}: only the last bracket may be unbounded", i),
            ));
        }
        if !fraction_in_range(bracket.rate) {
            return Err(EngineError::invalid_config(
                SECTION,
                format!("bracket {}: rate must be between 0 and 1", i),
            ));
        }
        if bracket.fixed_amount < Decimal::ZERO {
            return Err(EngineError::invalid_config(
                SECTION,
                format!("bracket {}: fixed_amount must be >= 0", i),
            ));
        }
    }

    if brackets.last().is_some_and(|b| b.upper_limit.is_some()) {
        return Err(EngineError::invalid_config(
            SECTION,
            "last bracket must be unbounded (upper_limit: null)",
        ));
    }

    let mut warnings = Vec::new();

    for (i, pair) in brackets.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        // Every bracket but the last is bounded, checked above.
        let Some(upper) = current.upper_limit else {
            continue;
        };

        if next.lower_limit <= upper {
            return Err(EngineError::invalid_config(
                SECTION,
                format!(
                    "bracket {}: overlaps bracket {} ({} <= {})",
                    i + 1,
                    i,
                    next.lower_limit,
                    upper
                ),
            ));
        }

        if next.lower_limit != upper + BRACKET_STEP {
            let warning = ConfigWarning {
                code: WARNING_NON_CONTIGUOUS.to_string(),
                message: format!(
                    "bracket {}: upper_limit ({}) should connect to next bracket's lower_limit ({})",
                    i, upper, next.lower_limit
                ),
            };
            warn!(bracket = i, upper_limit = %upper, next_lower_limit = %next.lower_limit, "{}", warning.message);
            warnings.push(warning);
        }

        let carried = current.tax_at(next.lower_limit);
        if (carried - next.fixed_amount).abs() > CONTINUITY_TOLERANCE {
            let warning = ConfigWarning {
                code: WARNING_DISCONTINUOUS.to_string(),
                message: format!(
                    "bracket {}: fixed_amount ({}) does not continue bracket {} (expected about {})",
                    i + 1,
                    next.fixed_amount,
                    i,
                    carried
                ),
            };
            warn!(bracket = i + 1, fixed_amount = %next.fixed_amount, expected = %carried, "{}", warning.message);
            warnings.push(warning);
        }
    }

    Ok(warnings)
}

/// Validates IMSS, SAR, and INFONAVIT rates (percentage scale).
pub fn validate_social_security(config: &SocialSecurityConfig) -> EngineResult<()> {
    for risk_class in RiskClass::ALL {
        if !percentage_in_range(config.imss.risk_classes.rate(risk_class)) {
            return Err(EngineError::invalid_config(
                "imss",
                format!(
                    "risk class {} rate must be between 0 and 100",
                    risk_class
                ),
            ));
        }
    }

    let flat_rates = [
        ("imss", "employee_rate", config.imss.employee_rate),
        ("sar", "employer_rate", config.sar.employer_rate),
        ("sar", "employee_rate", config.sar.employee_rate),
        ("infonavit", "rate", config.infonavit.rate),
    ];
    for (section, field, rate) in flat_rates {
        if !percentage_in_range(rate) {
            return Err(EngineError::invalid_config(
                section,
                format!("{} must be between 0 and 100", field),
            ));
        }
    }

    Ok(())
}

/// Validates the mandatory-benefit settings and the tenure table.
pub fn validate_benefits(config: &BenefitsConfig) -> EngineResult<()> {
    const SECTION: &str = "benefits";

    if !fraction_in_range(config.vacation_premium_rate) {
        return Err(EngineError::invalid_config(
            SECTION,
            "vacation_premium_rate must be between 0 and 1",
        ));
    }

    if config.vacation_days_by_tenure.is_empty() {
        return Err(EngineError::invalid_config(
            SECTION,
            "vacation_days_by_tenure must be a non-empty list",
        ));
    }

    // Tenure below the first step earns the statutory minimum.
    if config.vacation_days_by_tenure[0].days < DEFAULT_VACATION_DAYS {
        return Err(EngineError::invalid_config(
            SECTION,
            format!(
                "vacation_days_by_tenure step 0 must grant at least {} days",
                DEFAULT_VACATION_DAYS
            ),
        ));
    }

    if config
        .vacation_days_by_tenure
        .iter()
        .any(|step| step.years < Decimal::ZERO)
    {
        return Err(EngineError::invalid_config(
            SECTION,
            "vacation_days_by_tenure years must be >= 0",
        ));
    }

    for (i, pair) in config.vacation_days_by_tenure.windows(2).enumerate() {
        if pair[1].years <= pair[0].years {
            return Err(EngineError::invalid_config(
                SECTION,
                format!(
                    "vacation_days_by_tenure step {} must have more years than step {}",
                    i + 1,
                    i
                ),
            ));
        }
        if pair[1].days < pair[0].days {
            return Err(EngineError::invalid_config(
                SECTION,
                format!(
                    "vacation_days_by_tenure step {} grants fewer days than step {}",
                    i + 1,
                    i
                ),
            ));
        }
    }

    Ok(())
}

/// Validates the jurisdiction table.
pub fn validate_jurisdictions(jurisdictions: &[Jurisdiction]) -> EngineResult<()> {
    const SECTION: &str = "jurisdictions";

    if jurisdictions.is_empty() {
        return Err(EngineError::invalid_config(
            SECTION,
            "jurisdiction table is required",
        ));
    }

    let mut seen = HashSet::new();
    for jurisdiction in jurisdictions {
        if jurisdiction.code.trim().is_empty() || jurisdiction.name.trim().is_empty() {
            return Err(EngineError::invalid_config(
                SECTION,
                "each jurisdiction must have a code and name",
            ));
        }
        if !seen.insert(jurisdiction.code.as_str()) {
            return Err(EngineError::invalid_config(
                SECTION,
                format!("duplicate jurisdiction code {}", jurisdiction.code),
            ));
        }
        if !percentage_in_range(jurisdiction.payroll_tax_rate) {
            return Err(EngineError::invalid_config(
                SECTION,
                format!(
                    "jurisdiction {}: payroll_tax_rate must be between 0 and 100",
                    jurisdiction.code
                ),
            ));
        }
    }

    Ok(())
}
