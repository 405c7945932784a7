//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load the tax tables from YAML
//! files: ISR brackets, social-security rates, mandatory-benefit settings,
//! and jurisdiction payroll tax rates. Tables are validated once at load
//! time and read-only afterwards.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/mx2024").unwrap();
//! println!("Loaded tables: {}", config.metadata().name);
//! ```

mod loader;
mod types;
mod validation;

pub use loader::ConfigLoader;
pub use types::{
    BenefitsConfig, ConfigMetadata, ConfigWarning, ImssConfig, InfonavitConfig, IsrBracket,
    IsrConfig, Jurisdiction, JurisdictionsConfig, RiskClassRates, SarConfig,
    SocialSecurityConfig, TaxConfig, VacationStep,
};
pub use validation::{
    BRACKET_STEP, CONTINUITY_TOLERANCE, WARNING_DISCONTINUOUS, WARNING_NON_CONTIGUOUS,
};
