//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax tables
//! from YAML files.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};

use super::types::{
    BenefitsConfig, ConfigMetadata, ConfigWarning, IsrConfig, Jurisdiction, JurisdictionsConfig,
    SocialSecurityConfig, TaxConfig,
};

/// Loads and provides access to the tax configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates them once, and hands out the resulting read-only
/// [`TaxConfig`].
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/mx2024/
/// ├── metadata.yaml         # Table name and tax-year version
/// ├── isr.yaml              # Progressive income tax brackets
/// ├── social_security.yaml  # IMSS, SAR and INFONAVIT rates
/// ├── benefits.yaml         # Aguinaldo, vacation premium, tenure table
/// └── jurisdictions.yaml    # State payroll tax rates
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/mx2024").unwrap();
/// println!("Loaded tables: {}", loader.metadata().version);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TaxConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/mx2024")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML or is missing a required field
    /// - The tables fail validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ConfigMetadata>(&path.join("metadata.yaml"))?;
        let isr = Self::load_yaml::<IsrConfig>(&path.join("isr.yaml"))?;
        let social_security =
            Self::load_yaml::<SocialSecurityConfig>(&path.join("social_security.yaml"))?;
        let benefits = Self::load_yaml::<BenefitsConfig>(&path.join("benefits.yaml"))?;
        let jurisdictions =
            Self::load_yaml::<JurisdictionsConfig>(&path.join("jurisdictions.yaml"))?;

        let config = TaxConfig::new(
            metadata,
            isr,
            social_security,
            benefits,
            jurisdictions.jurisdictions,
        )?;

        info!(
            path = %path.display(),
            version = %config.metadata().version,
            brackets = config.isr_brackets().len(),
            jurisdictions = config.jurisdictions().len(),
            warnings = config.warnings().len(),
            "Loaded tax configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already validated configuration.
    pub fn from_config(config: TaxConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            warn!(path = %path_str, error = %e, "Configuration parse error");
            EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            }
        })
    }

    /// Returns the underlying tax configuration.
    pub fn config(&self) -> &TaxConfig {
        &self.config
    }

    /// Returns the table metadata.
    pub fn metadata(&self) -> &ConfigMetadata {
        self.config.metadata()
    }

    /// Returns all configured jurisdictions.
    pub fn jurisdictions(&self) -> &[Jurisdiction] {
        self.config.jurisdictions()
    }

    /// Returns the non-fatal findings from validation.
    pub fn warnings(&self) -> &[ConfigWarning] {
        self.config.warnings()
    }
}
