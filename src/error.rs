//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading tax tables,
//! validating input, or managing calculation history.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/isr.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/isr.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but violates a table invariant.
    #[error("Invalid configuration in '{section}': {message}")]
    InvalidConfig {
        /// The configuration section at fault (e.g. "isr", "jurisdictions").
        section: String,
        /// A description of the violated invariant.
        message: String,
    },

    /// A calculation input was rejected at the boundary.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No stored calculation has the requested id.
    #[error("Calculation not found: {id}")]
    CalculationNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The history file could not be read or written.
    #[error("History storage error at '{path}': {message}")]
    HistoryStorage {
        /// The history file path.
        path: String,
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    pub(crate) fn invalid_config(section: &str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            section: section.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_section_and_message() {
        let error = EngineError::invalid_config("isr", "tax brackets are required");
        assert_eq!(
            error.to_string(),
            "Invalid configuration in 'isr': tax brackets are required"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::invalid_input("gross_salary", "must be greater than 0");
        assert_eq!(
            error.to_string(),
            "Invalid input field 'gross_salary': must be greater than 0"
        );
    }

    #[test]
    fn test_calculation_not_found_displays_id() {
        let error = EngineError::CalculationNotFound {
            id: "abc".to_string(),
        };
        assert_eq!(error.to_string(), "Calculation not found: abc");
    }

    #[test]
    fn test_history_storage_displays_path_and_message() {
        let error = EngineError::HistoryStorage {
            path: "/tmp/history.json".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "History storage error at '/tmp/history.json': permission denied"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_input() -> EngineResult<()> {
            Err(EngineError::invalid_input("employee_tenure_years", "cannot be negative"))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_input()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
