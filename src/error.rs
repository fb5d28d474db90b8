//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payroll computation and
//! leave-ledger operations.
//!
//! Two outcomes that look like errors are deliberately *not* represented
//! here: an insufficient leave balance (`LeaveLedger::deduct` returns
//! `Ok(false)`) and a partial batch failure (recorded in the batch report's
//! `errors` list). Both are expected, recoverable business outcomes.

use rust_decimal::Decimal;
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
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
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

    /// A pay rule definition was malformed.
    #[error("Invalid pay rule '{rule}': {message}")]
    InvalidRule {
        /// The name of the invalid rule.
        rule: String,
        /// A description of what made the rule invalid.
        message: String,
    },

    /// A pay code definition was malformed.
    #[error("Invalid pay code '{code}': {message}")]
    InvalidPayCode {
        /// The pay code that was invalid.
        code: String,
        /// A description of what made the code invalid.
        message: String,
    },

    /// A time entry was invalid or an operation on it violated its lifecycle.
    #[error("Invalid time entry '{entry_id}': {message}")]
    InvalidTimeEntry {
        /// The ID of the invalid entry.
        entry_id: String,
        /// A description of what made the entry invalid.
        message: String,
    },

    /// A ledger operation was called with negative hours.
    #[error("Invalid hours for {operation}: {hours} (must be non-negative)")]
    InvalidHours {
        /// The ledger operation that was attempted.
        operation: String,
        /// The offending hours value.
        hours: Decimal,
    },

    /// A pay code was referenced that does not exist in the catalog.
    #[error("Unknown pay code: {code}")]
    UnknownPayCode {
        /// The pay code that was not found.
        code: String,
    },

    /// A leave type was referenced that does not exist.
    #[error("Unknown leave type: {id}")]
    UnknownLeaveType {
        /// The leave type ID that was not found.
        id: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

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
    fn test_invalid_rule_displays_name_and_message() {
        let error = EngineError::InvalidRule {
            rule: "weekend_loading".to_string(),
            message: "multiplier must be non-negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid pay rule 'weekend_loading': multiplier must be non-negative"
        );
    }

    #[test]
    fn test_invalid_pay_code_displays_code_and_message() {
        let error = EngineError::InvalidPayCode {
            code: "SICK_PAY".to_string(),
            message: "deducts_from_balance requires a linked leave type".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid pay code 'SICK_PAY': deducts_from_balance requires a linked leave type"
        );
    }

    #[test]
    fn test_invalid_time_entry_displays_id_and_message() {
        let error = EngineError::InvalidTimeEntry {
            entry_id: "entry_001".to_string(),
            message: "clock-out before clock-in".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid time entry 'entry_001': clock-out before clock-in"
        );
    }

    #[test]
    fn test_invalid_hours_displays_operation_and_value() {
        let error = EngineError::InvalidHours {
            operation: "deduct".to_string(),
            hours: Decimal::new(-25, 1),
        };
        assert_eq!(
            error.to_string(),
            "Invalid hours for deduct: -2.5 (must be non-negative)"
        );
    }

    #[test]
    fn test_unknown_pay_code_displays_code() {
        let error = EngineError::UnknownPayCode {
            code: "NOPE".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown pay code: NOPE");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_unknown_leave_type() -> EngineResult<()> {
            Err(EngineError::UnknownLeaveType {
                id: "annual".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_unknown_leave_type()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
