//! # Error Types
//!
//! Input validation failures and enum parse failures. Both are cheap,
//! caller-facing errors: they never wrap I/O or upstream detail.

use thiserror::Error;

/// A compliance check request is missing something it cannot run without.
///
/// The HTTP layer maps every variant to the same fixed 400 body; the
/// variant and field name only reach the logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was absent.
    #[error("missing required field: {field}")]
    MissingField {
        /// Wire name of the missing field.
        field: &'static str,
    },

    /// A required field was present but empty or whitespace-only.
    #[error("field must not be empty: {field}")]
    EmptyField {
        /// Wire name of the empty field.
        field: &'static str,
    },
}

/// Strict text parsing of a domain enum failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} {value:?}; expected one of: {expected}")]
pub struct ParseEnumError {
    /// Which enum was being parsed (e.g. "industry").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
    /// Comma-separated accepted values.
    pub expected: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_the_field() {
        let err = ValidationError::MissingField { field: "industry" };
        assert_eq!(err.to_string(), "missing required field: industry");

        let err = ValidationError::EmptyField { field: "text" };
        assert!(err.to_string().contains("text"));
    }

    #[test]
    fn parse_error_lists_expected_values() {
        let err = ParseEnumError {
            kind: "risk level",
            value: "severe".into(),
            expected: "low, medium, high",
        };
        let msg = err.to_string();
        assert!(msg.contains("\"severe\""));
        assert!(msg.contains("low, medium, high"));
    }
}
