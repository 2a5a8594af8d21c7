//! Typed error handling for the validable crate
//!
//! Two classes of failure are kept strictly apart:
//!
//! - [`Violations`]: the expected, recoverable outcome of checking data.
//!   Always returned as a value from the `validate*` operations, never as
//!   an `Err`.
//! - [`UsageError`] and [`TableError`]: programmer errors, such as a
//!   filter called on a non-object or a constraint document that does
//!   not compile. These are returned as `Err` and should abort the call
//!   site.
//!
//! [`ValidableError`] is the umbrella type for callers that bubble both
//! classes with `?`.

use thiserror::Error;

use crate::core::violations::Violations;

/// Misuse of the crate's API by the caller.
///
/// These signal programmer error, not invalid data: the call itself was
/// malformed. They are never folded into a [`Violations`] mapping.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// The filter target was null or otherwise not a JSON object.
    #[error("cannot filter a non-object value (got {got})")]
    NonObjectTarget {
        /// JSON type name of the rejected target.
        got: &'static str,
    },

    /// The reference set was not an enumerable collection of field names.
    #[error("invalid reference set: {reason}")]
    InvalidReferenceSet {
        /// What was wrong with the set.
        reason: String,
    },

    /// An untyped violation map was not a JSON object.
    #[error("malformed violation map: expected an object, got {got}")]
    MalformedViolations {
        /// JSON type name of the rejected value.
        got: &'static str,
    },

    /// A field of an untyped violation map held something other than a
    /// list of message strings.
    #[error("malformed violation map: field '{field}' does not hold a list of messages")]
    MalformedMessageList {
        /// The offending field name.
        field: String,
    },
}

/// Errors raised while loading or verifying a constraint table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The document file could not be read.
    #[error("cannot read constraint document '{path}': {source}")]
    Io {
        /// Path of the document that failed to load.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The document could not be parsed as YAML.
    #[error("invalid YAML in constraint document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document could not be parsed as JSON, or did not match the
    /// expected `fields:` mapping shape.
    #[error("invalid constraint document: {0}")]
    Json(#[from] serde_json::Error),

    /// A field's schema fragment was rejected by the constraint engine.
    #[error("invalid schema for field '{field}': {reason}")]
    InvalidSchema {
        /// The field whose schema failed to compile.
        field: String,
        /// Reason reported by the engine.
        reason: String,
    },
}

/// The main error type for the validable crate.
///
/// [`Invalid`](ValidableError::Invalid) carries a [`Violations`] mapping,
/// inspectable data and the recoverable case. The other variants wrap the
/// misuse class.
#[derive(Debug, Error)]
pub enum ValidableError {
    /// Data failed validation; the field violations are inspectable.
    #[error("validation failed:\n{0}")]
    Invalid(Violations),

    /// The caller violated an API precondition.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// A constraint table could not be loaded or verified.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl ValidableError {
    /// Returns the violations when this is a validation failure.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            ValidableError::Invalid(v) => Some(v),
            _ => None,
        }
    }

    /// True when this is the recoverable, data-level failure class.
    pub fn is_invalid(&self) -> bool {
        matches!(self, ValidableError::Invalid(_))
    }
}

impl From<Violations> for ValidableError {
    fn from(violations: Violations) -> Self {
        ValidableError::Invalid(violations)
    }
}

/// A specialized Result type for validable operations
pub type ValidableResult<T> = Result<T, ValidableError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_display() {
        let err = UsageError::NonObjectTarget { got: "null" };
        assert!(err.to_string().contains("non-object"));
        assert!(err.to_string().contains("null"));
    }

    #[test]
    fn test_reference_set_error_display() {
        let err = UsageError::InvalidReferenceSet {
            reason: "expected an array of field names".to_string(),
        };
        assert!(err.to_string().contains("reference set"));
    }

    #[test]
    fn test_table_error_display() {
        let err = TableError::InvalidSchema {
            field: "email".to_string(),
            reason: "not a valid schema".to_string(),
        };
        assert!(err.to_string().contains("email"));
        assert!(err.to_string().contains("not a valid schema"));
    }

    #[test]
    fn test_validable_error_classification() {
        let mut violations = Violations::new();
        violations.add("name", "Field 'name' is required");
        let err: ValidableError = violations.into();
        assert!(err.is_invalid());
        assert!(err.violations().is_some());

        let err: ValidableError = UsageError::NonObjectTarget { got: "number" }.into();
        assert!(!err.is_invalid());
        assert!(err.violations().is_none());
    }

    #[test]
    fn test_invalid_error_display_includes_field() {
        let mut violations = Violations::new();
        violations.add("email", "Field 'email' is required");
        let err = ValidableError::Invalid(violations);
        let display = err.to_string();
        assert!(display.contains("validation failed"));
        assert!(display.contains("email"));
    }
}
