//! Error types for the fieldmsg core library
//!
//! The engine itself is total over well-formed input: non-validation errors
//! pass through and template placeholders that cannot be resolved stay
//! literal. The only failure mode is an input that claims to be a validation
//! failure but does not carry a usable failing-fields mapping.

use thiserror::Error;

/// Main error type for fieldmsg operations
#[derive(Error, Debug)]
pub enum Error {
    /// A validation-marked error is missing required structure
    #[error("Invalid input: {field} - {message}")]
    InvalidInput {
        field: String,
        message: String,
    },

    /// JSON serialization of a transformed error failed
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid input error for the named field
    pub fn invalid_input<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending input field, if this is an input error
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { field, .. } => Some(field),
            Self::Json { .. } => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err = Error::invalid_input("errors", "failing-fields mapping is empty");
        assert_eq!(
            err.to_string(),
            "Invalid input: errors - failing-fields mapping is empty"
        );
        assert_eq!(err.field(), Some("errors"));
    }

    #[test]
    fn test_json_error_conversion() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = source.into();
        assert!(matches!(err, Error::Json { .. }));
        assert!(err.field().is_none());
    }
}
