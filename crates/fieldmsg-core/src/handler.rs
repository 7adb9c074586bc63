//! Error handler entry points
//!
//! [`ErrorHandler::handle`] takes any error-like JSON value. Values that do not
//! carry the `"ValidationError"` name are handed back untouched; validation
//! failures are reduced to their first failing field and turned into a
//! [`ValidationFieldError`].

use crate::error::{Error, Result};
use crate::failure::{NormalizedFailure, RawFieldFailure, RawValidationError, VALIDATION_ERROR_NAME};
use crate::kind::FailureKind;
use crate::options::{HandlerOptions, ResolvedOptions};
use crate::resolver::{MessageResolver, MessageSource};
use crate::template::{BraceTemplate, TemplateRenderer};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use tracing::{debug, trace};

/// Name carried by every transformed error
pub const FIELD_ERROR_NAME: &str = "ValidationFieldError";

/// A single field's validation failure with its final message
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFieldError {
    pub path: String,
    pub kind: FailureKind,
    pub value: Option<Value>,
    pub message: String,
    /// Rule that produced `message`; not part of the serialized shape
    pub source: MessageSource,
}

impl ValidationFieldError {
    /// Always [`FIELD_ERROR_NAME`]
    pub fn name(&self) -> &'static str {
        FIELD_ERROR_NAME
    }

    /// Serialized `{name, path, kind, value, message}` shape
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl fmt::Display for ValidationFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationFieldError {}

impl Serialize for ValidationFieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationFieldError", 5)?;
        state.serialize_field("name", FIELD_ERROR_NAME)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}

/// Result of handling an arbitrary error value
#[derive(Debug, Clone, PartialEq)]
pub enum Handled {
    /// Not a validation failure; returned as given
    PassThrough(Value),
    /// A validation failure reduced to its first field
    Field(ValidationFieldError),
}

impl Handled {
    /// Back to the JSON error shape
    pub fn into_value(self) -> Result<Value> {
        match self {
            Handled::PassThrough(value) => Ok(value),
            Handled::Field(error) => error.to_value(),
        }
    }

    pub fn is_pass_through(&self) -> bool {
        matches!(self, Handled::PassThrough(_))
    }

    pub fn field_error(&self) -> Option<&ValidationFieldError> {
        match self {
            Handled::Field(error) => Some(error),
            Handled::PassThrough(_) => None,
        }
    }
}

/// Turns framework validation failures into [`ValidationFieldError`]s
#[derive(Debug, Clone)]
pub struct ErrorHandler<R = BraceTemplate> {
    options: ResolvedOptions,
    resolver: MessageResolver<R>,
}

impl ErrorHandler<BraceTemplate> {
    /// Handler with the shipped template renderer
    pub fn new(options: &HandlerOptions) -> Self {
        Self::with_renderer(options, BraceTemplate)
    }
}

impl Default for ErrorHandler<BraceTemplate> {
    fn default() -> Self {
        Self::new(&HandlerOptions::default())
    }
}

impl<R: TemplateRenderer> ErrorHandler<R> {
    /// Handler with a custom template renderer
    pub fn with_renderer(options: &HandlerOptions, renderer: R) -> Self {
        Self {
            options: options.resolve(),
            resolver: MessageResolver::with_renderer(renderer),
        }
    }

    /// The options in effect, defaults applied
    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    /// Transform a typed validation failure
    ///
    /// Only the first failing field is surfaced.
    pub fn transform(&self, error: &RawValidationError) -> Result<ValidationFieldError> {
        let (key, failure) = error.first_field().ok_or_else(|| {
            Error::invalid_input("errors", "validation error has no failing fields")
        })?;
        if error.errors.len() > 1 {
            trace!(
                surfaced = key,
                dropped = error.errors.len() - 1,
                "surfacing first failing field only"
            );
        }
        Ok(self.transform_field(key, failure))
    }

    /// Transform one failing field
    pub fn transform_field(&self, key: &str, failure: &RawFieldFailure) -> ValidationFieldError {
        let normalized = NormalizedFailure::from_raw(key, failure);
        let resolution = self.resolver.resolve(&normalized, &self.options);

        debug!(
            path = %normalized.path,
            kind = %normalized.kind,
            source = ?resolution.source,
            "transformed validation failure"
        );

        ValidationFieldError {
            path: normalized.path,
            kind: normalized.kind,
            value: normalized.value,
            message: resolution.message,
            source: resolution.source,
        }
    }

    /// Handle an arbitrary error value, keeping the typed result
    pub fn handle_error(&self, error: Value) -> Result<Handled> {
        if !is_validation_error(&error) {
            trace!("passing through non-validation error");
            return Ok(Handled::PassThrough(error));
        }

        let fields = match error.get("errors") {
            Some(Value::Object(fields)) => fields,
            Some(_) => {
                return Err(Error::invalid_input(
                    "errors",
                    "failing-fields mapping must be an object",
                ))
            }
            None => {
                return Err(Error::invalid_input(
                    "errors",
                    "validation error is missing its failing-fields mapping",
                ))
            }
        };

        let (key, record) = fields.iter().next().ok_or_else(|| {
            Error::invalid_input("errors", "validation error has no failing fields")
        })?;

        let failure: RawFieldFailure = serde_json::from_value(record.clone()).map_err(|e| {
            Error::invalid_input(format!("errors.{}", key), format!("malformed failed-field record: {}", e))
        })?;

        Ok(Handled::Field(self.transform_field(key, &failure)))
    }

    /// Handle an arbitrary error value
    ///
    /// Non-validation errors come back unchanged; validation failures come back
    /// as the serialized [`ValidationFieldError`] shape.
    pub fn handle(&self, error: Value) -> Result<Value> {
        self.handle_error(error)?.into_value()
    }
}

/// Whether a JSON error value carries the validation-failure marker
pub fn is_validation_error(error: &Value) -> bool {
    error.get("name").and_then(Value::as_str) == Some(VALIDATION_ERROR_NAME)
}

/// One-shot convenience around [`ErrorHandler::handle`]
pub fn handle(error: Value, options: &HandlerOptions) -> Result<Value> {
    ErrorHandler::new(options).handle(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::PathOverride;
    use serde_json::json;

    #[test]
    fn test_pass_through_non_validation_errors() {
        let handler = ErrorHandler::default();
        for error in [
            json!({}),
            json!({"name": "SomethingElse"}),
            json!({"name": "MongoServerError", "code": 11000, "keyValue": {"email": "a@b.c"}}),
            json!({"name": "ValidationFieldError", "path": "x", "kind": "required", "message": "x is required"}),
            json!("plain string"),
            json!(null),
        ] {
            let handled = handler.handle_error(error.clone()).unwrap();
            assert!(handled.is_pass_through());
            assert!(handled.field_error().is_none());
            assert_eq!(handler.handle(error.clone()).unwrap(), error);
        }
    }

    #[test]
    fn test_transform_scenario() {
        let output = handle(
            json!({
                "name": "ValidationError",
                "errors": {"age": {"kind": "max", "path": "age", "value": 100, "properties": {"max": 60}}}
            }),
            &HandlerOptions::default(),
        )
        .unwrap();

        assert_eq!(
            output,
            json!({
                "name": "ValidationFieldError",
                "path": "age",
                "kind": "number.max",
                "value": 100,
                "message": "age must be greater than or equal to 60"
            })
        );
    }

    #[test]
    fn test_missing_value_serializes_as_null() {
        let handled = ErrorHandler::default()
            .handle_error(json!({
                "name": "ValidationError",
                "errors": {"name": {"kind": "required", "path": "name"}}
            }))
            .unwrap();
        let error = handled.field_error().cloned().unwrap();
        assert_eq!(error.value, None);
        assert_eq!(error.to_string(), "name is required");
        assert_eq!(error.name(), FIELD_ERROR_NAME);

        let value = handled.into_value().unwrap();
        assert_eq!(value["value"], Value::Null);
        assert_eq!(value.as_object().map(|o| o.len()), Some(5));
    }

    #[test]
    fn test_invalid_input_errors() {
        let handler = ErrorHandler::default();

        let err = handler.handle(json!({"name": "ValidationError"})).unwrap_err();
        assert_eq!(err.field(), Some("errors"));

        let err = handler.handle(json!({"name": "ValidationError", "errors": {}})).unwrap_err();
        assert_eq!(err.field(), Some("errors"));

        let err = handler.handle(json!({"name": "ValidationError", "errors": []})).unwrap_err();
        assert_eq!(err.field(), Some("errors"));

        let err = handler
            .handle(json!({"name": "ValidationError", "errors": {"age": {"path": "age"}}}))
            .unwrap_err();
        assert_eq!(err.field(), Some("errors.age"));

        let err = handler.transform(&RawValidationError::new()).unwrap_err();
        assert_eq!(err.field(), Some("errors"));
    }

    #[test]
    fn test_only_first_field_surfaces() {
        let raw = RawValidationError::new()
            .with_field("email", RawFieldFailure::new("required").with_path("email"))
            .with_field("age", RawFieldFailure::new("Number").with_path("age").with_value(json!("x")));

        let error = ErrorHandler::default().transform(&raw).unwrap();
        assert_eq!(error.path, "email");
        assert_eq!(error.kind, FailureKind::Required);
    }

    #[test]
    fn test_handler_keeps_resolved_options() {
        let options = HandlerOptions::new()
            .with_message("string", "X")
            .with_path("name", PathOverride::original());
        let handler = ErrorHandler::new(&options);
        assert_eq!(handler.options().messages.get("string"), Some("X"));
        assert!(handler.options().path_override("name").is_some());
    }
}
