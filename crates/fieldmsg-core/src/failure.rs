//! Raw and normalized failure records
//!
//! [`RawValidationError`] and [`RawFieldFailure`] mirror what the validation
//! framework emits. [`NormalizedFailure`] is the engine's own view of a single
//! failing field after kind normalization and metadata filtering.

use crate::kind::{normalize_kind, BoundType, FailureKind, Parameters};
use crate::template::display_value;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name the framework gives to multi-field validation failures
pub const VALIDATION_ERROR_NAME: &str = "ValidationError";

/// One failed field as reported by the validation framework
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFieldFailure {
    /// Internal failure label, e.g. `"required"`, `"ObjectID"`, `"user defined"`
    pub kind: String,
    /// Field path; the key in the failing-fields mapping is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Offending value; absent when the field was missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Framework-supplied message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Framework-supplied string rendering of `value`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    /// Validator metadata (bounds, enum values, validator references, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
    /// Explicit bound category for `max`/`min` failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_type: Option<BoundType>,
}

impl RawFieldFailure {
    pub fn new<K: Into<String>>(kind: K) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_path<P: Into<String>>(mut self, path: P) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_message<M: Into<String>>(mut self, message: M) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_string_value<S: Into<String>>(mut self, string_value: S) -> Self {
        self.string_value = Some(string_value.into());
        self
    }

    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_bound_type(mut self, bound_type: BoundType) -> Self {
        self.bound_type = Some(bound_type);
        self
    }
}

/// Multi-field validation failure as produced by the framework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawValidationError {
    /// Error name; [`VALIDATION_ERROR_NAME`] for validation failures
    pub name: String,
    /// Summary message, e.g. `"person validation failed: name: ..."`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Failing fields in declaration order
    #[serde(with = "ordered_fields")]
    pub errors: Vec<(String, RawFieldFailure)>,
}

impl RawValidationError {
    pub fn new() -> Self {
        Self {
            name: VALIDATION_ERROR_NAME.to_string(),
            message: None,
            errors: Vec::new(),
        }
    }

    /// Append a failing field
    pub fn with_field<P: Into<String>>(mut self, path: P, failure: RawFieldFailure) -> Self {
        self.errors.push((path.into(), failure));
        self
    }

    /// Whether this carries the validation-failure marker
    pub fn is_validation_error(&self) -> bool {
        self.name == VALIDATION_ERROR_NAME
    }

    /// The first failing field; the only one ever surfaced
    pub fn first_field(&self) -> Option<(&str, &RawFieldFailure)> {
        self.errors
            .first()
            .map(|(path, failure)| (path.as_str(), failure))
    }
}

impl Default for RawValidationError {
    fn default() -> Self {
        Self::new()
    }
}

/// A single failing field after normalization
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedFailure {
    pub path: String,
    pub kind: FailureKind,
    pub value: Option<Value>,
    /// Framework-supplied rendering of `value`, or [`display_value`] of it
    /// when the framework gave none. Fills the `{value}` placeholder.
    pub string_value: Option<String>,
    pub original_message: Option<String>,
    pub parameters: Parameters,
}

impl NormalizedFailure {
    /// Normalize one raw failing field
    ///
    /// `key` is the entry's key in the failing-fields mapping and is used when
    /// the record does not name its own path.
    pub fn from_raw(key: &str, raw: &RawFieldFailure) -> Self {
        let (kind, parameters) = normalize_kind(&raw.kind, raw.properties.as_ref(), raw.bound_type);

        let path = raw
            .path
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(key)
            .to_string();

        let string_value = raw
            .string_value
            .clone()
            .or_else(|| raw.value.as_ref().map(display_value));

        Self {
            path,
            kind,
            value: raw.value.clone(),
            string_value,
            original_message: raw.message.clone(),
            parameters,
        }
    }

    /// Template parameters: `path`, `value`, then every metadata parameter
    ///
    /// Metadata is merged last so a parameter of the same name replaces the
    /// `path`/`value` entries.
    pub fn substitutions(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("path".to_string(), Value::String(self.path.clone()));
        params.insert(
            "value".to_string(),
            Value::String(self.string_value.clone().unwrap_or_default()),
        );
        for (key, value) in &self.parameters {
            params.insert(key.clone(), value.clone());
        }
        params
    }
}

/// Serde adapter keeping the failing-fields mapping in document order
mod ordered_fields {
    use super::RawFieldFailure;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(fields: &[(String, RawFieldFailure)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (path, failure) in fields {
            map.serialize_entry(path, failure)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, RawFieldFailure)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = Vec<(String, RawFieldFailure)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field paths to failed-field records")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((path, failure)) = access.next_entry::<String, RawFieldFailure>()? {
                    fields.push((path, failure));
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}
