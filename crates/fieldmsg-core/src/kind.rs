//! Failure kind taxonomy and the kind normalizer
//!
//! The validation framework reports failures with internal labels that are
//! neither stable nor uniformly cased (`"ObjectID"`, `"user defined"`,
//! `"String"`, ...). This module maps them onto a closed, lowercase-initial
//! public taxonomy and strips framework-internal noise out of the failure
//! metadata.
//!
//! Copyright (c) 2025 Fieldmsg Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::trace;

/// Internal label the framework uses for object-reference cast failures
pub const OBJECT_ID_CAST_LABEL: &str = "ObjectID";

/// Internal label the framework uses for custom predicate failures
pub const CUSTOM_PREDICATE_LABEL: &str = "user defined";

/// Metadata keys that duplicate known fields or hold non-serializable content
pub const STRIPPED_METADATA_KEYS: [&str; 5] = ["validator", "message", "type", "path", "value"];

/// Metadata parameters attached to a normalized failure, in declaration order
pub type Parameters = Map<String, Value>;

/// Public failure kind taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FailureKind {
    Base,
    Required,
    Enum,
    Validate,
    Unique,
    String,
    MaxLength,
    MinLength,
    Regexp,
    Number,
    NumberMax,
    NumberMin,
    Date,
    DateMax,
    DateMin,
    Buffer,
    Boolean,
    ObjectId,
    Map,
    /// A label outside the known taxonomy, kept as reported (first char lowercased)
    Other(String),
}

impl FailureKind {
    /// Every kind of the closed taxonomy, in catalog order
    pub const ALL: [FailureKind; 19] = [
        FailureKind::Base,
        FailureKind::Required,
        FailureKind::Enum,
        FailureKind::Validate,
        FailureKind::Unique,
        FailureKind::String,
        FailureKind::MaxLength,
        FailureKind::MinLength,
        FailureKind::Regexp,
        FailureKind::Number,
        FailureKind::NumberMax,
        FailureKind::NumberMin,
        FailureKind::Date,
        FailureKind::DateMax,
        FailureKind::DateMin,
        FailureKind::Buffer,
        FailureKind::Boolean,
        FailureKind::ObjectId,
        FailureKind::Map,
    ];

    /// Public label of this kind
    pub fn as_str(&self) -> &str {
        match self {
            FailureKind::Base => "base",
            FailureKind::Required => "required",
            FailureKind::Enum => "enum",
            FailureKind::Validate => "validate",
            FailureKind::Unique => "unique",
            FailureKind::String => "string",
            FailureKind::MaxLength => "maxlength",
            FailureKind::MinLength => "minlength",
            FailureKind::Regexp => "regexp",
            FailureKind::Number => "number",
            FailureKind::NumberMax => "number.max",
            FailureKind::NumberMin => "number.min",
            FailureKind::Date => "date",
            FailureKind::DateMax => "date.max",
            FailureKind::DateMin => "date.min",
            FailureKind::Buffer => "buffer",
            FailureKind::Boolean => "boolean",
            FailureKind::ObjectId => "objectId",
            FailureKind::Map => "map",
            FailureKind::Other(label) => label,
        }
    }

    /// Parse a public label; unknown labels become [`FailureKind::Other`]
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .iter()
            .find(|kind| kind.as_str() == label)
            .cloned()
            .unwrap_or_else(|| FailureKind::Other(label.to_string()))
    }

    /// Whether this kind belongs to the closed taxonomy
    pub fn is_known(&self) -> bool {
        !matches!(self, FailureKind::Other(_))
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FailureKind {
    fn from(label: String) -> Self {
        FailureKind::from_label(&label)
    }
}

impl From<&str> for FailureKind {
    fn from(label: &str) -> Self {
        FailureKind::from_label(label)
    }
}

impl From<FailureKind> for String {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// Category of the bound carried by a `max`/`min` failure
///
/// The framework reports numeric-range and date-range violations under the
/// same `max`/`min` labels. Adapters that know which one they produced should
/// say so; otherwise the normalizer falls back to the JSON type of the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundType {
    Number,
    Date,
}

impl BoundType {
    /// Infer the bound category from the bound value itself
    pub fn infer(bound: Option<&Value>) -> Self {
        match bound {
            Some(Value::Number(_)) => BoundType::Number,
            _ => BoundType::Date,
        }
    }
}

/// Map an internal failure label and its metadata onto the public taxonomy
///
/// Returns the public kind together with the metadata left after removing
/// [`STRIPPED_METADATA_KEYS`]. Without metadata the parameters are empty and
/// `max`/`min` stay unrefined.
pub fn normalize_kind(
    internal_kind: &str,
    metadata: Option<&Map<String, Value>>,
    bound_type: Option<BoundType>,
) -> (FailureKind, Parameters) {
    let label = match internal_kind {
        OBJECT_ID_CAST_LABEL => FailureKind::ObjectId.as_str().to_string(),
        CUSTOM_PREDICATE_LABEL => FailureKind::Validate.as_str().to_string(),
        other => lower_first(other),
    };

    let Some(metadata) = metadata else {
        trace!(internal_kind, kind = %label, "normalized kind without metadata");
        return (FailureKind::from_label(&label), Parameters::new());
    };

    let parameters = filter_metadata(metadata);

    let kind = match label.as_str() {
        "max" => match bound_type.unwrap_or_else(|| BoundType::infer(parameters.get("max"))) {
            BoundType::Number => FailureKind::NumberMax,
            BoundType::Date => FailureKind::DateMax,
        },
        "min" => match bound_type.unwrap_or_else(|| BoundType::infer(parameters.get("min"))) {
            BoundType::Number => FailureKind::NumberMin,
            BoundType::Date => FailureKind::DateMin,
        },
        _ => FailureKind::from_label(&label),
    };

    trace!(internal_kind, kind = %kind, parameters = parameters.len(), "normalized kind");
    (kind, parameters)
}

/// Drop framework-internal keys from failure metadata
pub fn filter_metadata(metadata: &Map<String, Value>) -> Parameters {
    metadata
        .iter()
        .filter(|(key, _)| !STRIPPED_METADATA_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn lower_first(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
