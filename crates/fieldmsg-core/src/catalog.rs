//! Message catalog keyed by failure kind
//!
//! Copyright (c) 2025 Fieldmsg Team
//! Licensed under the Apache-2.0 license

use crate::kind::FailureKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Catalog key of the fallback template
pub const BASE_KEY: &str = "base";

/// Shipped templates, one per kind of the closed taxonomy
const DEFAULT_MESSAGES: [(&str, &str); 19] = [
    ("base", "{path} is invalid"),
    ("required", "{path} is required"),
    ("enum", "{path} is invalid"),
    ("validate", "{path} is invalid"),
    ("unique", "{path} already exists"),
    ("string", "{path} must be a string"),
    (
        "maxlength",
        "{path} length must be less than or equal to {maxlength} characters long",
    ),
    ("minlength", "{path} length must be at least {minlength} characters long"),
    ("regexp", "{path} format is invalid"),
    ("number", "{path} must be a number"),
    ("number.max", "{path} must be greater than or equal to {max}"),
    ("number.min", "{path} must be less than or equal to {min}"),
    ("date", "{path} must be a date"),
    ("date.max", "{path} must be less than or equal to {max}"),
    ("date.min", "{path} must be greater than or equal to {min}"),
    ("buffer", "{path} must be a buffer"),
    ("boolean", "{path} must be a boolean"),
    ("objectId", "{path} must be a objectId"),
    ("map", "{path} must be a map"),
];

/// Mapping from kind label to message template
///
/// Keys are plain strings rather than [`FailureKind`] so callers can provide
/// templates for kinds the taxonomy does not know yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    messages: BTreeMap<String, String>,
}

impl MessageCatalog {
    /// An empty catalog
    pub fn empty() -> Self {
        Self {
            messages: BTreeMap::new(),
        }
    }

    /// The shipped default catalog
    pub fn defaults() -> Self {
        Self {
            messages: DEFAULT_MESSAGES
                .iter()
                .map(|(kind, template)| (kind.to_string(), template.to_string()))
                .collect(),
        }
    }

    /// New catalog with `overrides` applied key by key over this one
    pub fn merged_with(&self, overrides: &HashMap<String, String>) -> Self {
        let mut messages = self.messages.clone();
        for (kind, template) in overrides {
            messages.insert(kind.clone(), template.clone());
        }
        Self { messages }
    }

    /// Template for a kind label
    pub fn get(&self, kind: &str) -> Option<&str> {
        self.messages.get(kind).map(String::as_str)
    }

    /// Template for a failure kind
    pub fn for_kind(&self, kind: &FailureKind) -> Option<&str> {
        self.get(kind.as_str())
    }

    /// The fallback template
    pub fn base(&self) -> Option<&str> {
        self.get(BASE_KEY)
    }

    /// Set or replace a template
    pub fn insert<K, T>(&mut self, kind: K, template: T)
    where
        K: Into<String>,
        T: Into<String>,
    {
        self.messages.insert(kind.into(), template.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.messages.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_known_kind() {
        let catalog = MessageCatalog::defaults();
        assert_eq!(catalog.len(), FailureKind::ALL.len());
        for kind in FailureKind::ALL {
            let template = catalog.for_kind(&kind);
            assert!(
                template.map(|t| !t.is_empty()).unwrap_or(false),
                "missing default template for {}",
                kind
            );
        }
    }

    #[test]
    fn test_merge_is_key_level() {
        let defaults = MessageCatalog::defaults();
        let mut overrides = HashMap::new();
        overrides.insert("string".to_string(), "X".to_string());

        let merged = defaults.merged_with(&overrides);
        assert_eq!(merged.get("string"), Some("X"));
        assert_eq!(merged.len(), defaults.len());
        for (kind, template) in defaults.iter().filter(|(k, _)| *k != "string") {
            assert_eq!(merged.get(kind), Some(template));
        }
        // Source catalog untouched
        assert_eq!(defaults.get("string"), Some("{path} must be a string"));
    }

    #[test]
    fn test_merge_accepts_unknown_kinds() {
        let mut overrides = HashMap::new();
        overrides.insert("future".to_string(), "{path} is from the future".to_string());
        let merged = MessageCatalog::defaults().merged_with(&overrides);
        assert_eq!(merged.len(), 20);
        assert_eq!(
            merged.for_kind(&FailureKind::Other("future".to_string())),
            Some("{path} is from the future")
        );
    }

    #[test]
    fn test_empty_catalog_has_no_base() {
        let catalog = MessageCatalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.base().is_none());
    }
}
