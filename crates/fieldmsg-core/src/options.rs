//! Caller-supplied handler options and their resolved form
//!
//! [`HandlerOptions`] is what a caller writes: every field optional, templates
//! for only the kinds they care about. [`HandlerOptions::resolve`] fills in the
//! defaults and returns a fresh [`ResolvedOptions`] without touching the input.
//!
//! Copyright (c) 2025 Fieldmsg Team
//! Licensed under the Apache-2.0 license

use crate::catalog::MessageCatalog;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Message rule scoped to a single field path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PathOverride {
    /// Surface the framework's own message verbatim
    #[serde(alias = "original", alias = "origin")]
    pub use_original_message: bool,
    /// Only apply this rule to failures of this kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Template to render instead of the catalog entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PathOverride {
    /// Rule that passes the original message through
    pub fn original() -> Self {
        Self {
            use_original_message: true,
            ..Self::default()
        }
    }

    /// Rule that renders a custom template
    pub fn message<M: Into<String>>(template: M) -> Self {
        Self {
            message: Some(template.into()),
            ..Self::default()
        }
    }

    /// Restrict this rule to one failure kind
    pub fn for_kind<K: Into<String>>(mut self, kind: K) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Whether this rule applies to a failure of `kind`
    ///
    /// A missing or empty kind constraint matches every kind.
    pub fn applies_to(&self, kind: &str) -> bool {
        match self.kind.as_deref() {
            None | Some("") => true,
            Some(constraint) => constraint == kind,
        }
    }

    /// The custom template, if one is set and non-empty
    pub fn template(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}

/// Handler options as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HandlerOptions {
    /// Per-kind templates merged over the default catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<HashMap<String, String>>,
    /// Per-path rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<HashMap<String, PathOverride>>,
    /// Reserved; carried through but not consulted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capitalize: Option<bool>,
    /// Reserved; carried through but not consulted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humanize: Option<bool>,
}

impl HandlerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the template for one kind
    pub fn with_message<K, T>(mut self, kind: K, template: T) -> Self
    where
        K: Into<String>,
        T: Into<String>,
    {
        self.messages
            .get_or_insert_with(HashMap::new)
            .insert(kind.into(), template.into());
        self
    }

    /// Add a rule for one field path
    pub fn with_path<P: Into<String>>(mut self, path: P, rule: PathOverride) -> Self {
        self.paths
            .get_or_insert_with(HashMap::new)
            .insert(path.into(), rule);
        self
    }

    pub fn with_capitalize(mut self, capitalize: bool) -> Self {
        self.capitalize = Some(capitalize);
        self
    }

    pub fn with_humanize(mut self, humanize: bool) -> Self {
        self.humanize = Some(humanize);
        self
    }

    /// Layer `other` on top of these options
    ///
    /// Message and path maps merge key by key; flags from `other` win when set.
    pub fn merged_with(&self, other: &HandlerOptions) -> HandlerOptions {
        let mut merged = self.clone();
        if let Some(messages) = &other.messages {
            merged
                .messages
                .get_or_insert_with(HashMap::new)
                .extend(messages.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        if let Some(paths) = &other.paths {
            merged
                .paths
                .get_or_insert_with(HashMap::new)
                .extend(paths.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged.capitalize = other.capitalize.or(self.capitalize);
        merged.humanize = other.humanize.or(self.humanize);
        merged
    }

    /// Apply defaults, returning a new value
    pub fn resolve(&self) -> ResolvedOptions {
        let catalog = match &self.messages {
            Some(messages) => MessageCatalog::defaults().merged_with(messages),
            None => MessageCatalog::defaults(),
        };

        ResolvedOptions {
            capitalize: self.capitalize.unwrap_or(false),
            humanize: self.humanize.unwrap_or(false),
            messages: catalog,
            paths: self.paths.clone().unwrap_or_default(),
        }
    }
}

/// Options with every default applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOptions {
    pub capitalize: bool,
    pub humanize: bool,
    pub messages: MessageCatalog,
    pub paths: HashMap<String, PathOverride>,
}

impl ResolvedOptions {
    /// Rule registered for a field path
    pub fn path_override(&self, path: &str) -> Option<&PathOverride> {
        self.paths.get(path)
    }
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        HandlerOptions::default().resolve()
    }
}
