//! Message resolution
//!
//! Picks the template that applies to a normalized failure and renders it.
//! Rules are tried in order and the first match wins:
//!
//! 1. a path rule asking for the original message, when its kind matches
//! 2. a path rule carrying its own template, when its kind matches
//! 3. the catalog entry for the failure kind
//! 4. the catalog's `base` entry
//!
//! A path rule with a kind constraint that does not match is skipped entirely.
//!
//! Copyright (c) 2025 Fieldmsg Team
//! Licensed under the Apache-2.0 license

use crate::catalog::BASE_KEY;
use crate::failure::NormalizedFailure;
use crate::options::ResolvedOptions;
use crate::template::{BraceTemplate, TemplateRenderer};
use serde::Serialize;
use tracing::{debug, trace};

/// Used when a caller-supplied catalog somehow lacks a usable `base` entry
const FALLBACK_BASE_TEMPLATE: &str = "{path} is invalid";

/// Which rule produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSource {
    /// Framework message passed through by a path rule
    OriginalMessage,
    /// Template from a path rule
    PathTemplate,
    /// Catalog template for the failure kind
    KindTemplate,
    /// Catalog `base` template
    BaseTemplate,
}

/// Outcome of resolving a failure's message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub message: String,
    pub source: MessageSource,
}

/// Resolves messages against handler options through a template renderer
#[derive(Debug, Clone, Default)]
pub struct MessageResolver<R = BraceTemplate> {
    renderer: R,
}

impl MessageResolver<BraceTemplate> {
    pub fn new() -> Self {
        Self {
            renderer: BraceTemplate,
        }
    }
}

impl<R: TemplateRenderer> MessageResolver<R> {
    /// Resolver with a custom renderer
    pub fn with_renderer(renderer: R) -> Self {
        Self { renderer }
    }

    /// Resolve the final message for `failure`
    pub fn resolve(&self, failure: &NormalizedFailure, options: &ResolvedOptions) -> Resolution {
        let kind = failure.kind.as_str();

        if let Some(rule) = options
            .path_override(&failure.path)
            .filter(|rule| rule.applies_to(kind))
        {
            if rule.use_original_message {
                debug!(path = %failure.path, kind, "using original message from path rule");
                return Resolution {
                    message: failure.original_message.clone().unwrap_or_default(),
                    source: MessageSource::OriginalMessage,
                };
            }

            if let Some(template) = rule.template() {
                debug!(path = %failure.path, kind, "rendering path rule template");
                return self.render(template, failure, MessageSource::PathTemplate);
            }

            trace!(path = %failure.path, kind, "path rule has nothing to apply");
        }

        if let Some(template) = options.messages.for_kind(&failure.kind).filter(|t| !t.is_empty()) {
            trace!(path = %failure.path, kind, "rendering catalog template");
            return self.render(template, failure, MessageSource::KindTemplate);
        }

        debug!(path = %failure.path, kind, "no catalog entry for kind, using {}", BASE_KEY);
        let template = options
            .messages
            .base()
            .filter(|t| !t.is_empty())
            .unwrap_or(FALLBACK_BASE_TEMPLATE);
        self.render(template, failure, MessageSource::BaseTemplate)
    }

    fn render(&self, template: &str, failure: &NormalizedFailure, source: MessageSource) -> Resolution {
        Resolution {
            message: self.renderer.render(template, &failure.substitutions()),
            source,
        }
    }
}
