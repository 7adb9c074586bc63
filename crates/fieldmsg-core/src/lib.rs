//! fieldmsg core - readable field errors from document-model validation failures
//!
//! Validation frameworks report failures in their own internal vocabulary:
//! capitalized cast labels, `"user defined"` predicates, a shared `max`/`min`
//! label for numbers and dates, metadata bags full of validator references.
//! This crate turns such a failure into a single stable
//! [`ValidationFieldError`] with a message drawn from a customizable catalog.
//!
//! ## Pipeline
//!
//! - **Kind normalization** ([`kind`]): internal label + metadata → public
//!   [`FailureKind`] and filtered parameters
//! - **Message resolution** ([`resolver`]): per-path rule → per-kind catalog
//!   entry → `base` entry, rendered through a [`TemplateRenderer`]
//! - **Handling** ([`handler`]): pass-through for anything that is not a
//!   `"ValidationError"`, first-field extraction otherwise
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldmsg_core::{handle, HandlerOptions};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "name": "ValidationError",
//!     "errors": {
//!         "age": {"kind": "max", "path": "age", "value": 100, "properties": {"max": 60}}
//!     }
//! });
//!
//! let options = HandlerOptions::new()
//!     .with_message("number.max", "@{path} must be greater than or equal to {max}");
//!
//! let error = handle(raw, &options).unwrap();
//! assert_eq!(error["kind"], "number.max");
//! assert_eq!(error["message"], "@age must be greater than or equal to 60");
//! ```
//!
//! Every call is pure: options are resolved into a fresh value and nothing is
//! retained between calls, so a single [`ErrorHandler`] can be shared freely
//! across threads.
//!
//! Copyright (c) 2025 Fieldmsg Team
//! Licensed under the Apache-2.0 license

pub mod catalog;
pub mod error;
pub mod failure;
pub mod handler;
pub mod kind;
pub mod options;
pub mod resolver;
pub mod template;

// Re-export commonly used types for convenience
pub use catalog::MessageCatalog;
pub use error::{Error, Result};
pub use failure::{NormalizedFailure, RawFieldFailure, RawValidationError, VALIDATION_ERROR_NAME};
pub use handler::{handle, is_validation_error, ErrorHandler, Handled, ValidationFieldError, FIELD_ERROR_NAME};
pub use kind::{normalize_kind, BoundType, FailureKind, Parameters};
pub use options::{HandlerOptions, PathOverride, ResolvedOptions};
pub use resolver::{MessageResolver, MessageSource, Resolution};
pub use template::{display_value, BraceTemplate, TemplateRenderer};
