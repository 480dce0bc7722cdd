//! **Semantic drift detection for declarative resources.**
//!
//! `resource-delta` compares the *desired* state of a resource, as written in a
//! manifest, against the *observed* state returned by the server that stores it,
//! and reports only the differences that actually matter.
//!
//! Servers rarely store a resource exactly as it was submitted. A Kubernetes
//! `Secret` submitted with plaintext `stringData` comes back with the same
//! entries base64-encoded under `data`, and `stringData` is gone. A naive
//! structural diff reports spurious drift on every reconciliation. This crate
//! first rewrites both documents into the server's canonical form, then diffs.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: The [`Document`] tree (a `serde_json::Value`), [`FieldPath`]
//!   addressing and the [`DocumentKind`] classification used in errors.
//! - **[`normalize`]**: The [`NormalizationRule`] trait, the generic
//!   [`FieldFoldRule`] and the [`NormalizerRegistry`] that applies rules in
//!   registration order.
//! - **[`diff`]**: The [`Comparator`], which normalizes both sides and reports a
//!   deterministic [`DiffResult`].
//! - **[`config`]**: YAML configuration, presets and validation for the rule
//!   set and comparison options.
//! - **[`error`]**: [`DeltaError`] and [`RuleError`].
//!
//! ## Getting Started
//!
//! ```
//! use resource_delta::Comparator;
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let comparator = Comparator::default();
//!
//!     let desired = json!({
//!         "kind": "Secret",
//!         "stringData": {"user": "admin", "pass": "secret123"}
//!     });
//!     let observed = json!({
//!         "kind": "Secret",
//!         "data": {"user": "YWRtaW4=", "pass": "c2VjcmV0MTIz"}
//!     });
//!
//!     let result = comparator.compare(desired, observed)?;
//!     assert!(!result.is_drifted());
//!     Ok(())
//! }
//! ```
//!
//! ### Custom rules
//!
//! Resources other than `Secret` with the same write-only/canonical field
//! pattern can be declared without writing code:
//!
//! ```
//! use std::sync::Arc;
//! use resource_delta::{Comparator, FieldEncoding, FieldFoldRule, NormalizerRegistry};
//! use resource_delta::normalize::ResourceSelector;
//! use serde_json::json;
//!
//! let mut registry = NormalizerRegistry::with_builtin_rules();
//! registry.register(
//!     FieldFoldRule::new("config-plain", "plainData", "data", FieldEncoding::Identity)
//!         .with_selector(ResourceSelector::kind("Config")),
//! );
//!
//! let comparator = Comparator::new(Arc::new(registry));
//! let result = comparator
//!     .compare(
//!         json!({"kind": "Config", "plainData": {"mode": "fast"}}),
//!         json!({"kind": "Config", "data": {"mode": "slow"}}),
//!     )
//!     .unwrap();
//! assert_eq!(result.differences[0].to_string(), "~ data.mode: \"fast\" -> \"slow\"");
//! ```
//!
//! ## Concurrency
//!
//! A [`Comparator`] holds its registry behind an `Arc` and keeps no per-call
//! state, so it can be cloned or shared across threads freely.
//! [`Comparator::compare_batch`] fans independent pairs out over rayon.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Variable names like `desired`/`observed` are clear in context
    clippy::similar_names
)]

pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod normalize;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigPreset, DeltaConfig, DeltaConfigBuilder, Validatable};
pub use diff::{Comparator, DiffResult, DiffSummary, Difference, DifferenceKind};
pub use error::{DeltaError, ErrorContext, Result, RuleError};
pub use model::{Document, DocumentKind, DocumentSide, FieldPath, PathSegment};
pub use normalize::{FieldEncoding, FieldFoldRule, NormalizationRule, NormalizerRegistry};
