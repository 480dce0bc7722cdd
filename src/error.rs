//! Unified error types for resource-delta.
//!
//! Normalization rules report [`RuleError`]s; the registry and comparator
//! wrap them in [`DeltaError::NormalizationFailed`] with the rule name and,
//! once known, the side of the comparison the document came from.

use crate::model::{DocumentKind, DocumentSide};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for resource-delta operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DeltaError {
    /// A normalization rule rejected a document
    #[error("Normalization rule '{rule}' failed{}: {source}", side_suffix(.side))]
    NormalizationFailed {
        rule: String,
        side: Option<DocumentSide>,
        #[source]
        source: RuleError,
    },

    /// Structural problem found while walking a document
    #[error("Malformed document at {path}: {message}")]
    MalformedDocument { path: String, message: String },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Errors decoding configuration or document text
    #[error("Failed to parse {context}: {message}")]
    Parse { context: String, message: String },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by an individual normalization rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleError {
    #[error("Invalid field type for '{}': expected {expected}, found {found}", qualified(.field, .key))]
    InvalidFieldType {
        field: String,
        key: Option<String>,
        expected: DocumentKind,
        found: DocumentKind,
    },

    #[error("{0}")]
    Custom(String),
}

fn side_suffix(side: &Option<DocumentSide>) -> String {
    side.map(|s| format!(" on {s} document")).unwrap_or_default()
}

fn qualified(field: &str, key: &Option<String>) -> String {
    match key {
        Some(key) => format!("{field}.{key}"),
        None => field.to_string(),
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for resource-delta operations
pub type Result<T> = std::result::Result<T, DeltaError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl DeltaError {
    /// Wrap a rule error with the name of the rule that raised it
    pub fn normalization(rule: impl Into<String>, source: RuleError) -> Self {
        Self::NormalizationFailed {
            rule: rule.into(),
            side: None,
            source,
        }
    }

    /// Create a malformed document error
    pub fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a parse error
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            message: format!("{source}"),
            source,
        }
    }

    /// Record which side of a comparison a normalization failure came from.
    ///
    /// Other variants pass through untouched.
    #[must_use]
    pub fn on_side(self, side: DocumentSide) -> Self {
        match self {
            Self::NormalizationFailed { rule, source, .. } => Self::NormalizationFailed {
                rule,
                side: Some(side),
                source,
            },
            other => other,
        }
    }

    /// Whether this error came out of the normalization phase
    #[must_use]
    pub const fn is_normalization_failure(&self) -> bool {
        matches!(self, Self::NormalizationFailed { .. })
    }

    /// The underlying rule error, if this is a normalization failure
    #[must_use]
    pub const fn rule_error(&self) -> Option<&RuleError> {
        match self {
            Self::NormalizationFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl RuleError {
    /// Create an invalid field type error for a whole field
    pub fn invalid_field(
        field: impl Into<String>,
        expected: DocumentKind,
        found: DocumentKind,
    ) -> Self {
        Self::InvalidFieldType {
            field: field.into(),
            key: None,
            expected,
            found,
        }
    }

    /// Create an invalid field type error for one entry of a mapping field
    pub fn invalid_entry(
        field: impl Into<String>,
        key: impl Into<String>,
        expected: DocumentKind,
        found: DocumentKind,
    ) -> Self {
        Self::InvalidFieldType {
            field: field.into(),
            key: Some(key.into()),
            expected,
            found,
        }
    }

    /// Create a free-form rule error
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for DeltaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for DeltaError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::parse("YAML configuration", err.to_string())
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained outermost first, e.g.
/// `"loading config: reading file: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<DeltaError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
///
/// Normalization failures keep their structured fields; the rule name and
/// side already identify them.
fn add_context_to_error(err: DeltaError, new_ctx: &str) -> DeltaError {
    match err {
        DeltaError::MalformedDocument { path, message } => DeltaError::MalformedDocument {
            path,
            message: chain_context(new_ctx, &message),
        },
        DeltaError::Parse { context, message } => DeltaError::Parse {
            context: chain_context(new_ctx, &context),
            message,
        },
        DeltaError::Io {
            path,
            message,
            source,
        } => DeltaError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        DeltaError::Config(msg) => DeltaError::Config(chain_context(new_ctx, &msg)),
        other @ DeltaError::NormalizationFailed { .. } => other,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_error_display() {
        let err = DeltaError::normalization(
            "secret-string-data",
            RuleError::invalid_entry(
                "stringData",
                "port",
                DocumentKind::String,
                DocumentKind::Number,
            ),
        );
        let display = err.to_string();
        assert!(display.contains("secret-string-data"), "{display}");
        assert!(display.contains("stringData.port"), "{display}");
        assert!(!display.contains(" on "), "{display}");

        let err = err.on_side(DocumentSide::Observed);
        assert!(
            err.to_string().contains("on observed document"),
            "{}",
            err
        );
    }

    #[test]
    fn test_on_side_leaves_other_variants() {
        let err = DeltaError::config("bad").on_side(DocumentSide::Desired);
        assert!(matches!(err, DeltaError::Config(ref m) if m == "bad"));
        assert!(!err.is_normalization_failure());
        assert!(err.rule_error().is_none());
    }

    #[test]
    fn test_rule_error_accessor() {
        let err = DeltaError::normalization("r", RuleError::custom("boom"));
        assert!(err.is_normalization_failure());
        assert_eq!(err.rule_error(), Some(&RuleError::Custom("boom".into())));
    }

    #[test]
    fn test_error_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = DeltaError::io("/path/to/config.yaml", io_err);

        assert!(err.to_string().contains("/path/to/config.yaml"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(DeltaError::config("base"))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(DeltaError::Config(msg)) => {
                assert_eq!(msg, "outer layer: middle layer: base");
            }
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_context_preserves_normalization_failure() {
        let result: Result<()> = Err(DeltaError::normalization("r", RuleError::custom("x")));
        match result.context("outer") {
            Err(DeltaError::NormalizationFailed { rule, .. }) => assert_eq!(rule, "r"),
            other => panic!("Expected NormalizationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(DeltaError::config("error"));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
