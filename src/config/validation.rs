//! Configuration validation.

use super::types::{ComparisonConfig, DeltaConfig, FieldFoldConfig, NormalizationConfig};
use crate::model::split_field;
use crate::normalize::SECRET_STRING_DATA_RULE;
use std::collections::HashSet;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for DeltaConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.normalization.validate());
        errors.extend(self.comparison.validate());
        errors
    }
}

impl Validatable for NormalizationConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        if self.builtin_rules {
            seen.insert(SECRET_STRING_DATA_RULE);
        }

        for (idx, fold) in self.field_folds.iter().enumerate() {
            let prefix = format!("normalization.field_folds[{idx}]");
            for mut err in fold.validate() {
                err.field = format!("{prefix}.{}", err.field);
                errors.push(err);
            }
            if !fold.name.is_empty() && !seen.insert(fold.name.as_str()) {
                errors.push(ConfigError::new(
                    format!("{prefix}.name"),
                    format!("Duplicate rule name '{}'", fold.name),
                ));
            }
        }
        errors
    }
}

impl Validatable for FieldFoldConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(ConfigError::new("name", "Rule name must not be empty"));
        }

        let write_only = split_field(&self.write_only_field);
        let canonical = split_field(&self.canonical_field);
        if write_only.is_empty() {
            errors.push(ConfigError::new(
                "write_only_field",
                "Write-only field must name at least one key",
            ));
        }
        if canonical.is_empty() {
            errors.push(ConfigError::new(
                "canonical_field",
                "Canonical field must name at least one key",
            ));
        }
        if !write_only.is_empty() && !canonical.is_empty() {
            if write_only == canonical {
                errors.push(ConfigError::new(
                    "canonical_field",
                    format!(
                        "Canonical field '{}' must differ from the write-only field",
                        self.canonical_field
                    ),
                ));
            } else if canonical.starts_with(&write_only) || write_only.starts_with(&canonical) {
                errors.push(ConfigError::new(
                    "canonical_field",
                    format!(
                        "Fields '{}' and '{}' must not contain one another",
                        self.write_only_field, self.canonical_field
                    ),
                ));
            }
        }
        errors
    }
}

impl Validatable for ComparisonConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.max_depth == 0 {
            errors.push(ConfigError::new(
                "comparison.max_depth",
                "Maximum depth must be at least 1",
            ));
        }
        errors
    }
}
