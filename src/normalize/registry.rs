//! Ordered collection of normalization rules.

use super::builtin::register_builtin_rules;
use super::field_fold::{FieldFoldRule, ResourceSelector};
use super::traits::NormalizationRule;
use crate::config::{FieldFoldConfig, NormalizationConfig, Validatable};
use crate::error::{DeltaError, Result};
use crate::model::Document;
use std::fmt;

/// Holds the normalization rules for a process.
///
/// Populate it once at startup through `&mut self`, then share it read-only
/// (typically behind an `Arc`) with every comparator. The borrow rules keep
/// registration and normalization from overlapping, so no lock is needed.
#[derive(Default)]
pub struct NormalizerRegistry {
    rules: Vec<Box<dyn NormalizationRule>>,
}

impl NormalizerRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in rules
    #[must_use]
    pub fn with_builtin_rules() -> Self {
        let mut registry = Self::new();
        register_builtin_rules(&mut registry);
        registry
    }

    /// Build a registry from configuration.
    ///
    /// Built-in rules (when enabled) come first, followed by configured
    /// field-folding rules in file order.
    pub fn from_config(config: &NormalizationConfig) -> Result<Self> {
        let errors = config.validate();
        if !errors.is_empty() {
            let joined = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(DeltaError::config(joined));
        }

        let mut registry = if config.builtin_rules {
            Self::with_builtin_rules()
        } else {
            Self::new()
        };
        for fold in &config.field_folds {
            registry.register(FieldFoldRule::from(fold));
        }
        Ok(registry)
    }

    /// Append a rule. No deduplication or conflict checking is done.
    pub fn register(&mut self, rule: impl NormalizationRule + 'static) {
        self.register_boxed(Box::new(rule));
    }

    /// Append an already boxed rule.
    pub fn register_boxed(&mut self, rule: Box<dyn NormalizationRule>) {
        tracing::debug!(
            rule = rule.name(),
            position = self.rules.len(),
            "Registered normalization rule"
        );
        self.rules.push(rule);
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with_rule(mut self, rule: impl NormalizationRule + 'static) -> Self {
        self.register(rule);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in registration order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name())
    }

    /// Names of the rules whose predicate holds for `doc`.
    #[must_use]
    pub fn applicable_rules(&self, doc: &Document) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|r| r.applies(doc))
            .map(|r| r.name())
            .collect()
    }

    /// Run every applicable rule over `doc` in registration order.
    ///
    /// Only the given node is inspected; rules that need to reach nested
    /// documents do so themselves. The first rule error aborts the pass and
    /// is returned as [`DeltaError::NormalizationFailed`] naming the rule.
    /// With no applicable rule the document comes back unchanged.
    pub fn normalize_all(&self, doc: Document) -> Result<Document> {
        let mut doc = doc;
        for rule in &self.rules {
            if !rule.applies(&doc) {
                continue;
            }
            tracing::debug!(rule = rule.name(), "Applying normalization rule");
            doc = rule
                .normalize(doc)
                .map_err(|e| DeltaError::normalization(rule.name(), e))?;
        }
        Ok(doc)
    }

    /// Like [`normalize_all`](Self::normalize_all) but leaves the input intact.
    pub fn normalize(&self, doc: &Document) -> Result<Document> {
        self.normalize_all(doc.clone())
    }
}

impl fmt::Debug for NormalizerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizerRegistry")
            .field("rules", &self.rule_names().collect::<Vec<_>>())
            .finish()
    }
}

impl From<&FieldFoldConfig> for FieldFoldRule {
    fn from(config: &FieldFoldConfig) -> Self {
        let selector = ResourceSelector {
            kind: config.kind.clone(),
            api_version: config.api_version.clone(),
        };
        Self::new(
            config.name.clone(),
            &config.write_only_field,
            &config.canonical_field,
            config.encoding,
        )
        .with_selector(selector)
    }
}
