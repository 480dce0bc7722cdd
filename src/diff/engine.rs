//! Comparator: normalize both documents, then walk them in lockstep.

use super::result::DiffResult;
use super::walker::DiffWalker;
use crate::config::{ComparisonConfig, DeltaConfig, Validatable};
use crate::error::{DeltaError, Result};
use crate::model::{Document, DocumentSide};
use crate::normalize::NormalizerRegistry;
use rayon::prelude::*;
use std::sync::Arc;

/// Semantic comparator for desired vs. observed resource state.
///
/// Holds a shared, read-only [`NormalizerRegistry`] and no per-call state,
/// so one comparator can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Comparator {
    registry: Arc<NormalizerRegistry>,
    options: ComparisonConfig,
}

impl Default for Comparator {
    fn default() -> Self {
        Self::with_builtin_rules()
    }
}

impl Comparator {
    /// Create a comparator over an already populated registry
    #[must_use]
    pub fn new(registry: Arc<NormalizerRegistry>) -> Self {
        Self {
            registry,
            options: ComparisonConfig::default(),
        }
    }

    /// Create a comparator using only the built-in rules
    #[must_use]
    pub fn with_builtin_rules() -> Self {
        Self::new(Arc::new(NormalizerRegistry::with_builtin_rules()))
    }

    /// Build the registry and comparator described by `config`.
    pub fn from_config(config: &DeltaConfig) -> Result<Self> {
        let errors = config.comparison.validate();
        if !errors.is_empty() {
            let joined = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(DeltaError::config(joined));
        }
        let registry = NormalizerRegistry::from_config(&config.normalization)?;
        Ok(Self::new(Arc::new(registry)).with_options(config.comparison.clone()))
    }

    /// Replace the comparison options
    #[must_use]
    pub fn with_options(mut self, options: ComparisonConfig) -> Self {
        self.options = options;
        self
    }

    /// Set the maximum nesting depth
    #[must_use]
    pub const fn with_max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = depth;
        self
    }

    /// Enable or disable numeric equivalence (`1 == 1.0`)
    #[must_use]
    pub const fn numeric_equivalence(mut self, enabled: bool) -> Self {
        self.options.numeric_equivalence = enabled;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &NormalizerRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn options(&self) -> &ComparisonConfig {
        &self.options
    }

    /// Normalize both documents and compare them.
    ///
    /// Both sides are normalized independently. A normalization failure on
    /// either side aborts the comparison with
    /// [`DeltaError::NormalizationFailed`] tagged with that side; no partial
    /// result is ever returned. The documents are consumed, so pass clones
    /// if the originals are still needed.
    pub fn compare(&self, desired: Document, observed: Document) -> Result<DiffResult> {
        let desired = self
            .registry
            .normalize_all(desired)
            .map_err(|e| e.on_side(DocumentSide::Desired))?;
        let observed = self
            .registry
            .normalize_all(observed)
            .map_err(|e| e.on_side(DocumentSide::Observed))?;
        self.compare_normalized(&desired, &observed)
    }

    /// Compare documents that are already in canonical form.
    ///
    /// Skips the registry entirely; useful when normalized documents are
    /// cached between reconciliations.
    pub fn compare_normalized(
        &self,
        desired: &Document,
        observed: &Document,
    ) -> Result<DiffResult> {
        let differences = DiffWalker::new(&self.options).run(desired, observed)?;
        let result = DiffResult::new(differences);
        tracing::debug!(
            total = result.summary.total,
            added = result.summary.added,
            removed = result.summary.removed,
            changed = result.summary.changed,
            type_mismatches = result.summary.type_mismatches,
            "Comparison complete"
        );
        Ok(result)
    }

    /// Compare many independent document pairs in parallel.
    ///
    /// Results keep the order of `pairs`; each pair succeeds or fails on its own.
    pub fn compare_batch(&self, pairs: Vec<(Document, Document)>) -> Vec<Result<DiffResult>> {
        pairs
            .into_par_iter()
            .map(|(desired, observed)| self.compare(desired, observed))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DifferenceKind;
    use crate::error::RuleError;
    use crate::model::DocumentKind;
    use serde_json::json;

    #[test]
    fn test_secret_string_data_matches_encoded_data() {
        let comparator = Comparator::default();
        let desired = json!({
            "kind": "Secret",
            "stringData": {"user": "admin", "pass": "secret123"}
        });
        let observed = json!({
            "kind": "Secret",
            "data": {"user": "YWRtaW4=", "pass": "c2VjcmV0MTIz"}
        });
        let result = comparator.compare(desired, observed).unwrap();
        assert!(!result.is_drifted(), "{:?}", result.differences);
    }

    #[test]
    fn test_observed_side_is_normalized_too() {
        let comparator = Comparator::default();
        let desired = json!({"apiVersion": "v1", "kind": "Secret", "data": {"a": "Yg=="}});
        let observed = json!({"apiVersion": "v1", "kind": "Secret", "stringData": {"a": "b"}});
        assert!(comparator.compare(desired, observed).unwrap().is_empty());
    }

    #[test]
    fn test_normalization_failure_tagged_with_side() {
        let comparator = Comparator::default();
        let good = json!({"kind": "Secret", "data": {}});
        let bad = json!({"kind": "Secret", "stringData": {"n": 1}});

        let err = comparator.compare(bad.clone(), good.clone()).unwrap_err();
        match err {
            DeltaError::NormalizationFailed { side, source, .. } => {
                assert_eq!(side, Some(DocumentSide::Desired));
                assert_eq!(
                    source,
                    RuleError::invalid_entry(
                        "stringData",
                        "n",
                        DocumentKind::String,
                        DocumentKind::Number
                    )
                );
            }
            other => panic!("Expected NormalizationFailed, got {other:?}"),
        }

        let err = comparator.compare(good, bad).unwrap_err();
        assert!(matches!(
            err,
            DeltaError::NormalizationFailed {
                side: Some(DocumentSide::Observed),
                ..
            }
        ));
    }

    #[test]
    fn test_compare_normalized_skips_rules() {
        let comparator = Comparator::default();
        let desired = json!({"kind": "Secret", "stringData": {"a": "b"}});
        let observed = json!({"kind": "Secret", "data": {"a": "Yg=="}});
        let result = comparator.compare_normalized(&desired, &observed).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.of_kind(DifferenceKind::Added).count(), 1);
        assert_eq!(result.of_kind(DifferenceKind::Removed).count(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = DeltaConfig::builder()
            .builtin_rules(false)
            .numeric_equivalence(false)
            .build();
        let comparator = Comparator::from_config(&config).unwrap();
        assert!(comparator.registry().is_empty());
        assert!(!comparator.options().numeric_equivalence);

        let bad = DeltaConfig::builder().max_depth(0).build();
        assert!(matches!(
            Comparator::from_config(&bad),
            Err(DeltaError::Config(_))
        ));
    }

    #[test]
    fn test_depth_limit_surfaces_as_malformed() {
        let comparator = Comparator::default().with_max_depth(1);
        let doc = json!({"a": {"b": 1}});
        let err = comparator.compare(doc.clone(), doc).unwrap_err();
        assert!(matches!(err, DeltaError::MalformedDocument { .. }), "{err:?}");
    }

    #[test]
    fn test_compare_batch_preserves_order() {
        let comparator = Comparator::default();
        let pairs = vec![
            (json!({"a": 1}), json!({"a": 1})),
            (json!({"a": 1}), json!({"a": 2})),
            (json!({"kind": "Secret", "stringData": {"x": 1}}), json!({})),
        ];
        let results = comparator.compare_batch(pairs);
        assert_eq!(results.len(), 3);
        assert!(results[0].as_ref().unwrap().is_empty());
        assert_eq!(results[1].as_ref().unwrap().len(), 1);
        assert!(results[2].is_err());
    }
}
