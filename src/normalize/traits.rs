//! Trait definitions for representation-normalization rules.
//!
//! A rule recognises documents whose stored form differs from what a client
//! submits and rewrites them into the stored form, so that the comparator
//! never sees representation-only differences.

use crate::error::RuleError;
use crate::model::Document;

/// A named, stateless normalization rule.
///
/// Rules must be independent of each other: two rules whose `applies`
/// predicates can both hold for the same document must commute. The
/// registry runs rules in registration order and never checks this.
pub trait NormalizationRule: Send + Sync {
    /// Name used in errors and logs.
    fn name(&self) -> &str;

    /// Cheap, side-effect-free check for whether this rule handles `doc`.
    fn applies(&self, doc: &Document) -> bool;

    /// Rewrite `doc` into its canonical form.
    ///
    /// Applying a rule to its own output must be a no-op, either because
    /// `applies` no longer holds or because the transform is idempotent.
    /// On error the document is dropped; callers must not compare it.
    fn normalize(&self, doc: Document) -> Result<Document, RuleError>;
}

impl<R: NormalizationRule + ?Sized> NormalizationRule for Box<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn applies(&self, doc: &Document) -> bool {
        (**self).applies(doc)
    }

    fn normalize(&self, doc: Document) -> Result<Document, RuleError> {
        (**self).normalize(doc)
    }
}
