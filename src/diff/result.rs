//! Diff result structures.

use crate::model::FieldPath;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// What kind of divergence a [`Difference`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    /// Observed has a key or element the desired document does not
    Added,
    /// Observed is missing a key or element the desired document wants
    Removed,
    /// Both sides hold scalars of the same kind with different values
    Changed,
    /// Both sides hold nodes of different fundamental kinds
    TypeMismatch,
}

impl DifferenceKind {
    /// Single-character marker used in text output.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Added => '+',
            Self::Removed => '-',
            Self::Changed => '~',
            Self::TypeMismatch => '!',
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Changed => "changed",
            Self::TypeMismatch => "type_mismatch",
        }
    }
}

impl fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single path-addressed divergence between two normalized documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difference {
    pub path: FieldPath,
    pub kind: DifferenceKind,
    /// Value on the desired side; absent for [`DifferenceKind::Added`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired: Option<Value>,
    /// Value on the observed side; absent for [`DifferenceKind::Removed`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed: Option<Value>,
}

impl Difference {
    pub fn added(path: FieldPath, observed: Value) -> Self {
        Self {
            path,
            kind: DifferenceKind::Added,
            desired: None,
            observed: Some(observed),
        }
    }

    pub fn removed(path: FieldPath, desired: Value) -> Self {
        Self {
            path,
            kind: DifferenceKind::Removed,
            desired: Some(desired),
            observed: None,
        }
    }

    pub fn changed(path: FieldPath, desired: Value, observed: Value) -> Self {
        Self {
            path,
            kind: DifferenceKind::Changed,
            desired: Some(desired),
            observed: Some(observed),
        }
    }

    pub fn type_mismatch(path: FieldPath, desired: Value, observed: Value) -> Self {
        Self {
            path,
            kind: DifferenceKind::TypeMismatch,
            desired: Some(desired),
            observed: Some(observed),
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.symbol(), self.path)?;
        match (&self.desired, &self.observed) {
            (Some(desired), Some(observed)) => write!(f, ": {desired} -> {observed}"),
            (Some(value), None) | (None, Some(value)) => write!(f, ": {value}"),
            (None, None) => Ok(()),
        }
    }
}

/// Difference counts by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub type_mismatches: usize,
    pub total: usize,
}

impl DiffSummary {
    #[must_use]
    pub fn from_differences(differences: &[Difference]) -> Self {
        let mut summary = Self::default();
        for diff in differences {
            match diff.kind {
                DifferenceKind::Added => summary.added += 1,
                DifferenceKind::Removed => summary.removed += 1,
                DifferenceKind::Changed => summary.changed += 1,
                DifferenceKind::TypeMismatch => summary.type_mismatches += 1,
            }
        }
        summary.total = differences.len();
        summary
    }
}

/// Outcome of comparing a desired document against an observed one.
///
/// An empty result is the only signal that no update is needed; anything
/// else means the resource has drifted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct DiffResult {
    /// Differences in pre-order traversal order, mapping keys sorted
    pub differences: Vec<Difference>,
    pub summary: DiffSummary,
}

impl DiffResult {
    pub fn new(differences: Vec<Difference>) -> Self {
        let summary = DiffSummary::from_differences(&differences);
        Self {
            differences,
            summary,
        }
    }

    /// Whether the observed state diverges from the desired state
    #[must_use]
    pub fn is_drifted(&self) -> bool {
        !self.differences.is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.differences.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Difference> {
        self.differences.iter()
    }

    /// Differences of one kind, in result order.
    pub fn of_kind(&self, kind: DifferenceKind) -> impl Iterator<Item = &Difference> {
        self.differences.iter().filter(move |d| d.kind == kind)
    }

    /// Look up the difference recorded at exactly `path`.
    #[must_use]
    pub fn find(&self, path: &FieldPath) -> Option<&Difference> {
        self.differences.iter().find(|d| &d.path == path)
    }

    #[must_use]
    pub fn into_differences(self) -> Vec<Difference> {
        self.differences
    }
}

impl IntoIterator for DiffResult {
    type Item = Difference;
    type IntoIter = std::vec::IntoIter<Difference>;

    fn into_iter(self) -> Self::IntoIter {
        self.differences.into_iter()
    }
}

impl<'a> IntoIterator for &'a DiffResult {
    type Item = &'a Difference;
    type IntoIter = std::slice::Iter<'a, Difference>;

    fn into_iter(self) -> Self::IntoIter {
        self.differences.iter()
    }
}
