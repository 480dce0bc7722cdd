//! Semantic comparison of desired and observed documents.
//!
//! The [`Comparator`] normalizes both documents through a shared
//! [`NormalizerRegistry`](crate::normalize::NormalizerRegistry), then walks
//! them in lockstep and reports field-level [`Difference`]s. Sequences are
//! compared by position; mapping keys are visited in sorted order so the
//! output is deterministic.
//!
//! # Example
//!
//! ```
//! use resource_delta::diff::{Comparator, DifferenceKind};
//! use serde_json::json;
//!
//! let comparator = Comparator::default();
//! let result = comparator
//!     .compare(
//!         json!({"spec": {"replicas": 3}}),
//!         json!({"spec": {"replicas": 5}, "status": {}}),
//!     )
//!     .unwrap();
//!
//! assert!(result.is_drifted());
//! assert_eq!(result.differences[0].kind, DifferenceKind::Changed);
//! assert_eq!(result.differences[1].kind, DifferenceKind::Added);
//! ```

mod engine;
mod result;
mod walker;

pub use engine::Comparator;
pub use result::{DiffResult, DiffSummary, Difference, DifferenceKind};
