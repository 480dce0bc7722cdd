//! Document model shared by normalization and comparison.
//!
//! Documents are untyped trees ([`serde_json::Value`]); callers decode
//! manifests from whatever wire format they use before handing them over.

mod document;
mod path;

pub use document::*;
pub use path::*;
