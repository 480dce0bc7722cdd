//! Representation normalization applied before comparison.
//!
//! Servers often store a resource differently from how it was submitted.
//! Each [`NormalizationRule`] recognises one such quirk and rewrites a
//! document into the stored form; the [`NormalizerRegistry`] runs every
//! applicable rule in registration order.
//!
//! # Example
//!
//! ```
//! use resource_delta::normalize::NormalizerRegistry;
//! use serde_json::json;
//!
//! let registry = NormalizerRegistry::with_builtin_rules();
//! let secret = json!({
//!     "apiVersion": "v1",
//!     "kind": "Secret",
//!     "stringData": {"user": "admin"}
//! });
//!
//! let canonical = registry.normalize_all(secret).unwrap();
//! assert_eq!(canonical["data"]["user"], "YWRtaW4=");
//! assert!(canonical.get("stringData").is_none());
//! ```

mod builtin;
mod field_fold;
mod registry;
pub mod traits;

pub use builtin::{
    builtin_rules, register_builtin_rules, secret_string_data_rule, SECRET_STRING_DATA_RULE,
};
pub use field_fold::{FieldEncoding, FieldFoldRule, ResourceSelector};
pub use registry::NormalizerRegistry;
pub use traits::NormalizationRule;
