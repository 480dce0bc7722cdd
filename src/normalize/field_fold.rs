//! Field-folding normalization.
//!
//! Some APIs accept a write-only convenience field whose entries the server
//! encodes and merges into a canonical field before discarding the original.
//! Kubernetes Secrets are the classic case: `stringData` entries are base64
//! encoded into `data`. [`FieldFoldRule`] reproduces that transform for any
//! pair of fields and any supported [`FieldEncoding`].

use super::traits::NormalizationRule;
use crate::error::RuleError;
use crate::model::{
    nested_get, nested_mapping, nested_remove, nested_set, split_field, Document, DocumentKind,
    Mapping,
};
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Encoding the server applies to each folded value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldEncoding {
    /// Standard padded base64 of the UTF-8 bytes
    #[default]
    Base64,
    /// Copied verbatim
    Identity,
}

impl FieldEncoding {
    #[must_use]
    pub fn encode(self, value: &str) -> String {
        match self {
            Self::Base64 => B64.encode(value.as_bytes()),
            Self::Identity => value.to_string(),
        }
    }
}

impl fmt::Display for FieldEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base64 => f.write_str("base64"),
            Self::Identity => f.write_str("identity"),
        }
    }
}

/// Matches documents by their `kind` / `apiVersion` discriminators.
///
/// An unset selector field matches anything. A set `api_version` only
/// rejects documents that declare a different `apiVersion`; documents that
/// omit it are accepted, since hand-written manifests frequently do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSelector {
    pub kind: Option<String>,
    pub api_version: Option<String>,
}

impl ResourceSelector {
    /// Selector matching every document.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            api_version: None,
        }
    }

    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        let kind_ok = self
            .kind
            .as_deref()
            .map_or(true, |kind| doc.get("kind").and_then(Value::as_str) == Some(kind));
        let api_ok = self.api_version.as_deref().map_or(true, |wanted| {
            match doc.get("apiVersion") {
                None | Some(Value::Null) => true,
                Some(declared) => declared.as_str() == Some(wanted),
            }
        });
        kind_ok && api_ok
    }
}

/// Folds a write-only mapping field into a canonical mapping field.
///
/// For every entry of the write-only field the encoded value is written into
/// the canonical field under the same key, replacing any existing entry.
/// The write-only field is then removed. Every write-only value must be a
/// string; nested values are rejected rather than encoded recursively.
#[derive(Debug, Clone)]
pub struct FieldFoldRule {
    name: String,
    selector: ResourceSelector,
    write_only: Vec<String>,
    canonical: Vec<String>,
    encoding: FieldEncoding,
}

impl FieldFoldRule {
    /// Create a rule folding `write_only_field` into `canonical_field`.
    ///
    /// Field names may be dotted (`spec.stringData`) to address nested
    /// mappings. A rule whose fields are empty, equal or nested in one
    /// another never applies; see [`is_well_formed`](Self::is_well_formed).
    pub fn new(
        name: impl Into<String>,
        write_only_field: &str,
        canonical_field: &str,
        encoding: FieldEncoding,
    ) -> Self {
        Self {
            name: name.into(),
            selector: ResourceSelector::any(),
            write_only: split_field(write_only_field)
                .into_iter()
                .map(String::from)
                .collect(),
            canonical: split_field(canonical_field)
                .into_iter()
                .map(String::from)
                .collect(),
            encoding,
        }
    }

    /// Restrict the rule to documents matching `selector`.
    #[must_use]
    pub fn with_selector(mut self, selector: ResourceSelector) -> Self {
        self.selector = selector;
        self
    }

    #[must_use]
    pub fn selector(&self) -> &ResourceSelector {
        &self.selector
    }

    #[must_use]
    pub fn write_only_field(&self) -> String {
        self.write_only.join(".")
    }

    #[must_use]
    pub fn canonical_field(&self) -> String {
        self.canonical.join(".")
    }

    #[must_use]
    pub const fn encoding(&self) -> FieldEncoding {
        self.encoding
    }

    /// Whether both fields name at least one key and neither contains the
    /// other. Folding is only idempotent for such rules.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.write_only.is_empty()
            && !self.canonical.is_empty()
            && !self.write_only.starts_with(&self.canonical)
            && !self.canonical.starts_with(&self.write_only)
    }

    fn write_only_keys(&self) -> Vec<&str> {
        self.write_only.iter().map(String::as_str).collect()
    }

    fn canonical_keys(&self) -> Vec<&str> {
        self.canonical.iter().map(String::as_str).collect()
    }

    /// Encode every write-only entry, failing before anything is mutated.
    fn encode_entries(&self, write_only: &Mapping) -> Result<Vec<(String, Value)>, RuleError> {
        write_only
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => Ok((key.clone(), Value::String(self.encoding.encode(s)))),
                other => Err(RuleError::invalid_entry(
                    self.write_only_field(),
                    key.as_str(),
                    DocumentKind::String,
                    DocumentKind::of(other),
                )),
            })
            .collect()
    }
}

impl NormalizationRule for FieldFoldRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn applies(&self, doc: &Document) -> bool {
        self.is_well_formed()
            && self.selector.matches(doc)
            && nested_get(doc, &self.write_only_keys()).is_some_and(|v| !v.is_null())
    }

    fn normalize(&self, mut doc: Document) -> Result<Document, RuleError> {
        if !self.is_well_formed() {
            return Ok(doc);
        }
        let write_only_keys = self.write_only_keys();
        let canonical_keys = self.canonical_keys();

        let encoded = match nested_mapping(&doc, &write_only_keys)? {
            Some(entries) if !entries.is_empty() => Some(self.encode_entries(entries)?),
            _ => None,
        };
        let Some(encoded) = encoded else {
            return Ok(doc);
        };

        let mut canonical = nested_mapping(&doc, &canonical_keys)?
            .cloned()
            .unwrap_or_default();
        let folded = encoded.len();
        for (key, value) in encoded {
            canonical.insert(key, value);
        }

        nested_remove(&mut doc, &write_only_keys);
        nested_set(&mut doc, &canonical_keys, Value::Object(canonical))?;

        tracing::trace!(
            rule = %self.name,
            from = %self.write_only_field(),
            into = %self.canonical_field(),
            folded,
            "Folded write-only field"
        );
        Ok(doc)
    }
}
