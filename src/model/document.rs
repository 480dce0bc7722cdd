//! The generic document tree and helpers for addressing fields inside it.

use crate::error::RuleError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A structured resource document: null, boolean, number, string,
/// sequence or string-keyed mapping, nested arbitrarily.
///
/// Desired and observed resources are both plain documents; no
/// resource-kind-specific struct exists at this layer.
pub type Document = Value;

/// A string-keyed mapping node.
pub type Mapping = Map<String, Value>;

/// The fundamental kind of a document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Null,
    Boolean,
    Number,
    String,
    Sequence,
    Mapping,
}

impl DocumentKind {
    /// Classify a node.
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
        }
    }

    /// Scalars are everything that is not a sequence or a mapping.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        !self.is_composite()
    }

    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Sequence | Self::Mapping)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which side of a comparison a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSide {
    /// The state the caller wants
    Desired,
    /// The state read back from the server
    Observed,
}

impl fmt::Display for DocumentSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Desired => f.write_str("desired"),
            Self::Observed => f.write_str("observed"),
        }
    }
}

// ============================================================================
// Nested field access
// ============================================================================

/// Split a dotted field reference (`"spec.stringData"`) into its keys.
///
/// Empty segments are dropped, so `"data"` and `".data"` are the same field.
#[must_use]
pub fn split_field(field: &str) -> Vec<&str> {
    field.split('.').filter(|s| !s.is_empty()).collect()
}

/// Read a nested field, returning `None` if any step is missing or is not
/// a mapping.
#[must_use]
pub fn nested_get<'a>(doc: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .try_fold(doc, |node, key| node.as_object().and_then(|m| m.get(*key)))
}

/// Read a nested field that must be a mapping if present.
///
/// Absent and `null` both read as `None`; any other non-mapping value is an
/// [`RuleError::InvalidFieldType`].
pub fn nested_mapping<'a>(
    doc: &'a Value,
    keys: &[&str],
) -> Result<Option<&'a Mapping>, RuleError> {
    match nested_get(doc, keys) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(RuleError::invalid_field(
            keys.join("."),
            DocumentKind::Mapping,
            DocumentKind::of(other),
        )),
    }
}

/// Remove a nested field, returning the removed value.
///
/// Missing intermediate mappings are not an error: there is nothing to remove.
pub fn nested_remove(doc: &mut Value, keys: &[&str]) -> Option<Value> {
    let (last, parents) = keys.split_last()?;
    let mut node = doc;
    for key in parents {
        node = node.as_object_mut()?.get_mut(*key)?;
    }
    node.as_object_mut()?.remove(*last)
}

/// Write a nested field, creating intermediate mappings as needed.
///
/// Fails if the root or an existing intermediate node is not a mapping.
pub fn nested_set(doc: &mut Value, keys: &[&str], value: Value) -> Result<(), RuleError> {
    let Some((last, parents)) = keys.split_last() else {
        *doc = value;
        return Ok(());
    };

    let mut node = doc;
    for (depth, key) in parents.iter().enumerate() {
        let map = as_mapping_mut(node, &keys[..depth])?;
        node = map
            .entry((*key).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if node.is_null() {
            *node = Value::Object(Map::new());
        }
    }
    as_mapping_mut(node, parents)?.insert((*last).to_string(), value);
    Ok(())
}

fn as_mapping_mut<'a>(node: &'a mut Value, at: &[&str]) -> Result<&'a mut Mapping, RuleError> {
    let found = DocumentKind::of(node);
    node.as_object_mut().ok_or_else(|| {
        let field = if at.is_empty() {
            ".".to_string()
        } else {
            at.join(".")
        };
        RuleError::invalid_field(field, DocumentKind::Mapping, found)
    })
}
