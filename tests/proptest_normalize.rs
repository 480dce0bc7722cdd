//! Property-based tests for normalization and comparison.
//!
//! Generates arbitrary document trees and checks the invariants every
//! comparison must hold regardless of shape.

use proptest::prelude::*;
use resource_delta::{Comparator, DifferenceKind, NormalizerRegistry};
use serde_json::{Map, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9]{0,8}".prop_map(Value::String),
    ]
}

fn document() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn secret() -> impl Strategy<Value = Value> {
    (
        prop::collection::btree_map("[a-z]{1,6}", "\\PC{0,16}", 0..6),
        prop::collection::btree_map("[a-z]{1,6}", "[A-Za-z0-9+/=]{0,12}", 0..6),
    )
        .prop_map(|(string_data, data)| {
            let mut doc = Map::new();
            doc.insert("kind".into(), Value::from("Secret"));
            doc.insert(
                "stringData".into(),
                Value::Object(
                    string_data
                        .into_iter()
                        .map(|(k, v)| (k, Value::String(v)))
                        .collect(),
                ),
            );
            doc.insert(
                "data".into(),
                Value::Object(
                    data.into_iter()
                        .map(|(k, v)| (k, Value::String(v)))
                        .collect(),
                ),
            );
            Value::Object(doc)
        })
}

/// An optional field value: absent, null, a mapping of strings or nested
/// trees, or any other document.
fn optional_field() -> impl Strategy<Value = Option<Value>> {
    let entry = prop_oneof!["[a-z0-9]{0,8}".prop_map(Value::String), document()];
    prop_oneof![
        Just(None),
        Just(Some(Value::Null)),
        prop::collection::btree_map("[a-z]{1,6}", entry, 0..4)
            .prop_map(|m| Some(Value::Object(m.into_iter().collect()))),
        document().prop_map(Some),
    ]
}

/// Arbitrary documents, some of them shaped like Secrets whose `stringData`
/// and `data` hold arbitrary values.
fn resource() -> impl Strategy<Value = Value> {
    let shaped = (document(), any::<bool>(), optional_field(), optional_field()).prop_map(
        |(base, secret, string_data, data)| {
            let mut doc = match base {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            if secret {
                doc.insert("kind".into(), Value::from("Secret"));
            }
            if let Some(v) = string_data {
                doc.insert("stringData".into(), v);
            }
            if let Some(v) = data {
                doc.insert("data".into(), v);
            }
            Value::Object(doc)
        },
    );
    prop_oneof![document(), shaped]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn compare_with_self_is_empty(doc in document()) {
        let result = Comparator::default().compare(doc.clone(), doc).unwrap();
        prop_assert!(result.is_empty(), "{:?}", result.differences);
    }

    #[test]
    fn comparison_is_deterministic(a in document(), b in document()) {
        let comparator = Comparator::default();
        let first = comparator.compare(a.clone(), b.clone()).unwrap();
        let second = comparator.compare(a, b).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn absence_is_symmetric(a in document(), b in document()) {
        let comparator = Comparator::default();
        let forward = comparator.compare(a.clone(), b.clone()).unwrap();
        let backward = comparator.compare(b, a).unwrap();

        prop_assert_eq!(forward.summary.added, backward.summary.removed);
        prop_assert_eq!(forward.summary.removed, backward.summary.added);
        prop_assert_eq!(forward.summary.changed, backward.summary.changed);
        prop_assert_eq!(forward.summary.type_mismatches, backward.summary.type_mismatches);

        for diff in forward.of_kind(DifferenceKind::Added) {
            let mirrored = backward.find(&diff.path);
            prop_assert!(mirrored.is_some_and(|m| m.kind == DifferenceKind::Removed));
        }
    }

    #[test]
    fn normalization_is_idempotent(doc in resource()) {
        let registry = NormalizerRegistry::with_builtin_rules();
        if let Ok(once) = registry.normalize(&doc) {
            let twice = registry.normalize(&once);
            prop_assert!(twice.is_ok(), "{:?} failed on second pass: {:?}", once, twice);
            prop_assert_eq!(twice.unwrap(), once);
        }
    }

    #[test]
    fn secret_normalization_is_idempotent(doc in secret()) {
        let registry = NormalizerRegistry::with_builtin_rules();
        let once = registry.normalize(&doc).unwrap();
        let twice = registry.normalize(&once).unwrap();
        prop_assert_eq!(&once, &twice);
    }

    #[test]
    fn normalized_secret_equals_original(doc in secret()) {
        let registry = NormalizerRegistry::with_builtin_rules();
        let normalized = registry.normalize(&doc).unwrap();
        let result = Comparator::default().compare(doc, normalized).unwrap();
        prop_assert!(result.is_empty(), "{:?}", result.differences);
    }
}
