//! Lockstep walk over a desired and an observed document.

use super::result::Difference;
use crate::config::ComparisonConfig;
use crate::error::{DeltaError, Result};
use crate::model::{DocumentKind, FieldPath, Mapping, PathSegment};
use serde_json::{Number, Value};
use std::collections::BTreeSet;

/// Accumulates differences during a single comparison.
pub(crate) struct DiffWalker<'a> {
    options: &'a ComparisonConfig,
    path: FieldPath,
    differences: Vec<Difference>,
}

impl<'a> DiffWalker<'a> {
    pub(crate) fn new(options: &'a ComparisonConfig) -> Self {
        Self {
            options,
            path: FieldPath::root(),
            differences: Vec::new(),
        }
    }

    /// Walk both documents from the root and return every difference found.
    ///
    /// On error nothing is returned; a partial list would be misleading.
    pub(crate) fn run(mut self, desired: &Value, observed: &Value) -> Result<Vec<Difference>> {
        self.walk(desired, observed, 0)?;
        Ok(self.differences)
    }

    fn walk(&mut self, desired: &Value, observed: &Value, depth: usize) -> Result<()> {
        match (desired, observed) {
            (Value::Object(d), Value::Object(o)) => {
                self.enter(depth)?;
                self.walk_mappings(d, o, depth)
            }
            (Value::Array(d), Value::Array(o)) => {
                self.enter(depth)?;
                self.walk_sequences(d, o, depth)
            }
            _ if DocumentKind::of(desired) != DocumentKind::of(observed) => {
                self.emit(Difference::type_mismatch(
                    self.path.clone(),
                    desired.clone(),
                    observed.clone(),
                ));
                Ok(())
            }
            _ => {
                if !self.scalars_equal(desired, observed) {
                    self.emit(Difference::changed(
                        self.path.clone(),
                        desired.clone(),
                        observed.clone(),
                    ));
                }
                Ok(())
            }
        }
    }

    fn enter(&self, depth: usize) -> Result<()> {
        if depth >= self.options.max_depth {
            return Err(DeltaError::malformed(
                self.path.to_string(),
                format!(
                    "nesting exceeds the maximum depth of {}",
                    self.options.max_depth
                ),
            ));
        }
        Ok(())
    }

    fn walk_mappings(
        &mut self,
        desired: &Mapping,
        observed: &Mapping,
        depth: usize,
    ) -> Result<()> {
        // Sorted explicitly: the map's own iteration order depends on serde_json features.
        let keys: BTreeSet<&String> = desired.keys().chain(observed.keys()).collect();
        for key in keys {
            let segment = PathSegment::Key(key.clone());
            match (desired.get(key), observed.get(key)) {
                (Some(d), Some(o)) => {
                    self.path.push(segment);
                    let walked = self.walk(d, o, depth + 1);
                    self.path.pop();
                    walked?;
                }
                (Some(d), None) => {
                    self.emit(Difference::removed(self.path.child(segment), d.clone()));
                }
                (None, Some(o)) => {
                    self.emit(Difference::added(self.path.child(segment), o.clone()));
                }
                (None, None) => {}
            }
        }
        Ok(())
    }

    fn walk_sequences(
        &mut self,
        desired: &[Value],
        observed: &[Value],
        depth: usize,
    ) -> Result<()> {
        let common = desired.len().min(observed.len());
        for (idx, (d, o)) in desired.iter().zip(observed).enumerate() {
            self.path.push(PathSegment::Index(idx));
            let walked = self.walk(d, o, depth + 1);
            self.path.pop();
            walked?;
        }
        for (idx, d) in desired.iter().enumerate().skip(common) {
            self.emit(Difference::removed(self.path.child(idx), d.clone()));
        }
        for (idx, o) in observed.iter().enumerate().skip(common) {
            self.emit(Difference::added(self.path.child(idx), o.clone()));
        }
        Ok(())
    }

    fn scalars_equal(&self, desired: &Value, observed: &Value) -> bool {
        match (desired, observed) {
            (Value::Number(d), Value::Number(o)) if self.options.numeric_equivalence => {
                numbers_equivalent(d, o)
            }
            _ => desired == observed,
        }
    }

    fn emit(&mut self, difference: Difference) {
        tracing::trace!(path = %difference.path, kind = %difference.kind, "Difference");
        self.differences.push(difference);
    }
}

/// Integers compare exactly. A float equals an integer only when it has no
/// fractional part and converts to that same integer without loss, so `1`
/// and `1.0` are equal but `2^53 + 1` and `2^53 as f64` are not.
fn numbers_equivalent(a: &Number, b: &Number) -> bool {
    if a == b {
        return true;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) if a.is_f64() && b.is_f64() => x == y,
        (Some(x), _) if a.is_f64() => float_equals_integer(x, b),
        (_, Some(y)) if b.is_f64() => float_equals_integer(y, a),
        _ => false,
    }
}

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

fn float_equals_integer(float: f64, integer: &Number) -> bool {
    if !float.is_finite() || float.fract() != 0.0 {
        return false;
    }
    // Range checks first: `as` saturates out-of-range floats.
    if let Some(i) = integer.as_i64() {
        return (-TWO_POW_63..TWO_POW_63).contains(&float) && float as i64 == i;
    }
    if let Some(u) = integer.as_u64() {
        return (0.0..TWO_POW_64).contains(&float) && float as u64 == u;
    }
    false
}
