//! Record model and dot-path field resolution.
//!
//! Values are plain `serde_json::Value`s. Resolution never fails: a path that
//! cannot be followed resolves to `None`, the "absent" sentinel.

use serde_json::{Map, Number, Value};
use std::cmp::Ordering;

/// A stored item whose fields can be addressed by dot-separated path.
pub trait Record {
    /// Resolve `path` (e.g. `"address.city"` or `"tags.0"`) against this record.
    fn field(&self, path: &str) -> Option<&Value>;
}

impl Record for Value {
    fn field(&self, path: &str) -> Option<&Value> {
        resolve_path(self, path)
    }
}

impl Record for Map<String, Value> {
    fn field(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        walk(self.get(first)?, segments)
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, path: &str) -> Option<&Value> {
        (**self).field(path)
    }
}

/// Resolve a dot-separated path on a JSON value.
///
/// Objects are walked by key, arrays by numeric index. A non-numeric segment
/// against an array, or any segment against a scalar, yields `None`.
pub fn resolve_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    walk(root, path.split('.'))
}

fn walk<'a, 's>(start: &'a Value, segments: impl Iterator<Item = &'s str>) -> Option<&'a Value> {
    let mut current = start;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// `None` and JSON `null` are both "no value" for sorting purposes.
pub fn is_nullish(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Type-and-value equality.
///
/// Numbers compare by numeric value (`1` equals `1.0`); everything else must
/// share its JSON type. `"1"` never equals `1`.
pub fn strict_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b) == Ordering::Equal,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| strict_eq(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, x)| b.get(k).is_some_and(|y| strict_eq(x, y)))
        }
        _ => left == right,
    }
}

/// Native ordering between two values.
///
/// Within a JSON type:
/// - Numbers: numerically
/// - Strings: lexicographically
/// - Booleans: `false < true`
/// - Arrays, and objects, are all `Equal` to each other
///
/// Across types the order is
/// `null < bool < number < string < array < object`, so the result is a
/// total order and safe to hand to `slice::sort_by`.
pub fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(a, b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => type_rank(left).cmp(&type_rank(right)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

enum Numeric {
    Int(i128),
    Float(f64),
}

impl From<&Number> for Numeric {
    fn from(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            Numeric::Int(i128::from(i))
        } else if let Some(u) = n.as_u64() {
            Numeric::Int(i128::from(u))
        } else {
            // `+ 0.0` folds -0.0 into 0.0.
            Numeric::Float(n.as_f64().unwrap_or(0.0) + 0.0)
        }
    }
}

// Integers are compared exactly; an integer against a float goes through
// f64 first and falls back to the exact integer value on a tie, which keeps
// the order transitive past 2^53.
fn compare_numbers(a: &Number, b: &Number) -> Ordering {
    match (Numeric::from(a), Numeric::from(b)) {
        (Numeric::Int(x), Numeric::Int(y)) => x.cmp(&y),
        (Numeric::Float(x), Numeric::Float(y)) => x.total_cmp(&y),
        (Numeric::Int(x), Numeric::Float(y)) => compare_int_float(x, y),
        (Numeric::Float(x), Numeric::Int(y)) => compare_int_float(y, x).reverse(),
    }
}

fn compare_int_float(int: i128, float: f64) -> Ordering {
    match (int as f64).total_cmp(&float) {
        // `float` is integral and at most 2^64 here, so the cast is exact.
        Ordering::Equal => int.cmp(&(float as i128)),
        other => other,
    }
}
