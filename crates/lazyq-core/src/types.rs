//! Dynamic key values for ordering records whose shape is only known at runtime.
//!
//! Typed orderings use the key type the caller's extractor returns. `Scalar`
//! is the key type for field-path ordering over JSON records.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    Str(String),
    Bin(Vec<u8>),
}

impl Scalar {
    /// Convert one JSON value. Arrays and objects become their compact JSON
    /// text so they still order deterministically.
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Scalar::Null,
            Value::Bool(b) => Scalar::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Scalar::I64(i),
                None => Scalar::F64(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Scalar::Str(s.clone()),
            other => Scalar::Str(other.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    // Cross-type order: Null < Bool < numbers < Str < Bin.
    fn type_rank(&self) -> u8 {
        match self {
            Scalar::Null => 0,
            Scalar::Bool(_) => 1,
            Scalar::I64(_) | Scalar::F64(_) => 2,
            Scalar::Str(_) => 3,
            Scalar::Bin(_) => 4,
        }
    }

    /// Total order used for sorting.
    ///
    /// Nulls are sorted first, then values are compared by type. Integers and
    /// floats compare numerically; NaN sorts after every other number. An
    /// integer sorts before a float of equal value (`I64(1) < F64(1.0)`).
    pub fn total_cmp(&self, other: &Scalar) -> Ordering {
        use Scalar::*;

        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(x), Bool(y)) => x.cmp(y),
            (I64(x), I64(y)) => x.cmp(y),
            (F64(x), F64(y)) => f64_cmp(*x, *y),
            (I64(x), F64(y)) => f64_cmp(*x as f64, *y).then(Ordering::Less),
            (F64(x), I64(y)) => f64_cmp(*x, *y as f64).then(Ordering::Greater),
            (Str(x), Str(y)) => x.cmp(y),
            (Bin(x), Bin(y)) => x.cmp(y),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

fn f64_cmp(x: f64, y: f64) -> Ordering {
    if x.is_nan() && y.is_nan() {
        Ordering::Equal
    } else if x.is_nan() {
        Ordering::Greater
    } else if y.is_nan() {
        Ordering::Less
    } else {
        x.partial_cmp(&y).unwrap_or(Ordering::Equal)
    }
}
