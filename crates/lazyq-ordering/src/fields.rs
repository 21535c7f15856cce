//! Field-path ordering over JSON records.
//!
//! A `SortSpec` is the serde form of an `order_by(..).then_by(..)` chain whose
//! keys are dotted field paths, for callers that only know the ordering at
//! runtime (request parameters, config files).
//!
//! ```json
//! { "keys": [ { "field": "dept" }, { "field": "stats.age", "direction": "descending" } ] }
//! ```

use std::cmp::Ordering;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use lazyq_core::types::Scalar;
use lazyq_core::{AsyncSequence, Cancelled, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::key::{Direction, KeyComparer, KeyExtractor};
use crate::ordered::OrderedSequence;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub keys: Vec<SortKeySpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKeySpec {
    pub field: String,
    #[serde(default)]
    pub direction: Direction,
}

impl SortSpec {
    pub fn from_json(text: &str) -> Result<Self> {
        let spec: SortSpec = serde_json::from_str(text)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<()> {
        if self.keys.is_empty() {
            return Err(Error::null_source("keys"));
        }
        if self.keys.iter().any(|k| k.field.is_empty()) {
            return Err(Error::null_source("field"));
        }
        Ok(())
    }

    /// Build the ordered sequence: first key primary, the rest as tie-breaks.
    pub fn apply<S>(&self, source: S) -> Result<OrderedSequence<S>>
    where
        S: AsyncSequence<Item = Value>,
        S::Error: From<Cancelled> + 'static,
    {
        self.validate()?;
        let (first, rest) = match self.keys.split_first() {
            Some(split) => split,
            None => return Err(Error::null_source("keys")),
        };

        let mut ordered = OrderedSequence::new(
            Arc::new(source),
            FieldKey::new(&first.field),
            ScalarOrder,
            first.direction,
        );
        for key in rest {
            ordered = ordered.then_by_key(FieldKey::new(&key.field), ScalarOrder, key.direction);
        }
        Ok(ordered)
    }
}

/// Extracts the value at a dotted path, `Null` when any segment is missing.
#[derive(Debug, Clone)]
pub struct FieldKey {
    path: Vec<String>,
}

impl FieldKey {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.split('.').map(str::to_owned).collect(),
        }
    }

    pub fn lookup(&self, record: &Value) -> Scalar {
        let mut cur = record;
        for segment in &self.path {
            cur = match cur {
                Value::Object(map) => match map.get(segment) {
                    Some(v) => v,
                    None => return Scalar::Null,
                },
                Value::Array(items) => {
                    match segment.parse::<usize>().ok().and_then(|i| items.get(i)) {
                        Some(v) => v,
                        None => return Scalar::Null,
                    }
                }
                _ => return Scalar::Null,
            };
        }
        Scalar::from_json(cur)
    }
}

impl<E: Send + 'static> KeyExtractor<Value, E> for FieldKey {
    type Key = Scalar;

    fn extract<'a>(&'a self, item: &'a Value) -> BoxFuture<'a, std::result::Result<Scalar, E>> {
        future::ready(Ok(self.lookup(item))).boxed()
    }
}

/// `Scalar::total_cmp` as a comparer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarOrder;

impl KeyComparer<Scalar> for ScalarOrder {
    fn compare(&self, a: &Scalar, b: &Scalar) -> Ordering {
        a.total_cmp(b)
    }
}
