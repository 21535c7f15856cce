#![forbid(unsafe_code)]
//! lazyq-ordering: deferred multi-key ordering over async sequences.
//!
//! `seq.order_by(..)` returns an `OrderedSequence` that records its key chain
//! and does nothing until drained. `then_by` adds tie-break keys. Every drain
//! materializes the source, extracts keys, index-sorts and re-emits.
//!
//! - `key`: key extractors, comparers and direction.
//! - `chain`: the composed comparator chain (internal).
//! - `sort`: index permutation sorts.
//! - `ordered`: the deferred ordered sequence.
//! - `ext`: `order_by` entry points on any `AsyncSequence`.
//! - `fields`: runtime field-path ordering over JSON records.

mod chain;
pub mod ext;
pub mod fields;
pub mod key;
mod metrics;
pub mod ordered;
pub mod sort;

pub use ext::OrderingExt;
pub use fields::{FieldKey, ScalarOrder, SortKeySpec, SortSpec};
pub use key::{
    async_key, comparer_fn, key_fn, try_key, Direction, KeyComparer, KeyExtractor, NaturalOrder,
};
pub use ordered::OrderedSequence;
