#![forbid(unsafe_code)]
//! lazyq: deferred multi-key ordering over async sequences.
//!
//! ```ignore
//! use lazyq::prelude::*;
//!
//! let people = from_vec::<_, Error>(vec![("bob", 30), ("amy", 25), ("cat", 30)]);
//! let ordered = people.order_by(|p| p.1).then_by(|p| p.0);
//! let rows = to_vec(&ordered, &CancelSignal::new()).await?;
//! ```

pub use lazyq_core as core;
pub use lazyq_ordering as ordering;

pub use lazyq_core::{AsyncSequence, CancelSignal, Cancelled, Error, Result, SeqStream};
pub use lazyq_ordering::{OrderedSequence, OrderingExt, SortSpec};

pub mod prelude {
    pub use lazyq_core::prelude::*;
    pub use lazyq_ordering::{
        async_key, comparer_fn, key_fn, try_key, Direction, FieldKey, KeyComparer, KeyExtractor,
        NaturalOrder, OrderedSequence, OrderingExt, ScalarOrder, SortKeySpec, SortSpec,
    };
}
