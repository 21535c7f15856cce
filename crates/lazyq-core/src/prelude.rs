//! Convenient re-exports for downstream crates.

pub use crate::cancel::CancelSignal;
pub use crate::config::{SortConfig, SortStrategy};
pub use crate::error::{Cancelled, Error, Result};
pub use crate::sequence::{
    empty, from_fn, from_iter, from_vec, to_vec, to_vec_with_hint, AsyncSequence, FnSequence,
    SeqStream, VecSequence,
};
pub use crate::types::Scalar;
