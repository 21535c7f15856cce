#![forbid(unsafe_code)]
//! lazyq-core: the pieces every lazyq operator shares.
//!
//! - `sequence`: the re-drainable async sequence protocol and its constructors.
//! - `cancel`: cooperative cancellation signal checked at resumption points.
//! - `config`: sort configuration (strategy, buffer sizing), env-overridable.
//! - `error`: canonical error taxonomy.
//! - `types`: dynamic `Scalar` key values and their total order.
//!
//! No executor lives here. Everything is runtime-agnostic `futures` code.

pub mod cancel;
pub mod config;
pub mod error;
pub mod prelude;
pub mod sequence;
pub mod types;

pub use cancel::CancelSignal;
pub use error::{Cancelled, Error, Result};
pub use sequence::{AsyncSequence, SeqStream};
