//! The sequence protocol every lazyq operator consumes and produces.
//!
//! An `AsyncSequence` is a re-drainable factory: each call to `begin` hands out
//! a fresh `futures::Stream` of `Result<Item, Error>`. Polling the stream is
//! "advance + current"; dropping it releases whatever the drain holds, whether
//! it finished normally, was abandoned early, or stopped on an error.

use std::marker::PhantomData;
use std::sync::Arc;

use futures::stream::{self, BoxStream, Stream, StreamExt};

use crate::cancel::CancelSignal;
use crate::error::{Cancelled, Error};

/// One drain of a sequence.
pub type SeqStream<'a, T, E> = BoxStream<'a, std::result::Result<T, E>>;

pub trait AsyncSequence: Send + Sync {
    type Item: Send;
    type Error: Send;

    /// Start an independent drain.
    fn begin(&self) -> SeqStream<'_, Self::Item, Self::Error>;

    /// Start a drain that observes `cancel` at its resumption points.
    ///
    /// Plain sources have no resumption points of their own; operators that
    /// buffer or compute (ordering, materialization) override this.
    fn begin_cancellable(&self, cancel: &CancelSignal) -> SeqStream<'_, Self::Item, Self::Error> {
        let _ = cancel;
        self.begin()
    }
}

impl<S: AsyncSequence + ?Sized> AsyncSequence for Arc<S> {
    type Item = S::Item;
    type Error = S::Error;

    fn begin(&self) -> SeqStream<'_, Self::Item, Self::Error> {
        (**self).begin()
    }

    fn begin_cancellable(&self, cancel: &CancelSignal) -> SeqStream<'_, Self::Item, Self::Error> {
        (**self).begin_cancellable(cancel)
    }
}

impl<S: AsyncSequence + ?Sized> AsyncSequence for &S {
    type Item = S::Item;
    type Error = S::Error;

    fn begin(&self) -> SeqStream<'_, Self::Item, Self::Error> {
        (**self).begin()
    }

    fn begin_cancellable(&self, cancel: &CancelSignal) -> SeqStream<'_, Self::Item, Self::Error> {
        (**self).begin_cancellable(cancel)
    }
}

/// In-memory sequence; every drain yields clones of the stored items.
#[derive(Debug, Clone)]
pub struct VecSequence<T, E = Error> {
    items: Vec<T>,
    _error: PhantomData<fn() -> E>,
}

impl<T, E> VecSequence<T, E> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            _error: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T, E> AsyncSequence for VecSequence<T, E>
where
    T: Clone + Send + Sync,
    E: Send,
{
    type Item = T;
    type Error = E;

    fn begin(&self) -> SeqStream<'_, T, E> {
        stream::iter(self.items.iter().cloned().map(Ok)).boxed()
    }
}

/// Sequence backed by a stream factory, invoked once per drain.
pub struct FnSequence<F> {
    factory: F,
}

impl<F, St, T, E> AsyncSequence for FnSequence<F>
where
    F: Fn() -> St + Send + Sync,
    St: Stream<Item = std::result::Result<T, E>> + Send + 'static,
    T: Send,
    E: Send,
{
    type Item = T;
    type Error = E;

    fn begin(&self) -> SeqStream<'_, T, E> {
        (self.factory)().boxed()
    }
}

pub fn from_vec<T, E>(items: Vec<T>) -> VecSequence<T, E> {
    VecSequence::new(items)
}

pub fn from_iter<I, E>(items: I) -> VecSequence<I::Item, E>
where
    I: IntoIterator,
{
    VecSequence::new(items.into_iter().collect())
}

pub fn from_fn<F>(factory: F) -> FnSequence<F> {
    FnSequence { factory }
}

pub fn empty<T, E>() -> VecSequence<T, E> {
    VecSequence::new(Vec::new())
}

/// Drain `seq` into a dense buffer in arrival order.
pub async fn to_vec<S>(seq: &S, cancel: &CancelSignal) -> std::result::Result<Vec<S::Item>, S::Error>
where
    S: AsyncSequence + ?Sized,
    S::Error: From<Cancelled>,
{
    to_vec_with_hint(seq, cancel, None).await
}

/// Like [`to_vec`], pre-sizing the buffer with `capacity_hint` when given
/// (otherwise with the stream's lower size bound). The hint is advisory: a
/// reservation that cannot be satisfied is skipped.
///
/// `cancel` is checked before every pull from the upstream stream. The first
/// upstream error is returned unchanged and the stream is dropped.
pub async fn to_vec_with_hint<S>(
    seq: &S,
    cancel: &CancelSignal,
    capacity_hint: Option<usize>,
) -> std::result::Result<Vec<S::Item>, S::Error>
where
    S: AsyncSequence + ?Sized,
    S::Error: From<Cancelled>,
{
    let mut stream = seq.begin_cancellable(cancel);
    let capacity = capacity_hint.unwrap_or_else(|| stream.size_hint().0);
    let mut buffer = Vec::new();
    if buffer.try_reserve(capacity).is_err() {
        #[cfg(feature = "tracing")]
        tracing::debug!(capacity, "capacity hint not reserved");
    }

    loop {
        if let Err(cancelled) = cancel.check() {
            #[cfg(feature = "tracing")]
            tracing::debug!(materialized = buffer.len(), "materialize cancelled");
            return Err(cancelled.into());
        }
        match stream.next().await {
            Some(item) => buffer.push(item?),
            None => break,
        }
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(materialized = buffer.len(), "materialized sequence");

    Ok(buffer)
}
