//! Key extraction and key comparison.
//!
//! Synchronous, fallible and suspending selectors all implement the single
//! `KeyExtractor` trait; a synchronous selector simply returns a future that
//! is already resolved.

use std::cmp::Ordering;
use std::future::Future;
use std::marker::PhantomData;

use futures::future::{self, BoxFuture};
use serde::{Deserialize, Serialize};

/// Produces the sort key for one element, possibly after suspending.
pub trait KeyExtractor<T, E>: Send + Sync {
    type Key: Send + Sync + 'static;

    fn extract<'a>(&'a self, item: &'a T) -> BoxFuture<'a, Result<Self::Key, E>>;
}

/// Infallible synchronous selector. See [`key_fn`].
pub struct SyncKey<F>(F);

/// Synchronous selector that may fail. See [`try_key`].
pub struct TryKey<F>(F);

/// Selector whose key is produced by a future. See [`async_key`].
pub struct AsyncKey<F>(F);

/// Wrap `Fn(&T) -> K`.
pub fn key_fn<T, K, F>(f: F) -> SyncKey<F>
where
    F: Fn(&T) -> K,
{
    SyncKey(f)
}

/// Wrap `Fn(&T) -> Result<K, E>`; an `Err` aborts the drain unchanged.
pub fn try_key<T, K, E, F>(f: F) -> TryKey<F>
where
    F: Fn(&T) -> Result<K, E>,
{
    TryKey(f)
}

/// Wrap `Fn(&T) -> impl Future<Output = Result<K, E>>`.
///
/// The future must own what it needs from the element (clone or copy the
/// fields before the `async move` block).
pub fn async_key<T, K, E, F, Fut>(f: F) -> AsyncKey<F>
where
    F: Fn(&T) -> Fut,
    Fut: Future<Output = Result<K, E>>,
{
    AsyncKey(f)
}

impl<T, E, K, F> KeyExtractor<T, E> for SyncKey<F>
where
    F: Fn(&T) -> K + Send + Sync,
    K: Send + Sync + 'static,
    E: Send + 'static,
{
    type Key = K;

    fn extract<'a>(&'a self, item: &'a T) -> BoxFuture<'a, Result<K, E>> {
        Box::pin(future::ready(Ok((self.0)(item))))
    }
}

impl<T, E, K, F> KeyExtractor<T, E> for TryKey<F>
where
    F: Fn(&T) -> Result<K, E> + Send + Sync,
    K: Send + Sync + 'static,
    E: Send + 'static,
{
    type Key = K;

    fn extract<'a>(&'a self, item: &'a T) -> BoxFuture<'a, Result<K, E>> {
        Box::pin(future::ready((self.0)(item)))
    }
}

impl<T, E, K, F, Fut> KeyExtractor<T, E> for AsyncKey<F>
where
    F: Fn(&T) -> Fut + Send + Sync,
    Fut: Future<Output = Result<K, E>> + Send + 'static,
    K: Send + Sync + 'static,
{
    type Key = K;

    fn extract<'a>(&'a self, item: &'a T) -> BoxFuture<'a, Result<K, E>> {
        Box::pin((self.0)(item))
    }
}

/// Three-way comparison between two keys.
pub trait KeyComparer<K>: Send + Sync {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// `Ord`-based comparison; the default comparer for typed keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaturalOrder;

impl<K: Ord> KeyComparer<K> for NaturalOrder {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Comparer built from a closure. See [`comparer_fn`].
pub struct FnComparer<K, F> {
    f: F,
    _key: PhantomData<fn(&K, &K)>,
}

pub fn comparer_fn<K, F>(f: F) -> FnComparer<K, F>
where
    F: Fn(&K, &K) -> Ordering + Send + Sync,
{
    FnComparer {
        f,
        _key: PhantomData,
    }
}

impl<K, F> KeyComparer<K> for FnComparer<K, F>
where
    F: Fn(&K, &K) -> Ordering + Send + Sync,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.f)(a, b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// Orient a comparer result.
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}
