//! `order_by` entry points on every `AsyncSequence`.

use std::sync::Arc;

use lazyq_core::{AsyncSequence, Cancelled};

use crate::key::{key_fn, Direction, KeyComparer, KeyExtractor, NaturalOrder};
use crate::ordered::OrderedSequence;

pub trait OrderingExt: AsyncSequence + Sized
where
    Self::Item: Sync + 'static,
    Self::Error: From<Cancelled> + 'static,
{
    /// Order by an arbitrary extractor, comparer and direction.
    fn order_by_key<X, C>(
        self,
        extractor: X,
        comparer: C,
        direction: Direction,
    ) -> OrderedSequence<Self>
    where
        X: KeyExtractor<Self::Item, Self::Error> + 'static,
        C: KeyComparer<X::Key> + 'static,
    {
        OrderedSequence::new(Arc::new(self), extractor, comparer, direction)
    }

    fn order_by<K, F>(self, f: F) -> OrderedSequence<Self>
    where
        F: Fn(&Self::Item) -> K + Send + Sync + 'static,
        K: Ord + Send + Sync + 'static,
    {
        self.order_by_key(key_fn::<Self::Item, K, F>(f), NaturalOrder, Direction::Ascending)
    }

    fn order_by_descending<K, F>(self, f: F) -> OrderedSequence<Self>
    where
        F: Fn(&Self::Item) -> K + Send + Sync + 'static,
        K: Ord + Send + Sync + 'static,
    {
        self.order_by_key(key_fn::<Self::Item, K, F>(f), NaturalOrder, Direction::Descending)
    }

    fn order_by_with<K, F, C>(self, f: F, comparer: C) -> OrderedSequence<Self>
    where
        F: Fn(&Self::Item) -> K + Send + Sync + 'static,
        K: Send + Sync + 'static,
        C: KeyComparer<K> + 'static,
    {
        self.order_by_key(key_fn::<Self::Item, K, F>(f), comparer, Direction::Ascending)
    }

    fn order_by_descending_with<K, F, C>(self, f: F, comparer: C) -> OrderedSequence<Self>
    where
        F: Fn(&Self::Item) -> K + Send + Sync + 'static,
        K: Send + Sync + 'static,
        C: KeyComparer<K> + 'static,
    {
        self.order_by_key(key_fn::<Self::Item, K, F>(f), comparer, Direction::Descending)
    }
}

impl<S> OrderingExt for S
where
    S: AsyncSequence,
    S::Item: Sync + 'static,
    S::Error: From<Cancelled> + 'static,
{
}
