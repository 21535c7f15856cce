//! Deferred ordered sequence.
//!
//! Composition (`order_by`, `then_by`, ...) is cheap and never touches the
//! source. Each drain runs the whole pipeline from scratch:
//!
//! 1. materialize the source into a dense buffer (arrival order),
//! 2. compute every link's keys over that buffer, primary key first,
//! 3. sort an index permutation with the chain as comparator,
//! 4. drop the key buffers, then re-emit elements through the permutation,
//!    one per poll.
//!
//! Drains share nothing, so a sequence can be drained again (or concurrently)
//! without caching. Dropping the stream at any point releases the buffers.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use lazyq_core::config::SortConfig;
use lazyq_core::sequence::to_vec_with_hint;
use lazyq_core::{AsyncSequence, CancelSignal, Cancelled, SeqStream};

use crate::chain::{ChainKeys, ChainNode, Link};
use crate::key::{key_fn, Direction, KeyComparer, KeyExtractor, NaturalOrder};
use crate::metrics::{self, SortStats};
use crate::sort::sort_indices;

pub struct OrderedSequence<S: AsyncSequence> {
    source: Arc<S>,
    head: Arc<ChainNode<S::Item, S::Error>>,
    config: SortConfig,
}

impl<S: AsyncSequence> Clone for OrderedSequence<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            head: Arc::clone(&self.head),
            config: self.config.clone(),
        }
    }
}

impl<S> OrderedSequence<S>
where
    S: AsyncSequence,
    S::Item: Sync + 'static,
    S::Error: From<Cancelled> + 'static,
{
    /// Chain of length one over `source`.
    pub fn new<X, C>(source: Arc<S>, extractor: X, comparer: C, direction: Direction) -> Self
    where
        X: KeyExtractor<S::Item, S::Error> + 'static,
        C: KeyComparer<X::Key> + 'static,
    {
        Self {
            source,
            head: ChainNode::root(Box::new(Link::new(extractor, comparer, direction))),
            config: SortConfig::default(),
        }
    }

    /// Add a tie-break key consulted only where every existing key compares
    /// equal. `self` is left untouched.
    pub fn then_by_key<X, C>(&self, extractor: X, comparer: C, direction: Direction) -> Self
    where
        X: KeyExtractor<S::Item, S::Error> + 'static,
        C: KeyComparer<X::Key> + 'static,
    {
        Self {
            source: Arc::clone(&self.source),
            head: ChainNode::wrap(
                &self.head,
                Box::new(Link::new(extractor, comparer, direction)),
            ),
            config: self.config.clone(),
        }
    }

    pub fn then_by<K, F>(&self, f: F) -> Self
    where
        F: Fn(&S::Item) -> K + Send + Sync + 'static,
        K: Ord + Send + Sync + 'static,
    {
        self.then_by_key(key_fn::<S::Item, K, F>(f), NaturalOrder, Direction::Ascending)
    }

    pub fn then_by_descending<K, F>(&self, f: F) -> Self
    where
        F: Fn(&S::Item) -> K + Send + Sync + 'static,
        K: Ord + Send + Sync + 'static,
    {
        self.then_by_key(key_fn::<S::Item, K, F>(f), NaturalOrder, Direction::Descending)
    }

    pub fn then_by_with<K, F, C>(&self, f: F, comparer: C) -> Self
    where
        F: Fn(&S::Item) -> K + Send + Sync + 'static,
        K: Send + Sync + 'static,
        C: KeyComparer<K> + 'static,
    {
        self.then_by_key(key_fn::<S::Item, K, F>(f), comparer, Direction::Ascending)
    }

    pub fn then_by_descending_with<K, F, C>(&self, f: F, comparer: C) -> Self
    where
        F: Fn(&S::Item) -> K + Send + Sync + 'static,
        K: Send + Sync + 'static,
        C: KeyComparer<K> + 'static,
    {
        self.then_by_key(key_fn::<S::Item, K, F>(f), comparer, Direction::Descending)
    }

    pub fn with_config(mut self, config: SortConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Number of composed keys.
    pub fn depth(&self) -> usize {
        self.head.depth()
    }

    /// Start an independent drain observing `cancel`.
    ///
    /// Cancellation is checked before each upstream element, before each key
    /// extraction and before each yielded element. Once observed the stream
    /// yields one `Err(Cancelled.into())` and ends. Upstream and key errors are
    /// yielded unchanged, also as the final item.
    pub fn drain(&self, cancel: &CancelSignal) -> SeqStream<'_, S::Item, S::Error> {
        let cancel = cancel.clone();
        stream::unfold(Drain::Pending, move |state| {
            let cancel = cancel.clone();
            async move {
                let mut sorted = match state {
                    Drain::Pending => match self.sort(&cancel).await {
                        Ok(sorted) => sorted,
                        Err(err) => return Some((Err(err), Drain::Finished)),
                    },
                    Drain::Emitting(sorted) => sorted,
                    Drain::Finished => return None,
                };

                if sorted.remaining() == 0 {
                    return None;
                }
                if let Err(cancelled) = cancel.check() {
                    metrics::cancelled("emit");
                    return Some((Err(cancelled.into()), Drain::Finished));
                }
                let item = sorted.next()?;
                Some((Ok(item), Drain::Emitting(sorted)))
            }
        })
        .boxed()
    }

    async fn sort(&self, cancel: &CancelSignal) -> Result<SortedBuffer<S::Item>, S::Error> {
        metrics::drain_started(self.depth());

        let elements =
            to_vec_with_hint(self.source.as_ref(), cancel, self.config.buffer_capacity_hint)
                .await?;
        if elements.is_empty() {
            return Ok(SortedBuffer::new(elements, Vec::new()));
        }

        // Key buffers live only until the permutation exists.
        let map = {
            let mut keys = ChainKeys::new(&self.head);
            keys.compute(&elements, cancel).await?;

            let mut comparisons = 0usize;
            let map = sort_indices(self.config.strategy, elements.len(), |i, j| {
                comparisons += 1;
                keys.compare_by_index(i, j)
            });
            metrics::sorted(
                self.config.strategy,
                SortStats {
                    elements: elements.len(),
                    links: keys.links(),
                    comparisons,
                },
            );
            map
        };

        Ok(SortedBuffer::new(elements, map))
    }
}

impl<S> AsyncSequence for OrderedSequence<S>
where
    S: AsyncSequence,
    S::Item: Sync + 'static,
    S::Error: From<Cancelled> + 'static,
{
    type Item = S::Item;
    type Error = S::Error;

    fn begin(&self) -> SeqStream<'_, S::Item, S::Error> {
        self.drain(&CancelSignal::new())
    }

    fn begin_cancellable(&self, cancel: &CancelSignal) -> SeqStream<'_, S::Item, S::Error> {
        self.drain(cancel)
    }
}

enum Drain<T> {
    Pending,
    Emitting(SortedBuffer<T>),
    Finished,
}

/// Materialized elements plus the permutation that orders them.
struct SortedBuffer<T> {
    slots: Vec<Option<T>>,
    order: std::vec::IntoIter<usize>,
}

impl<T> SortedBuffer<T> {
    fn new(elements: Vec<T>, map: Vec<usize>) -> Self {
        Self {
            slots: elements.into_iter().map(Some).collect(),
            order: map.into_iter(),
        }
    }

    fn remaining(&self) -> usize {
        self.order.len()
    }
}

impl<T> Iterator for SortedBuffer<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let idx = self.order.next()?;
        // Each index appears once in a permutation.
        self.slots[idx].take()
    }
}
