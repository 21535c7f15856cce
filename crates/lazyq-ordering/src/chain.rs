//! Comparator chain for composed `order_by(..).then_by(..)` keys.
//!
//! Composition builds a persistent singly-linked list of `ChainNode`s: every
//! `then_by` wraps the previous head as its parent, so the primary key sits at
//! the root and the newest tie-break key at the head. Nothing is evaluated at
//! composition time.
//!
//! At drain time the list is flattened primary-first into `ChainKeys`, one key
//! buffer per link, all sharing the element buffer's index space. Comparison
//! walks the buffers in priority order and falls back to comparing the indices
//! themselves, which makes the order a strict total order over distinct
//! indices and therefore stable.

use std::cmp::Ordering;
use std::sync::Arc;

use futures::future::BoxFuture;
use lazyq_core::{CancelSignal, Cancelled};

use crate::key::{Direction, KeyComparer, KeyExtractor};
use crate::metrics;

/// One composed key. Immutable once built.
pub(crate) trait ChainLink<T, E>: Send + Sync {
    /// Fresh, empty key storage for one drain.
    fn key_buffer(&self) -> Box<dyn KeyBuffer<T, E> + '_>;
}

/// Keys for every element of one drain's buffer, for a single link.
pub(crate) trait KeyBuffer<T, E>: Send {
    fn compute<'a>(
        &'a mut self,
        elements: &'a [T],
        cancel: &'a CancelSignal,
    ) -> BoxFuture<'a, Result<(), E>>;

    /// Oriented comparison of the keys at `i` and `j`.
    fn compare(&self, i: usize, j: usize) -> Ordering;
}

pub(crate) struct Link<X, C> {
    extractor: X,
    comparer: C,
    direction: Direction,
}

impl<X, C> Link<X, C> {
    pub(crate) fn new(extractor: X, comparer: C, direction: Direction) -> Self {
        Self {
            extractor,
            comparer,
            direction,
        }
    }
}

impl<T, E, X, C> ChainLink<T, E> for Link<X, C>
where
    T: Sync + 'static,
    E: From<Cancelled> + Send + 'static,
    X: KeyExtractor<T, E>,
    C: KeyComparer<X::Key>,
{
    fn key_buffer(&self) -> Box<dyn KeyBuffer<T, E> + '_> {
        Box::new(LinkKeys {
            link: self,
            keys: Vec::new(),
        })
    }
}

struct LinkKeys<'l, K, X, C> {
    link: &'l Link<X, C>,
    keys: Vec<K>,
}

impl<'l, T, E, K, X, C> KeyBuffer<T, E> for LinkKeys<'l, K, X, C>
where
    T: Sync + 'static,
    E: From<Cancelled> + Send + 'static,
    K: Send + Sync + 'static,
    X: KeyExtractor<T, E, Key = K>,
    C: KeyComparer<K>,
{
    fn compute<'a>(
        &'a mut self,
        elements: &'a [T],
        cancel: &'a CancelSignal,
    ) -> BoxFuture<'a, Result<(), E>> {
        Box::pin(async move {
            self.keys.clear();
            self.keys.reserve_exact(elements.len());
            for item in elements {
                if let Err(cancelled) = cancel.check() {
                    metrics::cancelled("extract_keys");
                    return Err(cancelled.into());
                }
                let key = self.link.extractor.extract(item).await?;
                self.keys.push(key);
            }
            Ok::<(), E>(())
        })
    }

    fn compare(&self, i: usize, j: usize) -> Ordering {
        let ord = self.link.comparer.compare(&self.keys[i], &self.keys[j]);
        self.link.direction.apply(ord)
    }
}

pub(crate) struct ChainNode<T, E> {
    link: Box<dyn ChainLink<T, E>>,
    parent: Option<Arc<ChainNode<T, E>>>,
}

impl<T, E> ChainNode<T, E> {
    /// Chain of length one (the primary key).
    pub(crate) fn root(link: Box<dyn ChainLink<T, E>>) -> Arc<Self> {
        Arc::new(Self { link, parent: None })
    }

    /// New head consulted only when every key in `parent` ties.
    pub(crate) fn wrap(parent: &Arc<Self>, link: Box<dyn ChainLink<T, E>>) -> Arc<Self> {
        Arc::new(Self {
            link,
            parent: Some(Arc::clone(parent)),
        })
    }

    pub(crate) fn depth(&self) -> usize {
        let mut depth = 1;
        let mut node = self;
        while let Some(parent) = node.parent.as_deref() {
            depth += 1;
            node = parent;
        }
        depth
    }

    /// Links in priority order, primary key first.
    fn links(&self) -> Vec<&dyn ChainLink<T, E>> {
        let mut links = Vec::with_capacity(self.depth());
        let mut node = Some(self);
        while let Some(n) = node {
            links.push(n.link.as_ref());
            node = n.parent.as_deref();
        }
        links.reverse();
        links
    }
}

/// Per-drain key buffers for a whole chain, primary key first.
pub(crate) struct ChainKeys<'c, T, E> {
    buffers: Vec<Box<dyn KeyBuffer<T, E> + 'c>>,
}

impl<'c, T, E> ChainKeys<'c, T, E> {
    pub(crate) fn new(head: &'c ChainNode<T, E>) -> Self {
        let buffers = head.links().into_iter().map(|l| l.key_buffer()).collect();
        Self { buffers }
    }

    pub(crate) fn links(&self) -> usize {
        self.buffers.len()
    }

    /// Extract keys link by link (primary first), each over the whole buffer.
    pub(crate) async fn compute(&mut self, elements: &[T], cancel: &CancelSignal) -> Result<(), E> {
        for buffer in &mut self.buffers {
            buffer.compute(elements, cancel).await?;
        }
        Ok(())
    }

    pub(crate) fn compare_by_index(&self, i: usize, j: usize) -> Ordering {
        // An element always ties with itself, whatever the comparers claim.
        if i == j {
            return Ordering::Equal;
        }
        for buffer in &self.buffers {
            match buffer.compare(i, j) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        i.cmp(&j)
    }
}
