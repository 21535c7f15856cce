//! Index sorting: turn an index comparator into a permutation map.

pub mod index;

use std::cmp::Ordering;

use lazyq_core::config::SortStrategy;

pub use index::{identity_map, partition_exchange, stable_merge};

/// Produce the permutation map for `len` elements with the configured strategy.
pub fn sort_indices<F>(strategy: SortStrategy, len: usize, compare: F) -> Vec<usize>
where
    F: FnMut(usize, usize) -> Ordering,
{
    match strategy {
        SortStrategy::PartitionExchange => partition_exchange(len, compare),
        SortStrategy::StableMerge => stable_merge(len, compare),
    }
}
