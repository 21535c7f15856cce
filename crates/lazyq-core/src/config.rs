//! Sort configuration that downstream crates can serialize/deserialize.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How the permutation map is computed once all keys are known.
///
/// Both strategies produce identical output: the comparator always falls back
/// to source position, so it is a strict total order over distinct indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortStrategy {
    /// In-place two-pointer quicksort over the index array (no pivot
    /// randomization; sorted and duplicate-heavy inputs approach O(N²)).
    #[default]
    PartitionExchange,
    /// The standard library's stable merge sort over the same comparator.
    StableMerge,
}

impl SortStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortStrategy::PartitionExchange => "partition_exchange",
            SortStrategy::StableMerge => "stable_merge",
        }
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "partition_exchange" | "quicksort" => Ok(SortStrategy::PartitionExchange),
            "stable_merge" | "merge" => Ok(SortStrategy::StableMerge),
            other => Err(Error::Config(format!("unknown sort strategy '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Index sort algorithm used after key extraction.
    #[serde(default)]
    pub strategy: SortStrategy,

    /// Initial capacity of the materialized element buffer. `None` lets the
    /// buffer grow from the source's size hint.
    #[serde(default)]
    pub buffer_capacity_hint: Option<usize>,
}

impl SortConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `LAZYQ_SORT_STRATEGY`: `partition_exchange` or `stable_merge`
    /// - `LAZYQ_BUFFER_CAPACITY_HINT`: initial buffer capacity (elements)
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("LAZYQ_SORT_STRATEGY") {
            if let Ok(v) = s.parse::<SortStrategy>() {
                cfg.strategy = v;
            }
        }

        if let Ok(s) = std::env::var("LAZYQ_BUFFER_CAPACITY_HINT") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.buffer_capacity_hint = Some(v);
            }
        }

        cfg
    }

    pub fn with_strategy(mut self, strategy: SortStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_buffer_capacity_hint(mut self, capacity: usize) -> Self {
        self.buffer_capacity_hint = Some(capacity);
        self
    }
}
