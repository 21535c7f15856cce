//! Drain tracing hooks (feature: `tracing`).
//!
//! Without the feature every hook compiles to nothing.

use lazyq_core::config::SortStrategy;

/// Bookkeeping for one completed sort.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SortStats {
    pub elements: usize,
    pub links: usize,
    pub comparisons: usize,
}

#[cfg(feature = "tracing")]
pub(crate) fn drain_started(links: usize) {
    tracing::trace!(links, "ordered drain started");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn drain_started(_links: usize) {}

#[cfg(feature = "tracing")]
pub(crate) fn sorted(strategy: SortStrategy, stats: SortStats) {
    tracing::debug!(
        strategy = %strategy,
        elements = stats.elements,
        links = stats.links,
        comparisons = stats.comparisons,
        "sorted buffer"
    );
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn sorted(_strategy: SortStrategy, _stats: SortStats) {}

/// Cancellation observed at `phase` (`extract_keys`, `emit`).
#[cfg(feature = "tracing")]
pub(crate) fn cancelled(phase: &'static str) {
    tracing::debug!(phase, "ordered drain cancelled");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn cancelled(_phase: &'static str) {}
