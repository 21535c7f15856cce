//! Partition-exchange sort over an index permutation.
//!
//! The elements never move: only `map` is permuted, and every comparison is
//! delegated to an index comparator. The comparator is expected to be a strict
//! total order over distinct indices (the comparator chain guarantees this by
//! falling back to index order), which is what makes the result stable even
//! though partition-exchange itself is not.
//!
//! Identical indices always compare `Equal` here, so the pivot stops both
//! scans and every partition pass shrinks its range. A comparator that is
//! otherwise inconsistent yields an unspecified permutation, never a hang.
//!
//! Pivot selection is deterministic (middle of the range, no randomization).
//! Already-sorted, reverse-sorted and duplicate-heavy inputs can therefore
//! approach O(N²) comparisons. Recursion always descends into the smaller
//! partition and loops over the larger one, so stack depth stays O(log N).

use std::cmp::Ordering;

/// Identity permutation `0..len`.
pub fn identity_map(len: usize) -> Vec<usize> {
    (0..len).collect()
}

/// Sort `0..len` under `compare` with two-pointer partition-exchange.
pub fn partition_exchange<F>(len: usize, mut compare: F) -> Vec<usize>
where
    F: FnMut(usize, usize) -> Ordering,
{
    let mut map = identity_map(len);
    if len > 1 {
        let mut compare = |a: usize, b: usize| {
            if a == b {
                Ordering::Equal
            } else {
                compare(a, b)
            }
        };
        quicksort(&mut map, 0, len as isize - 1, &mut compare);
    }
    map
}

/// Sort `0..len` under `compare` with the standard library's stable sort.
pub fn stable_merge<F>(len: usize, mut compare: F) -> Vec<usize>
where
    F: FnMut(usize, usize) -> Ordering,
{
    let mut map = identity_map(len);
    map.sort_by(|&a, &b| compare(a, b));
    map
}

fn quicksort<F>(map: &mut [usize], mut left: isize, mut right: isize, compare: &mut F)
where
    F: FnMut(usize, usize) -> Ordering,
{
    let len = map.len() as isize;
    loop {
        let mut i = left;
        let mut j = right;
        let pivot = map[(i + ((j - i) >> 1)) as usize];

        loop {
            while i < len && compare(pivot, map[i as usize]) == Ordering::Greater {
                i += 1;
            }
            while j >= 0 && compare(pivot, map[j as usize]) == Ordering::Less {
                j -= 1;
            }
            if i > j {
                break;
            }
            if i < j {
                map.swap(i as usize, j as usize);
            }
            i += 1;
            j -= 1;
            if i > j {
                break;
            }
        }

        // [left, j] and [i, right] remain; recurse into the smaller one.
        if j - left <= right - i {
            if left < j {
                quicksort(map, left, j, compare);
            }
            left = i;
        } else {
            if i < right {
                quicksort(map, i, right, compare);
            }
            right = j;
        }

        if left >= right {
            break;
        }
    }
}
