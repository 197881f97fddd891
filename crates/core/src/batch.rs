//! Fixed-size chunking and order-preserving de-duplication.
//!
//! Every remote call in this system is bounded by a batch size (payload and
//! query-cost limits differ per endpoint), so sequences are always split into
//! fixed-size chunks before fan-out.

use std::collections::HashSet;
use std::hash::Hash;

/// Split a slice into fixed-size chunks.
///
/// The last chunk may be smaller than `size`; it is never empty unless the
/// input is empty. A `size` of zero is clamped to one.
pub fn chunk<T>(items: &[T], size: usize) -> impl Iterator<Item = &[T]> {
    items.chunks(size.max(1))
}

/// Remove duplicates while preserving first-occurrence order.
#[must_use]
pub fn dedup<T: Clone + Eq + Hash>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .filter(|item| seen.insert((*item).clone()))
        .cloned()
        .collect()
}

/// Collect values that occur more than once, each reported once.
#[must_use]
pub fn duplicates<T: Clone + Eq + Hash>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    let mut reported = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        if !seen.insert(item) && reported.insert(item) {
            out.push(item.clone());
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_uneven_tail() {
        let items: Vec<u32> = (1..=101).collect();
        let chunks: Vec<&[u32]> = chunk(&items, 50).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 50);
        assert_eq!(chunks[0][0], 1);
        assert_eq!(chunks[1].len(), 50);
        assert_eq!(chunks[1][49], 100);
        assert_eq!(chunks[2], &[101]);
    }

    #[test]
    fn test_chunk_exact_fit() {
        let items: Vec<u32> = (1..=100).collect();
        let chunks: Vec<&[u32]> = chunk(&items, 50).collect();
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 50));
    }

    #[test]
    fn test_chunk_empty_input() {
        let items: Vec<u32> = vec![];
        assert_eq!(chunk(&items, 50).count(), 0);
    }

    #[test]
    fn test_chunk_zero_size_clamped() {
        let items = [1, 2, 3];
        let chunks: Vec<&[i32]> = chunk(&items, 0).collect();
        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn test_dedup_preserves_order() {
        let items = vec!["b", "a", "b", "c", "a"];
        assert_eq!(dedup(&items), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicates_reported_once() {
        let items = vec!["a", "b", "a", "a", "c", "b"];
        assert_eq!(duplicates(&items), vec!["a", "b"]);
    }
}
