//! Point-in-time snapshots of a store's contents.

use crate::segment::Segment;
use crate::stats::StoreStats;
use std::iter::FusedIterator;
use std::sync::Arc;
use tracing::trace;

/// A lazily built, shared copy of a store's backing vector.
///
/// Callers must hold the store lock while calling either method; the cache
/// itself does no synchronization.
#[derive(Debug)]
pub(crate) struct CachedSnapshot<S> {
    slot: Option<Arc<[S]>>,
}

impl<S: Segment> CachedSnapshot<S> {
    pub(crate) const fn empty() -> Self {
        Self { slot: None }
    }

    /// Returns the cached snapshot, copying `segments` first if there is none.
    pub(crate) fn get_or_build(&mut self, segments: &[S], stats: &StoreStats) -> Arc<[S]> {
        if let Some(snapshot) = &self.slot {
            stats.record_snapshot_hit();
            return Arc::clone(snapshot);
        }

        let snapshot: Arc<[S]> = Arc::from(segments);
        trace!(len = snapshot.len(), "materialized segment snapshot");
        stats.record_snapshot_built();
        self.slot = Some(Arc::clone(&snapshot));
        snapshot
    }

    pub(crate) fn invalidate(&mut self) {
        self.slot = None;
    }
}

/// Iterator over a store snapshot.
///
/// The snapshot is immutable: segments added after the iterator was created
/// are not visible through it.
///
/// # Example
///
/// ```rust
/// use segstore_core::{BasicSegment, EagerSortedStore, SegmentStore};
///
/// let store = EagerSortedStore::new();
/// store.add(BasicSegment::new(4, 8).unwrap()).unwrap();
/// let iter = store.iter();
/// store.add(BasicSegment::new(2, 6).unwrap()).unwrap();
///
/// assert_eq!(iter.len(), 1);
/// assert_eq!(store.iter().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SegmentIter<S> {
    snapshot: Arc<[S]>,
    front: usize,
    back: usize,
}

impl<S: Segment> SegmentIter<S> {
    /// Creates an iterator over the whole snapshot.
    pub fn new(snapshot: Arc<[S]>) -> Self {
        let back = snapshot.len();
        Self {
            snapshot,
            front: 0,
            back,
        }
    }

    /// Returns the segments not yet yielded.
    pub fn as_slice(&self) -> &[S] {
        &self.snapshot[self.front..self.back]
    }

    /// Returns the shared snapshot backing this iterator.
    pub fn snapshot(&self) -> &Arc<[S]> {
        &self.snapshot
    }
}

impl<S: Segment> Iterator for SegmentIter<S> {
    type Item = S;

    fn next(&mut self) -> Option<S> {
        if self.front == self.back {
            return None;
        }
        let segment = self.snapshot[self.front].clone();
        self.front += 1;
        Some(segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<S: Segment> DoubleEndedIterator for SegmentIter<S> {
    fn next_back(&mut self) -> Option<S> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.snapshot[self.back].clone())
    }
}

impl<S: Segment> ExactSizeIterator for SegmentIter<S> {}

impl<S: Segment> FusedIterator for SegmentIter<S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::BasicSegment;

    fn segments() -> Vec<BasicSegment> {
        vec![
            BasicSegment::new(1, 2).unwrap(),
            BasicSegment::new(3, 4).unwrap(),
            BasicSegment::new(5, 6).unwrap(),
        ]
    }

    #[test]
    fn cache_reuses_snapshot_until_invalidated() {
        let stats = StoreStats::new();
        let mut cache = CachedSnapshot::empty();
        let data = segments();

        let first = cache.get_or_build(&data, &stats);
        let second = cache.get_or_build(&data, &stats);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(stats.snapshots_built(), 1);
        assert_eq!(stats.snapshot_hits(), 1);

        cache.invalidate();
        let third = cache.get_or_build(&data, &stats);
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(stats.snapshots_built(), 2);
    }

    #[test]
    fn iterates_both_ends() {
        let mut iter = SegmentIter::new(Arc::from(segments()));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(BasicSegment::new(1, 2).unwrap()));
        assert_eq!(iter.next_back(), Some(BasicSegment::new(5, 6).unwrap()));
        assert_eq!(iter.as_slice(), &[BasicSegment::new(3, 4).unwrap()]);
        assert_eq!(iter.next(), Some(BasicSegment::new(3, 4).unwrap()));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn empty_snapshot() {
        let mut iter: SegmentIter<BasicSegment> = SegmentIter::new(Arc::from(Vec::new()));
        assert_eq!(iter.len(), 0);
        assert!(iter.next().is_none());
    }
}
