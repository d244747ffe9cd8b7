//! Segment store that keeps its vector sorted on every insert.

use crate::comparator::canonical;
use crate::error::{StoreError, StoreResult};
use crate::ingest::{collect_conforming, collect_strict};
use crate::segment::Segment;
use crate::snapshot::{CachedSnapshot, SegmentIter};
use crate::stats::StoreStats;
use crate::store::SegmentStore;
use parking_lot::{Mutex, RwLock};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// An always-sorted segment store behind a reader/writer lock.
///
/// Every [`add`](SegmentStore::add) is an ordered insert: a binary search
/// for the position after all equal `(start, end)` keys, then a shift.
/// Segments with equal keys therefore keep their insertion order.
///
/// Intersection queries binary-search for the first segment starting after
/// the query, and only filter the prefix before it.
///
/// # Thread Safety
///
/// Readers run in parallel with each other; a writer excludes everyone.
/// The snapshot cache has its own small lock, always taken after the
/// vector lock.
///
/// # Example
///
/// ```rust
/// use segstore_core::{BasicSegment, EagerSortedStore, SegmentStore};
///
/// let store = EagerSortedStore::new();
/// store.add(BasicSegment::new(4, 10).unwrap()).unwrap();
/// store.add(BasicSegment::new(1, 5).unwrap()).unwrap();
/// store.add(BasicSegment::new(2, 3).unwrap()).unwrap();
///
/// let hits = store.intersecting(3);
/// assert_eq!(hits, vec![BasicSegment::new(1, 5).unwrap(), BasicSegment::new(2, 3).unwrap()]);
/// ```
pub struct EagerSortedStore<S> {
    inner: RwLock<SortedInner<S>>,
    snapshot: Mutex<CachedSnapshot<S>>,
    stats: StoreStats,
}

struct SortedInner<S> {
    segments: Vec<S>,
    disposed: bool,
}

impl<S: Segment> EagerSortedStore<S> {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty store with room for `capacity` segments.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_sorted(Vec::with_capacity(capacity))
    }

    /// Creates a store holding `segments`, sorted immediately.
    #[must_use]
    pub fn from_segments(mut segments: Vec<S>) -> Self {
        segments.sort_by(canonical);
        Self::from_sorted(segments)
    }

    /// Creates a store from loosely typed input, dropping every element that
    /// does not convert into a segment.
    pub fn from_raw<T, I>(items: I) -> Self
    where
        S: TryFrom<T>,
        I: IntoIterator<Item = T>,
    {
        Self::from_segments(collect_conforming(items))
    }

    /// Creates a store from loosely typed input, failing on the first
    /// element that does not convert into a segment.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidArgument`] naming the offending element.
    pub fn try_from_raw<T, I>(items: I) -> StoreResult<Self>
    where
        S: TryFrom<T>,
        <S as TryFrom<T>>::Error: fmt::Display,
        I: IntoIterator<Item = T>,
    {
        Ok(Self::from_segments(collect_strict(items)?))
    }

    fn from_sorted(segments: Vec<S>) -> Self {
        Self {
            inner: RwLock::new(SortedInner {
                segments,
                disposed: false,
            }),
            snapshot: Mutex::new(CachedSnapshot::empty()),
            stats: StoreStats::new(),
        }
    }

    /// Index of the first segment whose start is after `position`.
    ///
    /// Every segment at or past this index starts too late to contain or
    /// overlap anything at `position`, whatever its end.
    fn start_bound(segments: &[S], position: i64) -> usize {
        segments.partition_point(|segment| segment.start() <= position)
    }
}

impl<S: Segment> Default for EagerSortedStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Segment + fmt::Debug> fmt::Debug for EagerSortedStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("EagerSortedStore")
            .field("len", &inner.segments.len())
            .field("disposed", &inner.disposed)
            .finish()
    }
}

impl<S: Segment> SegmentStore<S> for EagerSortedStore<S> {
    fn add(&self, segment: S) -> StoreResult<bool> {
        let mut inner = self.inner.write();
        if inner.disposed {
            self.stats.record_rejected_add();
            return Err(StoreError::Disposed);
        }

        let index = inner
            .segments
            .partition_point(|existing| canonical(existing, &segment) != Ordering::Greater);
        inner.segments.insert(index, segment);
        self.snapshot.lock().invalidate();
        self.stats.record_add();
        Ok(true)
    }

    fn len(&self) -> usize {
        self.inner.read().segments.len()
    }

    fn contains(&self, segment: &S) -> bool {
        self.inner.read().segments.contains(segment)
    }

    fn contains_all(&self, segments: &[S]) -> bool {
        let inner = self.inner.read();
        segments
            .iter()
            .all(|segment| inner.segments.contains(segment))
    }

    fn to_vec(&self) -> Vec<S> {
        self.inner.read().segments.clone()
    }

    fn copy_into(&self, buffer: &mut Vec<S>) {
        let inner = self.inner.read();
        buffer.clear();
        buffer.extend_from_slice(&inner.segments);
    }

    fn snapshot(&self) -> Arc<[S]> {
        let inner = self.inner.read();
        self.snapshot
            .lock()
            .get_or_build(&inner.segments, &self.stats)
    }

    fn intersecting(&self, position: i64) -> Vec<S> {
        self.stats.record_point_query();
        let inner = self.inner.read();
        let bound = Self::start_bound(&inner.segments, position);
        inner.segments[..bound]
            .iter()
            .filter(|segment| segment.contains_position(position))
            .cloned()
            .collect()
    }

    fn intersecting_range(&self, start: i64, end: i64) -> Vec<S> {
        self.stats.record_range_query();
        let inner = self.inner.read();
        let bound = Self::start_bound(&inner.segments, end);
        inner.segments[..bound]
            .iter()
            .filter(|segment| segment.overlaps(start, end))
            .cloned()
            .collect()
    }

    fn clear(&self) {
        let mut inner = self.inner.write();
        inner.segments.clear();
        self.snapshot.lock().invalidate();
        self.stats.record_clear();
    }

    fn dispose(&self) {
        let mut inner = self.inner.write();
        if inner.disposed {
            return;
        }
        debug!(len = inner.segments.len(), "disposing eager segment store");
        inner.segments = Vec::new();
        inner.disposed = true;
        self.snapshot.lock().invalidate();
        self.stats.record_clear();
    }

    fn is_disposed(&self) -> bool {
        self.inner.read().disposed
    }

    fn stats(&self) -> &StoreStats {
        &self.stats
    }
}

impl<S: Segment> FromIterator<S> for EagerSortedStore<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_segments(iter.into_iter().collect())
    }
}

impl<S: Segment> IntoIterator for &EagerSortedStore<S> {
    type Item = S;
    type IntoIter = SegmentIter<S>;

    fn into_iter(self) -> SegmentIter<S> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::BasicSegment;

    fn seg(start: i64, end: i64) -> BasicSegment {
        BasicSegment::new(start, end).unwrap()
    }

    fn scenario_store() -> EagerSortedStore<BasicSegment> {
        let store = EagerSortedStore::new();
        store.add(seg(1, 5)).unwrap();
        store.add(seg(2, 3)).unwrap();
        store.add(seg(4, 10)).unwrap();
        store
    }

    #[test]
    fn eager_new_is_empty() {
        let store: EagerSortedStore<BasicSegment> = EagerSortedStore::new();
        assert!(store.is_empty());
        assert_eq!(store.iter().count(), 0);
    }

    #[test]
    fn eager_insert_keeps_vector_sorted() {
        let store = EagerSortedStore::new();
        for (start, end) in [(5, 9), (1, 2), (5, 6), (3, 3), (1, 1)] {
            store.add(seg(start, end)).unwrap();
        }
        assert_eq!(
            store.to_vec(),
            vec![seg(1, 1), seg(1, 2), seg(3, 3), seg(5, 6), seg(5, 9)]
        );
    }

    #[test]
    fn eager_scenario_queries() {
        let store = scenario_store();
        assert_eq!(store.to_vec(), vec![seg(1, 5), seg(2, 3), seg(4, 10)]);
        assert_eq!(store.intersecting(3), vec![seg(1, 5), seg(2, 3)]);
        assert_eq!(store.intersecting_range(0, 2), vec![seg(1, 5), seg(2, 3)]);
    }

    #[test]
    fn eager_query_outside_span_is_empty() {
        let store = scenario_store();
        assert!(store.intersecting(-100).is_empty());
        assert!(store.intersecting(11).is_empty());
        assert!(store.intersecting_range(11, 50).is_empty());
        assert!(store.intersecting_range(i64::MIN, 0).is_empty());
        assert_eq!(store.intersecting_range(i64::MIN, i64::MAX).len(), 3);
    }

    #[test]
    fn eager_prefix_cut_keeps_long_early_segments() {
        let store = EagerSortedStore::new();
        store.add(seg(0, 100)).unwrap();
        store.add(seg(10, 20)).unwrap();
        store.add(seg(60, 70)).unwrap();

        assert_eq!(store.intersecting(50), vec![seg(0, 100)]);
        assert_eq!(store.intersecting_range(65, 65), vec![seg(0, 100), seg(60, 70)]);
    }

    #[test]
    fn eager_equal_keys_keep_insertion_order() {
        #[derive(Debug, Clone, PartialEq)]
        struct Tagged(i64, i64, u8);

        impl Segment for Tagged {
            fn start(&self) -> i64 {
                self.0
            }
            fn end(&self) -> i64 {
                self.1
            }
        }

        let store = EagerSortedStore::new();
        store.add(Tagged(2, 4, 0)).unwrap();
        store.add(Tagged(1, 1, 1)).unwrap();
        store.add(Tagged(2, 4, 2)).unwrap();
        store.add(Tagged(2, 4, 3)).unwrap();

        let tags: Vec<u8> = store.iter().map(|t| t.2).collect();
        assert_eq!(tags, vec![1, 0, 2, 3]);
    }

    #[test]
    fn eager_from_segments_sorts_immediately() {
        let store = EagerSortedStore::from_segments(vec![seg(6, 8), seg(2, 6), seg(4, 6)]);
        assert_eq!(store.to_vec(), vec![seg(2, 6), seg(4, 6), seg(6, 8)]);
    }

    #[test]
    fn eager_from_raw_drops_non_conforming() {
        let store: EagerSortedStore<BasicSegment> =
            EagerSortedStore::from_raw(vec![(4, 8), (9, 1), (2, 6)]);
        assert_eq!(store.to_vec(), vec![seg(2, 6), seg(4, 8)]);

        let strict: StoreResult<EagerSortedStore<BasicSegment>> =
            EagerSortedStore::try_from_raw(vec![(4, 8), (9, 1)]);
        assert!(matches!(strict, Err(StoreError::InvalidArgument { .. })));
    }

    #[test]
    fn eager_snapshot_is_cached_until_write() {
        let store = scenario_store();

        let first = store.snapshot();
        let second = store.snapshot();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.stats().snapshots_built(), 1);

        store.add(seg(0, 1)).unwrap();
        let third = store.snapshot();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(first.len(), 3);
        assert_eq!(third.len(), 4);
    }

    #[test]
    fn eager_try_add_none_is_rejected() {
        let store = scenario_store();
        let result = store.try_add(None);
        assert!(matches!(result, Err(StoreError::InvalidArgument { .. })));
        assert_eq!(store.len(), 3);
        assert_eq!(store.stats().rejected_adds(), 1);
    }

    #[test]
    fn eager_remove_family_is_unsupported() {
        let store = scenario_store();
        assert_eq!(store.remove(&seg(1, 5)), Err(StoreError::unsupported("remove")));
        assert!(store.remove_all(&[]).is_err());
        assert!(store.retain_all(&[]).is_err());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn eager_clear_keeps_store_usable() {
        let store = scenario_store();
        store.clear();
        assert!(store.is_empty());
        assert!(!store.is_disposed());
        store.add(seg(1, 1)).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn eager_dispose_rejects_further_adds() {
        let store = scenario_store();
        store.dispose();
        assert!(store.is_disposed());
        assert_eq!(store.len(), 0);
        assert_eq!(store.add(seg(1, 1)), Err(StoreError::Disposed));
        assert!(store.intersecting(3).is_empty());

        store.dispose();
        assert_eq!(store.stats().clears(), 1);
    }

    #[test]
    fn eager_copy_into_replaces_buffer() {
        let store = scenario_store();
        let mut buffer = vec![seg(100, 200)];
        store.copy_into(&mut buffer);
        assert_eq!(buffer, store.to_vec());
    }

    #[test]
    fn eager_collects_from_iterator() {
        let store: EagerSortedStore<BasicSegment> = vec![seg(3, 4), seg(1, 2)].into_iter().collect();
        let collected: Vec<BasicSegment> = (&store).into_iter().collect();
        assert_eq!(collected, vec![seg(1, 2), seg(3, 4)]);
    }
}
