//! Segment store that appends in constant time and sorts on demand.

use crate::comparator::canonical;
use crate::error::{StoreError, StoreResult};
use crate::ingest::{collect_conforming, collect_strict};
use crate::segment::Segment;
use crate::snapshot::{CachedSnapshot, SegmentIter};
use crate::stats::StoreStats;
use crate::store::SegmentStore;
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A segment store that defers sorting until a read needs order.
///
/// [`add`](SegmentStore::add) compares the new segment with the current last
/// one only. If it sorts before it, the store is marked dirty; either way
/// the segment is appended. The next read that depends on order sorts the
/// whole vector and clears the flag.
///
/// The dirtiness check is local: a segment that is in order with respect to
/// the tail but not to earlier segments cannot occur, because the vector is
/// sorted whenever the flag is clear. A segment smaller than the tail marks
/// the store dirty even if a sort would leave it where it is.
///
/// Intersection queries scan the whole vector after sorting.
///
/// # Thread Safety
///
/// One mutex guards everything, including the deferred sort. Reads do not
/// run in parallel; appends are as cheap as they can be.
///
/// # Example
///
/// ```rust
/// use segstore_core::{BasicSegment, LazySortedStore, SegmentStore};
///
/// let store = LazySortedStore::new();
/// store.add(BasicSegment::new(5, 6).unwrap()).unwrap();
/// store.add(BasicSegment::new(1, 2).unwrap()).unwrap();
/// assert!(store.is_dirty());
///
/// let ordered: Vec<_> = store.iter().collect();
/// assert_eq!(ordered[0], BasicSegment::new(1, 2).unwrap());
/// assert!(!store.is_dirty());
/// ```
pub struct LazySortedStore<S> {
    inner: Mutex<LazyInner<S>>,
    stats: StoreStats,
}

struct LazyInner<S> {
    segments: Vec<S>,
    dirty: bool,
    disposed: bool,
    snapshot: CachedSnapshot<S>,
}

impl<S: Segment> LazyInner<S> {
    fn push(&mut self, segment: S) {
        if let Some(last) = self.segments.last() {
            if canonical(&segment, last) == Ordering::Less {
                self.dirty = true;
            }
        }
        self.segments.push(segment);
        self.snapshot.invalidate();
    }

    fn ensure_sorted(&mut self, stats: &StoreStats) {
        if !self.dirty {
            return;
        }
        debug!(len = self.segments.len(), "sorting dirty segment store");
        self.segments.sort_by(canonical);
        self.dirty = false;
        self.snapshot.invalidate();
        stats.record_sort();
    }
}

impl<S: Segment> LazySortedStore<S> {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty store with room for `capacity` segments.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(LazyInner {
                segments: Vec::with_capacity(capacity),
                dirty: false,
                disposed: false,
                snapshot: CachedSnapshot::empty(),
            }),
            stats: StoreStats::new(),
        }
    }

    /// Creates a store holding `segments`.
    ///
    /// Segments are appended one by one with the usual tail check; nothing is
    /// sorted until the first read.
    #[must_use]
    pub fn from_segments(segments: Vec<S>) -> Self {
        let store = Self::with_capacity(segments.len());
        {
            let mut inner = store.inner.lock();
            for segment in segments {
                inner.push(segment);
            }
        }
        store
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

    /// Returns true if the next ordered read will sort first.
    pub fn is_dirty(&self) -> bool {
        self.inner.lock().dirty
    }
}

impl<S: Segment> Default for LazySortedStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Segment + fmt::Debug> fmt::Debug for LazySortedStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("LazySortedStore")
            .field("len", &inner.segments.len())
            .field("dirty", &inner.dirty)
            .field("disposed", &inner.disposed)
            .finish()
    }
}

impl<S: Segment> SegmentStore<S> for LazySortedStore<S> {
    fn add(&self, segment: S) -> StoreResult<bool> {
        let mut inner = self.inner.lock();
        if inner.disposed {
            self.stats.record_rejected_add();
            return Err(StoreError::Disposed);
        }
        inner.push(segment);
        self.stats.record_add();
        Ok(true)
    }

    fn len(&self) -> usize {
        self.inner.lock().segments.len()
    }

    fn contains(&self, segment: &S) -> bool {
        self.inner.lock().segments.contains(segment)
    }

    fn contains_all(&self, segments: &[S]) -> bool {
        let inner = self.inner.lock();
        segments
            .iter()
            .all(|segment| inner.segments.contains(segment))
    }

    fn to_vec(&self) -> Vec<S> {
        let mut inner = self.inner.lock();
        inner.ensure_sorted(&self.stats);
        inner.segments.clone()
    }

    fn copy_into(&self, buffer: &mut Vec<S>) {
        let mut inner = self.inner.lock();
        inner.ensure_sorted(&self.stats);
        buffer.clear();
        buffer.extend_from_slice(&inner.segments);
    }

    fn snapshot(&self) -> Arc<[S]> {
        let mut inner = self.inner.lock();
        inner.ensure_sorted(&self.stats);
        let LazyInner {
            segments, snapshot, ..
        } = &mut *inner;
        snapshot.get_or_build(segments, &self.stats)
    }

    fn intersecting(&self, position: i64) -> Vec<S> {
        self.stats.record_point_query();
        let mut inner = self.inner.lock();
        inner.ensure_sorted(&self.stats);
        inner
            .segments
            .iter()
            .filter(|segment| segment.contains_position(position))
            .cloned()
            .collect()
    }

    fn intersecting_range(&self, start: i64, end: i64) -> Vec<S> {
        self.stats.record_range_query();
        let mut inner = self.inner.lock();
        inner.ensure_sorted(&self.stats);
        inner
            .segments
            .iter()
            .filter(|segment| segment.overlaps(start, end))
            .cloned()
            .collect()
    }

    fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.segments.clear();
        inner.dirty = false;
        inner.snapshot.invalidate();
        self.stats.record_clear();
    }

    fn dispose(&self) {
        let mut inner = self.inner.lock();
        if inner.disposed {
            return;
        }
        debug!(len = inner.segments.len(), "disposing lazy segment store");
        inner.segments = Vec::new();
        inner.dirty = false;
        inner.disposed = true;
        inner.snapshot.invalidate();
        self.stats.record_clear();
    }

    fn is_disposed(&self) -> bool {
        self.inner.lock().disposed
    }

    fn stats(&self) -> &StoreStats {
        &self.stats
    }
}

impl<S: Segment> FromIterator<S> for LazySortedStore<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_segments(iter.into_iter().collect())
    }
}

impl<S: Segment> IntoIterator for &LazySortedStore<S> {
    type Item = S;
    type IntoIter = SegmentIter<S>;

    fn into_iter(self) -> SegmentIter<S> {
        self.iter()
    }
}
