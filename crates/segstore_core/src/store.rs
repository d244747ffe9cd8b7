//! Segment store trait definition.

use crate::comparator::SegmentComparator;
use crate::error::{StoreError, StoreResult};
use crate::segment::Segment;
use crate::snapshot::SegmentIter;
use crate::stats::StoreStats;
use std::sync::Arc;

/// An append-only, thread-safe collection of segments with intersection
/// queries.
///
/// Producers call [`add`](Self::add) and [`add_all`](Self::add_all) while
/// consumers iterate and query, possibly from other threads at the same time.
///
/// # Invariants
///
/// - Once any read has completed, iteration yields segments in
///   non-decreasing `(start, end)` order
/// - No operation removes an individual segment; only [`clear`](Self::clear)
///   and [`dispose`](Self::dispose) empty the store
/// - `len` only grows between clears
/// - Intersection queries never fail; an empty result is a valid answer
///
/// # Implementors
///
/// - [`crate::EagerSortedStore`] - keeps the vector sorted on every insert
/// - [`crate::LazySortedStore`] - appends, and sorts on the next read
pub trait SegmentStore<S: Segment>: Send + Sync {
    /// Adds a segment.
    ///
    /// Returns `true`, as the store always changes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Disposed`] if the store was disposed.
    fn add(&self, segment: S) -> StoreResult<bool>;

    /// Adds a segment that a producer may not have.
    ///
    /// An absent segment is rejected before any lock is taken.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidArgument`] if `segment` is `None`, or
    /// whatever [`add`](Self::add) returns.
    fn try_add(&self, segment: Option<S>) -> StoreResult<bool> {
        match segment {
            Some(segment) => self.add(segment),
            None => {
                self.stats().record_rejected_add();
                Err(StoreError::invalid_argument("segment is absent"))
            }
        }
    }

    /// Adds every segment, one [`add`](Self::add) at a time.
    ///
    /// This is not atomic: concurrent readers may observe a partially applied
    /// batch. Returns `true` if at least one segment was added.
    ///
    /// # Errors
    ///
    /// Stops at the first failing add and returns its error.
    fn add_all(&self, segments: Vec<S>) -> StoreResult<bool> {
        let mut changed = false;
        for segment in segments {
            changed |= self.add(segment)?;
        }
        Ok(changed)
    }

    /// Returns the number of segments.
    fn len(&self) -> usize;

    /// Returns true if the store holds no segments.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if an equal segment is stored.
    fn contains(&self, segment: &S) -> bool;

    /// Returns true if every segment in `segments` is stored.
    fn contains_all(&self, segments: &[S]) -> bool;

    /// Returns a sorted copy of all segments.
    fn to_vec(&self) -> Vec<S>;

    /// Replaces the contents of `buffer` with a sorted copy of all segments.
    fn copy_into(&self, buffer: &mut Vec<S>);

    /// Returns the shared snapshot of the current contents, in canonical
    /// order.
    ///
    /// Repeated calls with no write in between return the same allocation.
    fn snapshot(&self) -> Arc<[S]>;

    /// Returns an iterator over a point-in-time snapshot.
    fn iter(&self) -> SegmentIter<S> {
        SegmentIter::new(self.snapshot())
    }

    /// Returns all segments ordered by `comparator`.
    fn iter_sorted(&self, comparator: SegmentComparator) -> Vec<S> {
        let mut segments = self.snapshot().to_vec();
        comparator.sort(&mut segments);
        segments
    }

    /// Returns every segment with `start <= position <= end`, in canonical
    /// order.
    fn intersecting(&self, position: i64) -> Vec<S>;

    /// Returns every segment overlapping the closed range `[start, end]`, in
    /// canonical order.
    fn intersecting_range(&self, start: i64, end: i64) -> Vec<S>;

    /// Like [`intersecting`](Self::intersecting), ordered by `comparator`.
    fn intersecting_sorted(&self, position: i64, comparator: SegmentComparator) -> Vec<S> {
        let mut segments = self.intersecting(position);
        comparator.sort(&mut segments);
        segments
    }

    /// Like [`intersecting_range`](Self::intersecting_range), ordered by
    /// `comparator`.
    fn intersecting_range_sorted(
        &self,
        start: i64,
        end: i64,
        comparator: SegmentComparator,
    ) -> Vec<S> {
        let mut segments = self.intersecting_range(start, end);
        comparator.sort(&mut segments);
        segments
    }

    /// Always fails: segment stores are append-only.
    ///
    /// # Errors
    ///
    /// Always returns [`StoreError::Unsupported`].
    fn remove(&self, _segment: &S) -> StoreResult<bool> {
        Err(StoreError::unsupported("remove"))
    }

    /// Always fails: segment stores are append-only.
    ///
    /// # Errors
    ///
    /// Always returns [`StoreError::Unsupported`].
    fn remove_all(&self, _segments: &[S]) -> StoreResult<bool> {
        Err(StoreError::unsupported("remove_all"))
    }

    /// Always fails: segment stores are append-only.
    ///
    /// # Errors
    ///
    /// Always returns [`StoreError::Unsupported`].
    fn retain_all(&self, _segments: &[S]) -> StoreResult<bool> {
        Err(StoreError::unsupported("retain_all"))
    }

    /// Removes every segment. The store stays usable.
    fn clear(&self);

    /// Removes every segment and stops accepting new ones.
    ///
    /// Reads keep working and see an empty store. Disposing twice is a no-op.
    fn dispose(&self);

    /// Returns true once [`dispose`](Self::dispose) has run.
    fn is_disposed(&self) -> bool;

    /// Returns the operation counters of this store.
    fn stats(&self) -> &StoreStats;
}
