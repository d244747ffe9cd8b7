//! Segment store statistics.
//!
//! Counters are atomic and can be read while other threads are adding to or
//! querying the store. All values only grow.
//!
//! # Usage
//!
//! ```rust
//! use segstore_core::{BasicSegment, LazySortedStore, SegmentStore};
//!
//! let store = LazySortedStore::new();
//! store.add(BasicSegment::new(1, 5).unwrap()).unwrap();
//! let _ = store.intersecting(3);
//!
//! let stats = store.stats().snapshot();
//! assert_eq!(stats.adds, 1);
//! assert_eq!(stats.point_queries, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Per-store operation counters.
#[derive(Debug, Default)]
pub struct StoreStats {
    /// Segments successfully added.
    adds: AtomicU64,
    /// Add attempts rejected (absent segment or disposed store).
    rejected_adds: AtomicU64,
    /// Snapshots materialized by copying the backing vector.
    snapshots_built: AtomicU64,
    /// Iterator requests served from an already cached snapshot.
    snapshot_hits: AtomicU64,
    /// Full sorts of the backing vector.
    sorts: AtomicU64,
    /// Point intersection queries.
    point_queries: AtomicU64,
    /// Range intersection queries.
    range_queries: AtomicU64,
    /// Clear and dispose calls.
    clears: AtomicU64,
}

impl StoreStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_add(&self) {
        self.adds.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected_add(&self) {
        self.rejected_adds.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_snapshot_built(&self) {
        self.snapshots_built.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_snapshot_hit(&self) {
        self.snapshot_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_sort(&self) {
        self.sorts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_point_query(&self) {
        self.point_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_range_query(&self) {
        self.range_queries.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_clear(&self) {
        self.clears.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the number of segments added.
    pub fn adds(&self) -> u64 {
        self.adds.load(Ordering::Relaxed)
    }

    /// Returns the number of rejected add attempts.
    pub fn rejected_adds(&self) -> u64 {
        self.rejected_adds.load(Ordering::Relaxed)
    }

    /// Returns the number of snapshots copied out of the backing vector.
    ///
    /// Stays flat across repeated iteration with no intervening write.
    pub fn snapshots_built(&self) -> u64 {
        self.snapshots_built.load(Ordering::Relaxed)
    }

    /// Returns the number of iterator requests served from the cache.
    pub fn snapshot_hits(&self) -> u64 {
        self.snapshot_hits.load(Ordering::Relaxed)
    }

    /// Returns the number of full sorts performed.
    pub fn sorts(&self) -> u64 {
        self.sorts.load(Ordering::Relaxed)
    }

    /// Returns the number of point queries.
    pub fn point_queries(&self) -> u64 {
        self.point_queries.load(Ordering::Relaxed)
    }

    /// Returns the number of range queries.
    pub fn range_queries(&self) -> u64 {
        self.range_queries.load(Ordering::Relaxed)
    }

    /// Returns the number of clears (including disposals).
    pub fn clears(&self) -> u64 {
        self.clears.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            adds: self.adds(),
            rejected_adds: self.rejected_adds(),
            snapshots_built: self.snapshots_built(),
            snapshot_hits: self.snapshot_hits(),
            sorts: self.sorts(),
            point_queries: self.point_queries(),
            range_queries: self.range_queries(),
            clears: self.clears(),
        }
    }
}

/// A point-in-time copy of [`StoreStats`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Segments successfully added.
    pub adds: u64,
    /// Rejected add attempts.
    pub rejected_adds: u64,
    /// Snapshots materialized.
    pub snapshots_built: u64,
    /// Iterator requests served from the cache.
    pub snapshot_hits: u64,
    /// Full sorts.
    pub sorts: u64,
    /// Point queries.
    pub point_queries: u64,
    /// Range queries.
    pub range_queries: u64,
    /// Clears and disposals.
    pub clears: u64,
}
