//! # segstore core
//!
//! In-memory segment stores for trace analyses.
//!
//! A segment is a closed `[start, end]` interval, usually a span of time with
//! some payload. Analyses append segments while they run; views and
//! statistics ask which segments overlap an instant or a range, often from
//! other threads and while the store is still growing.
//!
//! ## Design Principles
//!
//! - Stores are append-only; only `clear` and `dispose` empty them
//! - Iteration order is `(start, end)` ascending once a read has completed
//! - Iterators walk an immutable snapshot, shared until the next write
//! - Callers depend on the [`SegmentStore`] trait, not on a backend
//!
//! ## Available Backends
//!
//! - [`EagerSortedStore`] - sorted on every insert, reader/writer lock
//! - [`LazySortedStore`] - sorted on the next read, single mutex
//!
//! ## Example
//!
//! ```rust
//! use segstore_core::{create_store, BasicSegment, SegmentStore, StoreType};
//!
//! let store = create_store::<BasicSegment>(&[StoreType::Fast]).unwrap();
//! store.add(BasicSegment::new(1, 5).unwrap()).unwrap();
//! store.add(BasicSegment::new(2, 3).unwrap()).unwrap();
//! store.add(BasicSegment::new(4, 10).unwrap()).unwrap();
//!
//! assert_eq!(store.intersecting(3).len(), 2);
//! assert_eq!(store.intersecting_range(0, 2).len(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod comparator;
mod config;
mod eager;
mod error;
mod factory;
mod ingest;
mod lazy;
mod segment;
mod snapshot;
mod stats;
mod store;

pub use comparator::{SegmentComparator, SortKey};
pub use config::{StoreConfig, StoreFlags, StoreType};
pub use eager::EagerSortedStore;
pub use error::{StoreError, StoreResult};
pub use factory::{create_store, create_store_with, select};
pub use lazy::LazySortedStore;
pub use segment::{check_bounds, BasicSegment, Segment};
pub use snapshot::SegmentIter;
pub use stats::{StatsSnapshot, StoreStats};
pub use store::SegmentStore;
