//! Backend selection.
//!
//! Callers state the tradeoff they want and get back a
//! [`SegmentStore`] trait object; they never name a concrete backend.
//!
//! | Flags (highest priority first) | Backend |
//! |--------------------------------|---------|
//! | `OnDisk`                       | external, not available here |
//! | `Distinct`                     | external, not available here |
//! | `Stable`                       | [`EagerSortedStore`] |
//! | `Fast` or none                 | [`LazySortedStore`] |

use crate::config::{StoreConfig, StoreFlags, StoreType};
use crate::eager::EagerSortedStore;
use crate::error::{StoreError, StoreResult};
use crate::lazy::LazySortedStore;
use crate::segment::Segment;
use crate::store::SegmentStore;
use tracing::debug;

/// Creates a store for the given flags with default settings.
///
/// # Errors
///
/// Returns [`StoreError::BackendUnavailable`] for `OnDisk` and `Distinct`.
///
/// # Example
///
/// ```rust
/// use segstore_core::{create_store, BasicSegment, SegmentStore, StoreType};
///
/// let store = create_store::<BasicSegment>(&[StoreType::Stable]).unwrap();
/// store.add(BasicSegment::new(0, 10).unwrap()).unwrap();
/// assert_eq!(store.intersecting(5).len(), 1);
/// ```
pub fn create_store<S: Segment>(kinds: &[StoreType]) -> StoreResult<Box<dyn SegmentStore<S>>> {
    create_store_with(&StoreConfig::new().flags(StoreFlags::from(kinds)))
}

/// Creates a store from a full configuration.
///
/// # Errors
///
/// Returns [`StoreError::BackendUnavailable`] for `OnDisk` and `Distinct`.
pub fn create_store_with<S: Segment>(
    config: &StoreConfig,
) -> StoreResult<Box<dyn SegmentStore<S>>> {
    let kind = select(config.flags);
    debug!(backend = %kind, capacity = config.initial_capacity, "creating segment store");

    match kind {
        StoreType::OnDisk | StoreType::Distinct => {
            Err(StoreError::backend_unavailable(kind.to_string()))
        }
        StoreType::Stable => Ok(Box::new(EagerSortedStore::with_capacity(
            config.initial_capacity,
        ))),
        StoreType::Fast => Ok(Box::new(LazySortedStore::with_capacity(
            config.initial_capacity,
        ))),
    }
}

/// Picks the single flag that decides the backend.
pub fn select(flags: StoreFlags) -> StoreType {
    [StoreType::OnDisk, StoreType::Distinct, StoreType::Stable]
        .into_iter()
        .find(|kind| flags.contains(*kind))
        .unwrap_or(StoreType::Fast)
}
