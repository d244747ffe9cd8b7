//! Test fixtures and store helpers.
//!
//! Provides a payload-carrying segment, the five-segment sample used across
//! the contract tests, and a way to run the same check against every
//! in-memory backend.

use segstore_core::{
    check_bounds, create_store, EagerSortedStore, LazySortedStore, Segment, SegmentStore,
    StoreError, StoreResult, StoreType,
};
use std::fmt;

/// A segment carrying a string payload.
///
/// Two test segments are equal only if their payloads match too, but stores
/// order them by `(start, end)` alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestSegment {
    start: i64,
    end: i64,
    payload: String,
}

impl TestSegment {
    /// Creates a new test segment.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSegment`] if `end < start`.
    pub fn new(start: i64, end: i64, payload: impl Into<String>) -> StoreResult<Self> {
        check_bounds(start, end)?;
        Ok(Self {
            start,
            end,
            payload: payload.into(),
        })
    }

    /// Returns the payload.
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl Segment for TestSegment {
    fn start(&self) -> i64 {
        self.start
    }

    fn end(&self) -> i64 {
        self.end
    }
}

impl fmt::Display for TestSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] {}", self.start, self.end, self.payload)
    }
}

impl TryFrom<(i64, i64, &str)> for TestSegment {
    type Error = StoreError;

    fn try_from((start, end, payload): (i64, i64, &str)) -> StoreResult<Self> {
        Self::new(start, end, payload)
    }
}

/// Shorthand for a test segment that is known to be valid.
///
/// # Panics
///
/// Panics if `end < start`.
pub fn test_segment(start: i64, end: i64, payload: &str) -> TestSegment {
    TestSegment::new(start, end, payload).expect("fixture segment bounds")
}

/// The sample segments, in canonical order:
/// `[2,6] [4,6] [4,8] [6,8] [10,14]`.
pub fn sample_segments() -> Vec<TestSegment> {
    vec![
        test_segment(2, 6, "test"),
        test_segment(4, 6, "test2"),
        test_segment(4, 8, "test3"),
        test_segment(6, 8, "test"),
        test_segment(10, 14, "test"),
    ]
}

/// The sample segments in reverse canonical order.
pub fn reversed_sample_segments() -> Vec<TestSegment> {
    let mut segments = sample_segments();
    segments.reverse();
    segments
}

/// The in-memory backends under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// [`EagerSortedStore`].
    Eager,
    /// [`LazySortedStore`].
    Lazy,
}

impl Backend {
    /// Both backends.
    pub const ALL: [Backend; 2] = [Backend::Eager, Backend::Lazy];

    /// Creates an empty store of this backend.
    pub fn create<S: Segment>(self) -> Box<dyn SegmentStore<S>> {
        match self {
            Backend::Eager => Box::new(EagerSortedStore::new()),
            Backend::Lazy => Box::new(LazySortedStore::new()),
        }
    }

    /// Creates a store of this backend seeded with `segments`.
    pub fn seeded<S: Segment>(self, segments: Vec<S>) -> Box<dyn SegmentStore<S>> {
        match self {
            Backend::Eager => Box::new(EagerSortedStore::from_segments(segments)),
            Backend::Lazy => Box::new(LazySortedStore::from_segments(segments)),
        }
    }

    /// Creates the same backend through the factory.
    ///
    /// # Panics
    ///
    /// Panics if the factory refuses an in-memory backend.
    pub fn from_factory<S: Segment>(self) -> Box<dyn SegmentStore<S>> {
        let kind = match self {
            Backend::Eager => StoreType::Stable,
            Backend::Lazy => StoreType::Fast,
        };
        create_store(&[kind]).expect("in-memory backends are always available")
    }
}

/// Creates a store of `backend` holding the sample segments, added one by
/// one in canonical order.
pub fn sample_store(backend: Backend) -> Box<dyn SegmentStore<TestSegment>> {
    let store = backend.create();
    for segment in sample_segments() {
        store.add(segment).expect("add to a fresh store");
    }
    store
}

/// Runs `check` once per backend.
pub fn for_each_backend<F>(mut check: F)
where
    F: FnMut(Backend),
{
    for backend in Backend::ALL {
        check(backend);
    }
}
