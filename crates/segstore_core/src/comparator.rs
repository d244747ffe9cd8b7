//! Shared segment comparators.
//!
//! Both backends sort with [`canonical`] so that their iteration order is
//! interchangeable. [`SegmentComparator`] covers the orderings consumers ask
//! for when they want a sorted view instead of the canonical one.

use crate::segment::Segment;
use std::cmp::Ordering;

/// Compares segments by start.
pub fn by_start<S: Segment>(a: &S, b: &S) -> Ordering {
    a.start().cmp(&b.start())
}

/// Compares segments by end.
pub fn by_end<S: Segment>(a: &S, b: &S) -> Ordering {
    a.end().cmp(&b.end())
}

/// Compares segments by length.
pub fn by_length<S: Segment>(a: &S, b: &S) -> Ordering {
    a.length().cmp(&b.length())
}

/// The store ordering: start ascending, then end ascending.
pub fn canonical<S: Segment>(a: &S, b: &S) -> Ordering {
    by_start(a, b).then_with(|| by_end(a, b))
}

/// The key a [`SegmentComparator`] orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Segment start.
    Start,
    /// Segment end.
    End,
    /// Segment length.
    Length,
}

/// A named ordering over segments, optionally reversed.
///
/// # Example
///
/// ```rust
/// use segstore_core::{BasicSegment, SegmentComparator};
/// use std::cmp::Ordering;
///
/// let short = BasicSegment::new(0, 1).unwrap();
/// let long = BasicSegment::new(5, 50).unwrap();
///
/// assert_eq!(SegmentComparator::BY_LENGTH.compare(&short, &long), Ordering::Less);
/// assert_eq!(
///     SegmentComparator::BY_LENGTH.reversed().compare(&short, &long),
///     Ordering::Greater
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentComparator {
    key: SortKey,
    descending: bool,
}

impl SegmentComparator {
    /// Start ascending.
    pub const BY_START: Self = Self::new(SortKey::Start);
    /// End ascending.
    pub const BY_END: Self = Self::new(SortKey::End);
    /// Length ascending.
    pub const BY_LENGTH: Self = Self::new(SortKey::Length);

    /// Creates an ascending comparator on `key`.
    #[must_use]
    pub const fn new(key: SortKey) -> Self {
        Self {
            key,
            descending: false,
        }
    }

    /// Returns the same comparator with the direction flipped.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            key: self.key,
            descending: !self.descending,
        }
    }

    /// Returns the key this comparator orders by.
    pub const fn key(&self) -> SortKey {
        self.key
    }

    /// Returns true if the comparator sorts in descending order.
    pub const fn is_descending(&self) -> bool {
        self.descending
    }

    /// Compares two segments.
    pub fn compare<S: Segment>(&self, a: &S, b: &S) -> Ordering {
        let ordering = match self.key {
            SortKey::Start => by_start(a, b),
            SortKey::End => by_end(a, b),
            SortKey::Length => by_length(a, b),
        };
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }

    /// Stable-sorts `segments` with this comparator.
    ///
    /// Ties keep their relative order, so an input in canonical order stays
    /// canonically ordered within equal keys.
    pub fn sort<S: Segment>(&self, segments: &mut [S]) {
        segments.sort_by(|a, b| self.compare(a, b));
    }

    /// All six comparators, in a fixed order.
    pub fn all() -> [Self; 6] {
        [
            Self::BY_START,
            Self::BY_START.reversed(),
            Self::BY_END,
            Self::BY_END.reversed(),
            Self::BY_LENGTH,
            Self::BY_LENGTH.reversed(),
        ]
    }
}
