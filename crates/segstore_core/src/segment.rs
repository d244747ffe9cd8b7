//! Segment trait and the basic `[start, end]` segment.

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed time interval `[start, end]` produced by a trace analysis.
///
/// Segments are immutable values. A store owns the segments it holds and a
/// segment never refers back to its store.
///
/// # Invariants
///
/// - `end() >= start()` for every segment ever handed to a store
/// - Ordering inside stores is decided by `(start, end)` only, see
///   [`crate::comparator::canonical`]
pub trait Segment: Clone + PartialEq + Send + Sync + 'static {
    /// Returns the start of the interval.
    fn start(&self) -> i64;

    /// Returns the end of the interval (inclusive).
    fn end(&self) -> i64;

    /// Returns `end - start`, saturating at `i64::MAX`.
    fn length(&self) -> i64 {
        self.end().saturating_sub(self.start())
    }

    /// Returns true if `position` lies within `[start, end]`.
    fn contains_position(&self, position: i64) -> bool {
        self.start() <= position && position <= self.end()
    }

    /// Returns true if this segment overlaps the closed range `[start, end]`.
    fn overlaps(&self, start: i64, end: i64) -> bool {
        !(start > self.end() || end < self.start())
    }
}

/// Checks the `end >= start` invariant shared by all segment constructors.
pub fn check_bounds(start: i64, end: i64) -> StoreResult<()> {
    if end < start {
        return Err(StoreError::InvalidSegment { start, end });
    }
    Ok(())
}

/// A segment with no payload.
///
/// # Example
///
/// ```rust
/// use segstore_core::{BasicSegment, Segment};
///
/// let segment = BasicSegment::new(4, 10).unwrap();
/// assert_eq!(segment.length(), 6);
/// assert!(BasicSegment::new(10, 4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBounds", into = "RawBounds")]
pub struct BasicSegment {
    start: i64,
    end: i64,
}

impl BasicSegment {
    /// Creates a new segment.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidSegment`] if `end < start`.
    pub fn new(start: i64, end: i64) -> StoreResult<Self> {
        check_bounds(start, end)?;
        Ok(Self { start, end })
    }
}

impl Segment for BasicSegment {
    fn start(&self) -> i64 {
        self.start
    }

    fn end(&self) -> i64 {
        self.end
    }
}

impl fmt::Display for BasicSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

impl TryFrom<(i64, i64)> for BasicSegment {
    type Error = StoreError;

    fn try_from((start, end): (i64, i64)) -> StoreResult<Self> {
        Self::new(start, end)
    }
}

/// Unchecked wire shape of a [`BasicSegment`].
#[derive(Serialize, Deserialize)]
struct RawBounds {
    start: i64,
    end: i64,
}

impl TryFrom<RawBounds> for BasicSegment {
    type Error = StoreError;

    fn try_from(raw: RawBounds) -> StoreResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl From<BasicSegment> for RawBounds {
    fn from(segment: BasicSegment) -> Self {
        Self {
            start: segment.start,
            end: segment.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_end_before_start() {
        let result = BasicSegment::new(5, 4);
        assert_eq!(result, Err(StoreError::InvalidSegment { start: 5, end: 4 }));
    }

    #[test]
    fn zero_length_segment_is_valid() {
        let segment = BasicSegment::new(7, 7).unwrap();
        assert_eq!(segment.length(), 0);
        assert!(segment.contains_position(7));
        assert!(!segment.contains_position(8));
    }

    #[test]
    fn length_saturates() {
        let segment = BasicSegment::new(i64::MIN, i64::MAX).unwrap();
        assert_eq!(segment.length(), i64::MAX);
    }

    #[test]
    fn overlap_predicate_is_inclusive() {
        let segment = BasicSegment::new(4, 10).unwrap();
        assert!(segment.overlaps(0, 4));
        assert!(segment.overlaps(10, 20));
        assert!(segment.overlaps(5, 6));
        assert!(segment.overlaps(0, 20));
        assert!(!segment.overlaps(0, 3));
        assert!(!segment.overlaps(11, 20));
    }

    #[test]
    fn try_from_tuple() {
        assert!(BasicSegment::try_from((1, 2)).is_ok());
        assert!(BasicSegment::try_from((2, 1)).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(BasicSegment::new(1, 5).unwrap().to_string(), "[1, 5]");
    }

    #[test]
    fn serde_validates_bounds() {
        let segment: BasicSegment = serde_json::from_str(r#"{"start":2,"end":6}"#).unwrap();
        assert_eq!(segment, BasicSegment::new(2, 6).unwrap());

        let json = serde_json::to_string(&segment).unwrap();
        assert_eq!(json, r#"{"start":2,"end":6}"#);

        let invalid = serde_json::from_str::<BasicSegment>(r#"{"start":6,"end":2}"#);
        assert!(invalid.is_err());
    }
}
