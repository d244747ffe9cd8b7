//! Intersection query vectors.
//!
//! Each vector lists the segments to insert and the exact, canonically
//! ordered answer expected from point and range queries. Vectors live in
//! `vectors/intersections.json` so other implementations can share them.

use segstore_core::{BasicSegment, SegmentStore, StoreResult};
use serde::{Deserialize, Serialize};

const INTERSECTION_VECTORS: &str = include_str!("../vectors/intersections.json");

/// Raw `(start, end)` bounds as stored in the vector file.
pub type Bounds = (i64, i64);

/// A point query and its expected result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCase {
    /// Queried position.
    pub position: i64,
    /// Expected segments in canonical order.
    pub expected: Vec<Bounds>,
}

/// A range query and its expected result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeCase {
    /// Range start.
    pub start: i64,
    /// Range end.
    pub end: i64,
    /// Expected segments in canonical order.
    pub expected: Vec<Bounds>,
}

/// A set of segments and the queries to run against them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Segments in insertion order.
    pub segments: Vec<Bounds>,
    /// Range queries.
    pub ranges: Vec<RangeCase>,
    /// Point queries.
    pub points: Vec<PointCase>,
}

impl QueryVector {
    /// Converts the vector's segments.
    ///
    /// # Errors
    ///
    /// Fails if any bounds pair has `end < start`.
    pub fn basic_segments(&self) -> StoreResult<Vec<BasicSegment>> {
        to_segments(&self.segments)
    }

    /// Adds the segments to `store` one by one and checks every query.
    ///
    /// # Panics
    ///
    /// Panics on the first query whose answer differs from the vector.
    pub fn check(&self, store: &dyn SegmentStore<BasicSegment>) {
        let segments = self.basic_segments().expect("vector segments are valid");
        for segment in segments {
            store.add(segment).expect("add to a live store");
        }

        for case in &self.ranges {
            let expected = to_segments(&case.expected).expect("vector segments are valid");
            assert_eq!(
                store.intersecting_range(case.start, case.end),
                expected,
                "{}: range [{}, {}]",
                self.id,
                case.start,
                case.end
            );
        }
        for case in &self.points {
            let expected = to_segments(&case.expected).expect("vector segments are valid");
            assert_eq!(
                store.intersecting(case.position),
                expected,
                "{}: point {}",
                self.id,
                case.position
            );
        }
    }
}

fn to_segments(bounds: &[Bounds]) -> StoreResult<Vec<BasicSegment>> {
    bounds.iter().map(|&pair| BasicSegment::try_from(pair)).collect()
}

/// Loads the bundled intersection vectors.
///
/// # Panics
///
/// Panics if the bundled file is malformed.
pub fn intersection_vectors() -> Vec<QueryVector> {
    serde_json::from_str(INTERSECTION_VECTORS).expect("bundled vectors are valid JSON")
}

/// Exports the bundled vectors as pretty-printed JSON.
pub fn export_vectors_json() -> String {
    serde_json::to_string_pretty(&intersection_vectors()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Backend;
    use crate::integration::{expected_point, expected_range};

    #[test]
    fn vectors_parse() {
        let vectors = intersection_vectors();
        assert!(!vectors.is_empty());
        for vector in &vectors {
            assert!(vector.basic_segments().is_ok(), "{}", vector.id);
            assert!(!vector.ranges.is_empty() || !vector.points.is_empty());
        }
    }

    #[test]
    fn vector_ids_are_unique() {
        let vectors = intersection_vectors();
        let mut ids: Vec<&str> = vectors.iter().map(|v| v.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), vectors.len());
    }

    #[test]
    fn vectors_agree_with_brute_force() {
        for vector in intersection_vectors() {
            let segments = vector.basic_segments().unwrap();
            for case in &vector.ranges {
                let expected = to_segments(&case.expected).unwrap();
                assert_eq!(expected_range(&segments, case.start, case.end), expected);
            }
            for case in &vector.points {
                let expected = to_segments(&case.expected).unwrap();
                assert_eq!(expected_point(&segments, case.position), expected);
            }
        }
    }

    #[test]
    fn vectors_hold_for_every_backend() {
        for vector in intersection_vectors() {
            for backend in Backend::ALL {
                vector.check(backend.create::<BasicSegment>().as_ref());
            }
        }
    }

    #[test]
    fn export_round_trips() {
        let json = export_vectors_json();
        let parsed: Vec<QueryVector> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), intersection_vectors().len());
    }
}
