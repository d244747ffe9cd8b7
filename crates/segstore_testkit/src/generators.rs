//! Property-based test generators using proptest.
//!
//! Provides strategies for generating segments and store operation sequences
//! that maintain the `end >= start` invariant.

use crate::fixtures::TestSegment;
use proptest::prelude::*;
use segstore_core::BasicSegment;

/// Strategy for valid segments starting in `0..max_start` and lasting at most
/// `max_len`.
pub fn segment_strategy(max_start: i64, max_len: i64) -> impl Strategy<Value = BasicSegment> {
    (0..max_start, 0..=max_len).prop_map(|(start, len)| {
        BasicSegment::new(start, start + len).expect("generated end is never before start")
    })
}

/// Strategy for a vector of small, heavily overlapping segments.
pub fn segments_strategy(max_count: usize) -> impl Strategy<Value = Vec<BasicSegment>> {
    prop::collection::vec(segment_strategy(100, 30), 0..max_count)
}

/// Strategy for payload segments where many share the same bounds.
pub fn test_segment_strategy() -> impl Strategy<Value = TestSegment> {
    (0i64..20, 0i64..5, "[a-c]{1,3}").prop_map(|(start, len, payload)| {
        TestSegment::new(start, start + len, payload).expect("generated end is never before start")
    })
}

/// Strategy for raw `(start, end)` pairs, some of them invalid.
pub fn raw_bounds_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((-50i64..50, -50i64..50), 0..64)
}

/// Strategy for a query range, sometimes reaching outside the generated data.
pub fn query_range_strategy() -> impl Strategy<Value = (i64, i64)> {
    (-20i64..150, 0i64..60).prop_map(|(start, len)| (start, start + len))
}

/// An operation applied to a store under test.
#[derive(Debug, Clone)]
pub enum StoreOperation {
    /// Add one segment.
    Add {
        /// The segment.
        segment: BasicSegment,
    },
    /// Add a batch of segments.
    AddAll {
        /// The segments.
        segments: Vec<BasicSegment>,
    },
    /// Query one position.
    Point {
        /// The position.
        position: i64,
    },
    /// Query a closed range.
    Range {
        /// Range start.
        start: i64,
        /// Range end.
        end: i64,
    },
    /// Iterate over a snapshot.
    Iterate,
    /// Remove everything.
    Clear,
}

/// Strategy for generating store operations, mostly adds.
pub fn store_operation_strategy() -> impl Strategy<Value = StoreOperation> {
    prop_oneof![
        6 => segment_strategy(100, 30).prop_map(|segment| StoreOperation::Add { segment }),
        2 => prop::collection::vec(segment_strategy(100, 30), 0..8)
            .prop_map(|segments| StoreOperation::AddAll { segments }),
        2 => (-10i64..140).prop_map(|position| StoreOperation::Point { position }),
        2 => query_range_strategy().prop_map(|(start, end)| StoreOperation::Range { start, end }),
        2 => Just(StoreOperation::Iterate),
        1 => Just(StoreOperation::Clear),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<StoreOperation>> {
    prop::collection::vec(store_operation_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use segstore_core::Segment;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn generated_segments_are_valid(segment in segment_strategy(1000, 100)) {
            prop_assert!(segment.end() >= segment.start());
            prop_assert!(segment.length() <= 100);
        }

        #[test]
        fn generated_ranges_are_ordered((start, end) in query_range_strategy()) {
            prop_assert!(start <= end);
        }

        #[test]
        fn generated_payload_segments_are_valid(segment in test_segment_strategy()) {
            prop_assert!(segment.end() >= segment.start());
            prop_assert!(!segment.payload().is_empty());
        }
    }
}
