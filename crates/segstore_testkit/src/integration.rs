//! Model-checking harness for segment stores.
//!
//! Applies operations to a store and to a plain vector side by side, and
//! checks every observable result against a brute-force answer.

use crate::generators::StoreOperation;
use segstore_core::comparator::canonical;
use segstore_core::{BasicSegment, Segment, SegmentStore};

/// Brute-force point query.
pub fn expected_point<S: Segment>(segments: &[S], position: i64) -> Vec<S> {
    let mut hits: Vec<S> = segments
        .iter()
        .filter(|s| s.start() <= position && position <= s.end())
        .cloned()
        .collect();
    hits.sort_by(canonical);
    hits
}

/// Brute-force range query.
pub fn expected_range<S: Segment>(segments: &[S], start: i64, end: i64) -> Vec<S> {
    let mut hits: Vec<S> = segments
        .iter()
        .filter(|s| !(start > s.end() || end < s.start()))
        .cloned()
        .collect();
    hits.sort_by(canonical);
    hits
}

/// Returns true if `segments` is in non-decreasing `(start, end)` order.
pub fn is_canonically_sorted<S: Segment>(segments: &[S]) -> bool {
    segments
        .windows(2)
        .all(|pair| canonical(&pair[0], &pair[1]).is_le())
}

/// Sorts a copy of `segments` in canonical order.
pub fn canonically_sorted<S: Segment>(segments: &[S]) -> Vec<S> {
    let mut sorted = segments.to_vec();
    sorted.sort_by(canonical);
    sorted
}

/// A store under test paired with the segments it should hold.
pub struct ModelHarness {
    /// The store under test.
    pub store: Box<dyn SegmentStore<BasicSegment>>,
    /// Every segment added since the last clear, in insertion order.
    model: Vec<BasicSegment>,
}

impl ModelHarness {
    /// Wraps an empty store.
    ///
    /// # Panics
    ///
    /// Panics if the store is not empty.
    pub fn new(store: Box<dyn SegmentStore<BasicSegment>>) -> Self {
        assert!(store.is_empty(), "harness needs an empty store");
        Self {
            store,
            model: Vec::new(),
        }
    }

    /// Returns the segments the store should hold, in insertion order.
    pub fn model(&self) -> &[BasicSegment] {
        &self.model
    }

    /// Applies `op` to both sides and checks the result.
    ///
    /// # Panics
    ///
    /// Panics if the store disagrees with the model.
    pub fn apply(&mut self, op: &StoreOperation) {
        match op {
            StoreOperation::Add { segment } => {
                assert_eq!(self.store.add(*segment), Ok(true));
                self.model.push(*segment);
            }
            StoreOperation::AddAll { segments } => {
                let changed = self
                    .store
                    .add_all(segments.clone())
                    .expect("add_all on a live store");
                assert_eq!(changed, !segments.is_empty());
                self.model.extend_from_slice(segments);
            }
            StoreOperation::Point { position } => {
                assert_eq!(
                    self.store.intersecting(*position),
                    expected_point(&self.model, *position),
                    "point query at {position}"
                );
            }
            StoreOperation::Range { start, end } => {
                assert_eq!(
                    self.store.intersecting_range(*start, *end),
                    expected_range(&self.model, *start, *end),
                    "range query [{start}, {end}]"
                );
            }
            StoreOperation::Iterate => {
                let iterated: Vec<BasicSegment> = self.store.iter().collect();
                assert_eq!(iterated, canonically_sorted(&self.model));
            }
            StoreOperation::Clear => {
                self.store.clear();
                self.model.clear();
            }
        }
        assert_eq!(self.store.len(), self.model.len());
    }

    /// Checks the full contents of the store.
    ///
    /// # Panics
    ///
    /// Panics if the store disagrees with the model.
    pub fn verify(&self) {
        let contents = self.store.to_vec();
        assert!(is_canonically_sorted(&contents));
        assert_eq!(contents, canonically_sorted(&self.model));
        assert!(self.store.contains_all(&self.model));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Backend;

    fn seg(start: i64, end: i64) -> BasicSegment {
        BasicSegment::new(start, end).unwrap()
    }

    #[test]
    fn brute_force_queries() {
        let segments = vec![seg(4, 10), seg(1, 5), seg(2, 3)];
        assert_eq!(expected_point(&segments, 3), vec![seg(1, 5), seg(2, 3)]);
        assert_eq!(expected_range(&segments, 0, 2), vec![seg(1, 5), seg(2, 3)]);
        assert!(expected_range(&segments, 11, 12).is_empty());
    }

    #[test]
    fn sortedness_check() {
        assert!(is_canonically_sorted(&[seg(1, 2), seg(1, 3), seg(2, 2)]));
        assert!(!is_canonically_sorted(&[seg(1, 3), seg(1, 2)]));
        assert!(is_canonically_sorted::<BasicSegment>(&[]));
    }

    #[test]
    fn harness_tracks_operations() {
        for backend in Backend::ALL {
            let mut harness = ModelHarness::new(backend.create());
            harness.apply(&StoreOperation::Add { segment: seg(5, 6) });
            harness.apply(&StoreOperation::AddAll {
                segments: vec![seg(1, 2), seg(3, 9)],
            });
            harness.apply(&StoreOperation::Point { position: 5 });
            harness.apply(&StoreOperation::Range { start: 2, end: 3 });
            harness.apply(&StoreOperation::Iterate);
            harness.verify();
            assert_eq!(harness.model().len(), 3);

            harness.apply(&StoreOperation::Clear);
            harness.verify();
        }
    }
}
