//! Property tests run against every backend.

use proptest::prelude::*;
use segstore_core::{BasicSegment, EagerSortedStore, LazySortedStore, SegmentStore};
use segstore_testkit::prelude::*;

fn filled(backend: Backend, segments: &[BasicSegment]) -> Box<dyn SegmentStore<BasicSegment>> {
    let store = backend.create();
    for segment in segments {
        store.add(*segment).unwrap();
    }
    store
}

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn iteration_is_sorted_and_complete(segments in segments_strategy(64)) {
        for backend in Backend::ALL {
            let store = filled(backend, &segments);
            let iterated: Vec<BasicSegment> = store.iter().collect();
            prop_assert_eq!(iterated.len(), segments.len());
            prop_assert!(is_canonically_sorted(&iterated));
            prop_assert_eq!(iterated, canonically_sorted(&segments));
        }
    }

    #[test]
    fn point_queries_are_exact(
        segments in segments_strategy(64),
        position in -10i64..140,
    ) {
        let expected = expected_point(&segments, position);
        for backend in Backend::ALL {
            let store = filled(backend, &segments);
            prop_assert_eq!(store.intersecting(position), expected.clone());
        }
    }

    #[test]
    fn range_queries_are_exact(
        segments in segments_strategy(64),
        (start, end) in query_range_strategy(),
    ) {
        let expected = expected_range(&segments, start, end);
        for backend in Backend::ALL {
            let store = filled(backend, &segments);
            prop_assert_eq!(store.intersecting_range(start, end), expected.clone());
        }
    }

    #[test]
    fn insertion_order_does_not_change_contents(
        segments in segments_strategy(48),
        rotation in 0usize..48,
    ) {
        let mut permuted = segments.clone();
        if !permuted.is_empty() {
            let by = rotation % permuted.len();
            permuted.rotate_left(by);
        }
        permuted.reverse();

        for backend in Backend::ALL {
            let a = filled(backend, &segments);
            let b = filled(backend, &permuted);
            prop_assert_eq!(a.to_vec(), b.to_vec());
        }
    }

    #[test]
    fn payload_ties_keep_insertion_order(segments in prop::collection::vec(test_segment_strategy(), 0..40)) {
        for backend in Backend::ALL {
            let store = backend.create::<TestSegment>();
            for segment in &segments {
                store.add(segment.clone()).unwrap();
            }
            let mut expected = segments.clone();
            expected.sort_by(segstore_core::comparator::canonical);
            prop_assert_eq!(store.to_vec(), expected);
        }
    }

    #[test]
    fn backends_agree_on_operation_sequences(ops in operation_sequence_strategy(1, 60)) {
        for backend in Backend::ALL {
            let mut harness = ModelHarness::new(backend.create());
            for op in &ops {
                harness.apply(op);
            }
            harness.verify();
        }
    }

    #[test]
    fn removal_never_succeeds(segments in segments_strategy(16)) {
        for backend in Backend::ALL {
            let store = filled(backend, &segments);
            for segment in &segments {
                prop_assert!(store.remove(segment).is_err());
            }
            prop_assert!(store.remove_all(&segments).is_err());
            prop_assert!(store.retain_all(&[]).is_err());
            prop_assert_eq!(store.len(), segments.len());
        }
    }

    #[test]
    fn lenient_ingestion_keeps_valid_pairs(raw in raw_bounds_strategy()) {
        let valid = raw.iter().filter(|(start, end)| end >= start).count();
        let eager: EagerSortedStore<BasicSegment> = EagerSortedStore::from_raw(raw.clone());
        let lazy: LazySortedStore<BasicSegment> = LazySortedStore::from_raw(raw.clone());
        prop_assert_eq!(eager.len(), valid);
        prop_assert_eq!(lazy.len(), valid);
        prop_assert_eq!(eager.to_vec(), lazy.to_vec());

        let all_valid = valid == raw.len();
        let strict = EagerSortedStore::<BasicSegment>::try_from_raw(raw);
        prop_assert_eq!(strict.is_ok(), all_valid);
    }
}

#[test]
fn fuzz_decoder_smoke() {
    let data: Vec<u8> = (0u8..=255).collect();
    fuzz_store_operations(&data);
    fuzz_raw_ingestion(&data);
}
