//! Fuzz testing harnesses for segment stores.
//!
//! These targets decode arbitrary bytes into store operations and can be
//! driven by cargo-fuzz or any other byte-oriented fuzzer.

use crate::fixtures::Backend;
use crate::generators::StoreOperation;
use crate::integration::ModelHarness;
use segstore_core::{BasicSegment, EagerSortedStore, LazySortedStore, SegmentStore};

/// Bytes consumed per decoded operation.
const OP_WIDTH: usize = 4;

/// Decodes `data` into store operations, four bytes at a time.
///
/// Trailing bytes that do not fill an operation are ignored.
pub fn decode_operations(data: &[u8]) -> Vec<StoreOperation> {
    data.chunks_exact(OP_WIDTH)
        .map(|chunk| {
            let a = i64::from(chunk[1]);
            let b = i64::from(chunk[2]);
            let c = i64::from(chunk[3]);
            match chunk[0] % 8 {
                0..=2 => StoreOperation::Add {
                    segment: bounded(a, b % 32),
                },
                3 => StoreOperation::AddAll {
                    segments: (0..c % 4).map(|i| bounded(a + i, b % 16)).collect(),
                },
                4 => StoreOperation::Point { position: a },
                5 => StoreOperation::Range {
                    start: a.min(b),
                    end: a.max(b),
                },
                6 => StoreOperation::Iterate,
                _ => StoreOperation::Clear,
            }
        })
        .collect()
}

fn bounded(start: i64, len: i64) -> BasicSegment {
    BasicSegment::new(start, start + len).expect("non-negative length")
}

/// Fuzz target for store operation sequences.
///
/// Runs the decoded sequence against every backend and checks each result
/// against the model.
pub fn fuzz_store_operations(data: &[u8]) {
    let operations = decode_operations(data);
    for backend in Backend::ALL {
        let mut harness = ModelHarness::new(backend.create());
        for op in &operations {
            harness.apply(op);
        }
        harness.verify();
    }
}

/// Fuzz target for lenient raw ingestion.
///
/// Every byte pair is a candidate `(start, end)`; pairs with `end < start`
/// must be dropped and the rest kept.
pub fn fuzz_raw_ingestion(data: &[u8]) {
    let raw: Vec<(i64, i64)> = data
        .chunks_exact(2)
        .map(|pair| (i64::from(pair[0]), i64::from(pair[1])))
        .collect();
    let valid = raw.iter().filter(|(start, end)| end >= start).count();

    let eager: EagerSortedStore<BasicSegment> = EagerSortedStore::from_raw(raw.clone());
    let lazy: LazySortedStore<BasicSegment> = LazySortedStore::from_raw(raw);

    assert_eq!(eager.len(), valid);
    assert_eq!(lazy.len(), valid);
    assert_eq!(eager.to_vec(), lazy.to_vec());
}
