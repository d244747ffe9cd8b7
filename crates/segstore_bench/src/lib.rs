//! Benchmark utilities.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use segstore_core::BasicSegment;

/// Seed shared by every benchmark so runs are comparable.
pub const SEED: u64 = 0x7ace;

/// Generates `count` segments in random order.
pub fn random_segments(count: usize, max_len: i64) -> Vec<BasicSegment> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let span = (count as i64).max(1) * 10;
    (0..count)
        .map(|_| {
            let start = rng.gen_range(0..span);
            segment(start, start + rng.gen_range(0..=max_len))
        })
        .collect()
}

/// Generates `count` segments already in canonical order, like a trace read
/// front to back.
pub fn ordered_segments(count: usize, max_len: i64) -> Vec<BasicSegment> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..count as i64)
        .map(|i| segment(i * 10, i * 10 + rng.gen_range(0..=max_len)))
        .collect()
}

/// Generates `count` query positions inside the span of `count` segments.
pub fn query_positions(count: usize, segments: usize) -> Vec<i64> {
    let mut rng = StdRng::seed_from_u64(SEED ^ 1);
    let span = (segments as i64).max(1) * 10;
    (0..count).map(|_| rng.gen_range(0..span)).collect()
}

fn segment(start: i64, end: i64) -> BasicSegment {
    match BasicSegment::new(start, end) {
        Ok(segment) => segment,
        Err(_) => unreachable!("generated end is never before start"),
    }
}
