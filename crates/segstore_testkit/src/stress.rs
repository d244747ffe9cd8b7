//! Stress tests for segment stores.
//!
//! These helpers build a store from several producer threads while reader
//! threads iterate and query it, then report what happened.

use crate::integration::is_canonically_sorted;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use segstore_core::{BasicSegment, SegmentStore};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Segments added by all producers.
    pub adds: usize,
    /// Adds that returned an error.
    pub failed_adds: usize,
    /// Reads performed by all readers.
    pub reads: usize,
    /// Reads that observed a snapshot out of canonical order.
    pub unsorted_reads: usize,
    /// Total duration.
    pub duration: Duration,
    /// Adds per second.
    pub adds_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(
        adds: usize,
        failed_adds: usize,
        reads: usize,
        unsorted_reads: usize,
        duration: Duration,
    ) -> Self {
        let adds_per_second = if duration.as_secs_f64() > 0.0 {
            adds as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            adds,
            failed_adds,
            reads,
            unsorted_reads,
            duration,
            adds_per_second,
        }
    }

    /// Prints a summary of the test.
    pub fn print_summary(&self, name: &str) {
        println!("\n=== {} ===", name);
        println!("Adds: {} ({} failed)", self.adds, self.failed_adds);
        println!("Reads: {} ({} unsorted)", self.reads, self.unsorted_reads);
        println!("Duration: {:?}", self.duration);
        println!("Throughput: {:.2} adds/sec", self.adds_per_second);
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of producer threads.
    pub producers: usize,
    /// Adds performed by each producer.
    pub adds_per_producer: usize,
    /// Number of reader threads running while producers add.
    pub readers: usize,
    /// Upper bound for generated segment starts.
    pub max_start: i64,
    /// Upper bound for generated segment lengths.
    pub max_length: i64,
    /// Seed for the producers' random generators.
    pub seed: u64,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            producers: 4,
            adds_per_producer: 2_000,
            readers: 2,
            max_start: 1_000_000,
            max_length: 10_000,
            seed: 0x5e65_7031,
        }
    }
}

impl StressConfig {
    /// Total number of segments the producers will add.
    pub fn total_adds(&self) -> usize {
        self.producers * self.adds_per_producer
    }
}

/// Generates the segments producer `producer` adds, deterministically.
pub fn producer_segments(config: &StressConfig, producer: usize) -> Vec<BasicSegment> {
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(producer as u64));
    (0..config.adds_per_producer)
        .map(|_| {
            let start = rng.gen_range(0..config.max_start);
            let length = rng.gen_range(0..=config.max_length);
            BasicSegment::new(start, start + length).expect("non-negative length")
        })
        .collect()
}

/// Builds `store` from concurrent producers while readers iterate and query.
///
/// Readers alternate between `len`, a full snapshot iteration and a point
/// query, and count every snapshot that is not in canonical order.
pub fn stress_concurrent_build(
    store: Arc<dyn SegmentStore<BasicSegment>>,
    config: &StressConfig,
) -> StressTestResult {
    let adds = Arc::new(AtomicUsize::new(0));
    let failed_adds = Arc::new(AtomicUsize::new(0));
    let reads = Arc::new(AtomicUsize::new(0));
    let unsorted_reads = Arc::new(AtomicUsize::new(0));
    let producers_done = Arc::new(AtomicBool::new(false));

    let start = Instant::now();

    let readers: Vec<_> = (0..config.readers)
        .map(|r| {
            let store = Arc::clone(&store);
            let reads = Arc::clone(&reads);
            let unsorted_reads = Arc::clone(&unsorted_reads);
            let producers_done = Arc::clone(&producers_done);
            let max_start = config.max_start;

            thread::spawn(move || {
                let mut round = r;
                while !producers_done.load(Ordering::Acquire) {
                    match round % 3 {
                        0 => {
                            let _ = store.len();
                        }
                        1 => {
                            let snapshot = store.snapshot();
                            if !is_canonically_sorted(&snapshot) {
                                unsorted_reads.fetch_add(1, Ordering::Relaxed);
                            }
                        }
                        _ => {
                            let position = (round as i64 * 7919) % max_start;
                            let _ = store.intersecting(position);
                        }
                    }
                    reads.fetch_add(1, Ordering::Relaxed);
                    round += 1;
                }
            })
        })
        .collect();

    let producers: Vec<_> = (0..config.producers)
        .map(|p| {
            let store = Arc::clone(&store);
            let adds = Arc::clone(&adds);
            let failed_adds = Arc::clone(&failed_adds);
            let segments = producer_segments(config, p);

            thread::spawn(move || {
                for segment in segments {
                    match store.add(segment) {
                        Ok(_) => adds.fetch_add(1, Ordering::Relaxed),
                        Err(_) => failed_adds.fetch_add(1, Ordering::Relaxed),
                    };
                }
            })
        })
        .collect();

    for handle in producers {
        handle.join().expect("Producer thread panicked");
    }
    producers_done.store(true, Ordering::Release);
    for handle in readers {
        handle.join().expect("Reader thread panicked");
    }

    StressTestResult::new(
        adds.load(Ordering::Relaxed),
        failed_adds.load(Ordering::Relaxed),
        reads.load(Ordering::Relaxed),
        unsorted_reads.load(Ordering::Relaxed),
        start.elapsed(),
    )
}

/// Adds every producer's segments from a single thread.
pub fn stress_sequential_build(
    store: &dyn SegmentStore<BasicSegment>,
    config: &StressConfig,
) -> StressTestResult {
    let start = Instant::now();
    let mut adds = 0usize;
    let mut failed_adds = 0usize;

    for p in 0..config.producers {
        for segment in producer_segments(config, p) {
            match store.add(segment) {
                Ok(_) => adds += 1,
                Err(_) => failed_adds += 1,
            }
        }
    }

    StressTestResult::new(adds, failed_adds, 0, 0, start.elapsed())
}
