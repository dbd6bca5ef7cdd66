//! Per-worker partial results and the reduction combiner
//!
//! The results table is a write-once mailbox keyed by worker id: every
//! worker stores into its own slot and never reads another's, so no lock
//! is needed. Slots are only read back after the dispatch join barrier.

use crate::error::{Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};

/// Per-worker partial result table, one 64-bit accumulator per worker
///
/// The table is allocated to exactly the worker count of the dispatch it
/// serves; there is no fixed compile-time capacity to outgrow.
#[derive(Debug)]
pub struct PartialSums {
    slots: Box<[AtomicU64]>,
}

impl PartialSums {
    /// Create a table with one zeroed slot per worker
    pub fn new(worker_cnt: usize) -> Self {
        let slots = (0..worker_cnt).map(|_| AtomicU64::new(0)).collect();
        Self { slots }
    }

    /// Number of worker slots in the table
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the table has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Record worker `tid`'s partial result
    ///
    /// Each slot is written by exactly one worker; the join barrier orders
    /// all stores before any [`combine`](Self::combine) load, so relaxed
    /// ordering suffices.
    pub fn record(&self, tid: usize, value: u64) {
        self.slots[tid].store(value, Ordering::Relaxed);
    }

    /// Read back worker `tid`'s partial result
    pub fn get(&self, tid: usize) -> u64 {
        self.slots[tid].load(Ordering::Relaxed)
    }

    /// Fold all partial results into one scalar
    ///
    /// Must only be called after the dispatch that filled the table has
    /// returned. Uses the same associative, commutative operator as the
    /// workers, so the fold order does not matter.
    pub fn combine(&self) -> u64 {
        self.slots
            .iter()
            .map(|slot| slot.load(Ordering::Relaxed))
            .sum()
    }
}

/// Single-pass sequential reduction over the whole buffer
///
/// This is the baseline the combined parallel result is checked against.
pub fn sequential_sum(bytes: &[u8]) -> u64 {
    bytes.iter().map(|&b| u64::from(b)).sum()
}

/// Check the combined parallel result against the sequential baseline
///
/// Inequality signals a defect in partitioning or reduction, not a
/// transient fault; the caller decides how hard to fail.
pub fn verify(expected: u64, actual: u64) -> Result<u64> {
    if expected == actual {
        Ok(actual)
    } else {
        Err(Error::SumMismatch { expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Dispatcher;
    use crate::partition::span_of;

    fn parallel_sum(bytes: &[u8], worker_cnt: usize) -> u64 {
        let dispatcher = Dispatcher::new();
        let partials = PartialSums::new(worker_cnt);

        dispatcher
            .dispatch(worker_cnt, |ctx| {
                let span = span_of(ctx.tid, ctx.worker_cnt, bytes.len());
                let sum = sequential_sum(&bytes[span.start..span.end]);
                partials.record(ctx.tid, sum);
            })
            .unwrap();

        partials.combine()
    }

    #[test]
    fn test_combine_matches_sequential() {
        let bytes: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let expected = sequential_sum(&bytes);

        for worker_cnt in [1, 2, 3, 4, 7, 8, 16] {
            assert_eq!(parallel_sum(&bytes, worker_cnt), expected);
        }
    }

    #[test]
    fn test_known_total_four_workers() {
        // 1000 bytes of i % 256: three full 0..=255 ramps plus 0..=231.
        let bytes: Vec<u8> = (0..1000u32).map(|i| (i % 256) as u8).collect();
        assert_eq!(parallel_sum(&bytes, 4), 124_716);
    }

    #[test]
    fn test_single_worker_equals_sequential() {
        let bytes: Vec<u8> = (0..777u32).map(|i| (i % 256) as u8).collect();
        assert_eq!(parallel_sum(&bytes, 1), sequential_sum(&bytes));
    }

    #[test]
    fn test_dispatch_is_idempotent() {
        let bytes: Vec<u8> = (0..5000u32).map(|i| (i % 256) as u8).collect();
        let first = parallel_sum(&bytes, 6);
        for _ in 0..5 {
            assert_eq!(parallel_sum(&bytes, 6), first);
        }
    }

    #[test]
    fn test_empty_table_combines_to_zero() {
        let partials = PartialSums::new(0);
        assert!(partials.is_empty());
        assert_eq!(partials.combine(), 0);
    }

    #[test]
    fn test_verify_accepts_equal_rejects_unequal() {
        assert_eq!(verify(42, 42).unwrap(), 42);
        assert!(matches!(
            verify(42, 41),
            Err(Error::SumMismatch {
                expected: 42,
                actual: 41
            })
        ));
    }

    #[test]
    fn test_record_and_get_roundtrip() {
        let partials = PartialSums::new(3);
        partials.record(1, 99);
        assert_eq!(partials.get(1), 99);
        assert_eq!(partials.get(0), 0);
        assert_eq!(partials.len(), 3);
    }
}
