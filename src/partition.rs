//! Static work partitioning for fork-join dispatch
//!
//! Partitioning is computed once per dispatch call and never rebalanced:
//! each worker derives its own contiguous index range from nothing but its
//! id, the worker count, and the buffer length.

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// A half-open index range `[start, end)` assigned to one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Span {
    /// First index covered by this span
    pub start: usize,

    /// One past the last index covered by this span
    pub end: usize,
}

impl Span {
    /// Number of elements in the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no elements
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Compute the span assigned to worker `tid` out of `worker_cnt` workers
/// over a buffer of `len` elements.
///
/// Every worker gets `len / worker_cnt` elements; the last worker also
/// absorbs the `len % worker_cnt` remainder. The imbalance is at most
/// `worker_cnt - 1` extra elements on the last worker, a deliberate
/// trade-off that keeps the ranges derivable from `(tid, worker_cnt, len)`
/// alone.
///
/// # Panics
///
/// Panics if `tid >= worker_cnt` or `worker_cnt == 0`; callers go through
/// the dispatcher, which rejects those counts before any worker runs.
pub fn span_of(tid: usize, worker_cnt: usize, len: usize) -> Span {
    assert!(tid < worker_cnt, "worker id {} out of range", tid);

    let share = len / worker_cnt;
    let start = tid * share;
    let end = if tid == worker_cnt - 1 {
        len
    } else {
        start + share
    };

    Span { start, end }
}

/// Compute the full ordered partition of `[0, len)` across `worker_cnt`
/// workers.
///
/// The returned spans are pairwise disjoint and their union is exactly
/// `[0, len)`. With `worker_cnt == 1` the single span is `[0, len)`, the
/// same range the sequential path walks.
pub fn split(len: usize, worker_cnt: usize) -> Vec<Span> {
    (0..worker_cnt)
        .map(|tid| span_of(tid, worker_cnt, len))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_worker_covers_everything() {
        let spans = split(1000, 1);
        assert_eq!(spans, vec![Span { start: 0, end: 1000 }]);
    }

    #[test]
    fn test_last_span_absorbs_remainder() {
        let spans = split(10, 3);
        assert_eq!(
            spans,
            vec![
                Span { start: 0, end: 3 },
                Span { start: 3, end: 6 },
                Span { start: 6, end: 10 },
            ]
        );
    }

    #[test]
    fn test_spans_disjoint_and_covering() {
        for len in [1, 2, 7, 100, 1000, 4096, 65537] {
            for worker_cnt in 1..=16 {
                let spans = split(len, worker_cnt);
                assert_eq!(spans.len(), worker_cnt);

                // Adjacent spans must meet exactly, starting at 0 and
                // ending at len.
                let mut expected_start = 0;
                for span in &spans {
                    assert_eq!(span.start, expected_start);
                    assert!(span.end >= span.start);
                    expected_start = span.end;
                }
                assert_eq!(expected_start, len);
            }
        }
    }

    #[test]
    fn test_more_workers_than_items() {
        let spans = split(3, 8);

        // Leading workers get empty spans, the last one takes the whole
        // buffer.
        for span in &spans[..7] {
            assert!(span.is_empty());
        }
        assert_eq!(spans[7], Span { start: 0, end: 3 });
    }

    #[test]
    fn test_span_len() {
        let span = Span { start: 4, end: 9 };
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_tid_out_of_range_panics() {
        span_of(4, 4, 100);
    }
}
