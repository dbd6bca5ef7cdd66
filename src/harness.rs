//! Benchmark harness driving the sequential and parallel passes
//!
//! The harness owns the buffer for the duration of both passes, times each
//! with a monotonic clock, checks the combined parallel result against the
//! sequential baseline, and reports the speedup.

use crate::buffer::{self, FillMode};
use crate::dispatch::{default_worker_cnt, DispatchConfig, Dispatcher};
use crate::error::Result;
use crate::partition::span_of;
use crate::reduce::{self, PartialSums};
use std::time::{Duration, Instant};

#[cfg(feature = "serialization")]
use serde::Serialize;

/// Default buffer length: one billion bytes, large enough that the
/// remainder absorbed by the last worker is noise
pub const DEFAULT_BYTE_CNT: usize = 1_000_000_000;

/// Default seed for the random fill mode
pub const DEFAULT_SEED: u64 = 0xcafe_babe;

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Buffer length in bytes
    pub byte_cnt: usize,

    /// Worker count for the parallel pass
    pub worker_cnt: usize,

    /// Seed for the random fill mode
    pub seed: u64,

    /// How the buffer is filled
    pub fill: FillMode,

    /// Diagnostic verbosity (0 = quiet, 1 = phases, 2 = per-worker)
    pub debug: u32,

    /// Dispatcher configuration for the parallel pass
    pub dispatch: DispatchConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            byte_cnt: DEFAULT_BYTE_CNT,
            worker_cnt: default_worker_cnt(),
            seed: DEFAULT_SEED,
            fill: FillMode::Ramp,
            debug: 0,
            dispatch: DispatchConfig::default(),
        }
    }
}

impl BenchConfig {
    /// Create a new benchmark configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the buffer length
    pub fn with_byte_cnt(mut self, byte_cnt: usize) -> Self {
        self.byte_cnt = byte_cnt;
        self
    }

    /// Set the worker count
    pub fn with_worker_cnt(mut self, worker_cnt: usize) -> Self {
        self.worker_cnt = worker_cnt;
        self
    }

    /// Set the random fill seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the fill mode
    pub fn with_fill(mut self, fill: FillMode) -> Self {
        self.fill = fill;
        self
    }

    /// Set the diagnostic verbosity
    pub fn with_debug(mut self, debug: u32) -> Self {
        self.debug = debug;
        self
    }

    /// Set the dispatcher configuration
    pub fn with_dispatch(mut self, dispatch: DispatchConfig) -> Self {
        self.dispatch = dispatch;
        self
    }
}

/// Outcome of one verified benchmark run
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialization", derive(Serialize))]
pub struct BenchReport {
    /// Buffer length that was summed
    pub byte_cnt: usize,

    /// Worker count of the parallel pass
    pub worker_cnt: usize,

    /// Result of the sequential pass
    pub sequential_sum: u64,

    /// Combined result of the parallel pass
    pub parallel_sum: u64,

    /// Wall-clock time of the sequential pass
    pub sequential_elapsed: Duration,

    /// Wall-clock time of the parallel pass (dispatch plus combine)
    pub parallel_elapsed: Duration,
}

impl BenchReport {
    /// Sequential over parallel elapsed time; 0.0 if the parallel window
    /// was too short to measure
    pub fn speedup(&self) -> f64 {
        let parallel = self.parallel_elapsed.as_secs_f64();
        if parallel == 0.0 {
            return 0.0;
        }
        self.sequential_elapsed.as_secs_f64() / parallel
    }
}

/// Benchmark harness
pub struct Harness {
    config: BenchConfig,
    dispatcher: Dispatcher,
}

impl Harness {
    /// Create a harness from a benchmark configuration
    pub fn new(config: BenchConfig) -> Self {
        let dispatcher = Dispatcher::with_config(config.dispatch.clone());
        Self { config, dispatcher }
    }

    /// Get the benchmark configuration
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Fill the buffer, run both passes, and verify their results agree
    ///
    /// The parallel timing window covers dispatch and the combine fold, so
    /// the two passes are timed over equivalent work. A mismatch between
    /// the two sums comes back as [`Error::SumMismatch`]; the caller
    /// decides whether that terminates the process.
    ///
    /// [`Error::SumMismatch`]: crate::error::Error::SumMismatch
    pub fn run(&self) -> Result<BenchReport> {
        let config = &self.config;
        let bytes = buffer::fill(config.fill, config.byte_cnt, config.seed)?;

        if config.debug >= 1 {
            eprintln!(
                "buffer ready: {} bytes ({:?} fill), {} workers",
                bytes.len(),
                config.fill,
                config.worker_cnt
            );
        }

        let begin = Instant::now();
        let sequential_sum = reduce::sequential_sum(&bytes);
        let sequential_elapsed = begin.elapsed();

        let partials = PartialSums::new(config.worker_cnt);
        let debug = config.debug;

        let begin = Instant::now();
        self.dispatcher.dispatch(config.worker_cnt, |ctx| {
            let span = span_of(ctx.tid, ctx.worker_cnt, bytes.len());
            if debug >= 2 {
                eprintln!("worker {} summing [{}, {})", ctx.tid, span.start, span.end);
            }
            let sum = reduce::sequential_sum(&bytes[span.start..span.end]);
            partials.record(ctx.tid, sum);
        })?;
        let parallel_sum = partials.combine();
        let parallel_elapsed = begin.elapsed();

        reduce::verify(sequential_sum, parallel_sum)?;

        Ok(BenchReport {
            byte_cnt: config.byte_cnt,
            worker_cnt: config.worker_cnt,
            sequential_sum,
            parallel_sum,
            sequential_elapsed,
            parallel_elapsed,
        })
    }
}
