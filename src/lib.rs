//! # Fork-Join Reduction Library
//!
//! A fork-join dispatch primitive for Rust that partitions a fixed-size
//! workload across a configurable number of worker threads, runs an opaque
//! per-worker reduction callback, and combines per-worker partials into one
//! value checked against a sequential baseline.
//!
//! ## Key Features
//!
//! - **Static partitioning**: disjoint contiguous ranges computed once per
//!   dispatch, derivable from `(tid, worker_cnt, len)` alone
//! - **Full join barrier**: `dispatch` returns only after every worker has
//!   terminated; no partial results are visible earlier
//! - **Lock-free by construction**: the buffer is read-only during dispatch
//!   and every worker writes its own result slot
//! - **Opaque worker callback**: the dispatcher knows nothing about the
//!   reduction; shared state rides in the closure
//! - **Verified runs**: the combined result must equal the sequential
//!   single-pass reduction, or the run fails
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  span [0,a)   ┌─────────────┐
//! │  Worker 0   │ ────────────> │ PartialSums │
//! │             │               │   slot 0    │
//! └─────────────┘               ├─────────────┤
//! ┌─────────────┐  span [a,L)   │   slot 1    │
//! │  Worker 1   │ ────────────> │             │
//! └─────────────┘               └─────────────┘
//!       │                             │
//!       ▼ join barrier                ▼ combine
//! ┌─────────────────────────────────────────┐
//! │ Harness: Σ slots == sequential_sum ?    │
//! └─────────────────────────────────────────┘
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod buffer;
pub mod dispatch;
pub mod error;
pub mod harness;
pub mod partition;
pub mod reduce;

// Re-exports
pub use buffer::FillMode;
pub use dispatch::{default_worker_cnt, DispatchConfig, Dispatcher, WorkerCtx, DEFAULT_MAX_WORKERS};
pub use error::{Error, Result};
pub use harness::{BenchConfig, BenchReport, Harness};
pub use partition::{span_of, split, Span};
pub use reduce::{sequential_sum, PartialSums};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::buffer::FillMode;
    pub use crate::dispatch::{DispatchConfig, Dispatcher, WorkerCtx};
    pub use crate::error::{Error, Result};
    pub use crate::harness::{BenchConfig, BenchReport, Harness};
    pub use crate::partition::{span_of, Span};
    pub use crate::reduce::{sequential_sum, PartialSums};
}
