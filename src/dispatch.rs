//! Fork-join thread dispatch
//!
//! The dispatcher starts a fresh set of worker threads for every call,
//! invokes the caller's callback once per worker id, and blocks until all
//! workers have terminated. It holds no business state of its own: the
//! callback captures whatever shared context the reduction needs, so the
//! dispatcher stays independent of the work being performed.

use crate::error::{Error, Result};
use crossbeam::thread;

/// Default upper bound on concurrently dispatched workers
pub const DEFAULT_MAX_WORKERS: usize = 256;

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Maximum worker count accepted by `dispatch`
    pub max_workers: usize,

    /// Pin worker `tid` to core `tid % ncores` for stable timings
    pub pin_workers: bool,

    /// Worker thread name prefix (for debugging/monitoring)
    pub name: Option<String>,

    /// Stack size for worker threads (None = platform default)
    pub stack_size: Option<usize>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            pin_workers: false,
            name: None,
            stack_size: None,
        }
    }
}

impl DispatchConfig {
    /// Create a new dispatch configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum accepted worker count
    pub fn with_max_workers(mut self, max: usize) -> Self {
        self.max_workers = max;
        self
    }

    /// Enable CPU affinity pinning
    pub fn with_pin_workers(mut self, pin: bool) -> Self {
        self.pin_workers = pin;
        self
    }

    /// Set the worker thread name prefix
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the worker thread stack size
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = Some(size);
        self
    }
}

/// Identity handed to each worker invocation
///
/// Shared state (buffer, results table) is not part of the context; the
/// callback passed to [`Dispatcher::dispatch`] captures it instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerCtx {
    /// This worker's id, in `[0, worker_cnt)`
    pub tid: usize,

    /// Total number of workers in this dispatch
    pub worker_cnt: usize,
}

/// Fork-join dispatcher
///
/// Threads are created fresh per [`dispatch`](Dispatcher::dispatch) call and
/// never reused; there is no persistent pool.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: DispatchConfig,
}

impl Dispatcher {
    /// Create a dispatcher with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with the given configuration
    pub fn with_config(config: DispatchConfig) -> Self {
        Self { config }
    }

    /// Get the dispatcher configuration
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Run `worker` once per id in `[0, worker_cnt)` on concurrent threads
    /// and return after every invocation has terminated.
    ///
    /// No partial results are visible to the caller before the join: the
    /// return of this function is the barrier. `worker_cnt` must be at
    /// least 1 and no greater than the configured maximum; counts above
    /// the maximum are rejected, never truncated. A spawn failure fails
    /// the whole dispatch (already running workers are still joined), and
    /// a panicking worker surfaces as [`Error::WorkerPanicked`].
    pub fn dispatch<F>(&self, worker_cnt: usize, worker: F) -> Result<()>
    where
        F: Fn(WorkerCtx) + Sync,
    {
        if worker_cnt == 0 {
            return Err(Error::InvalidConfig(
                "worker count must be at least 1".to_string(),
            ));
        }
        if worker_cnt > self.config.max_workers {
            return Err(Error::InvalidConfig(format!(
                "worker count {} exceeds maximum {}",
                worker_cnt, self.config.max_workers
            )));
        }

        let config = &self.config;
        let worker = &worker;
        let prefix = config.name.as_deref().unwrap_or("fork-join");

        let outcome = thread::scope(|scope| -> Result<()> {
            let mut handles = Vec::with_capacity(worker_cnt);

            for tid in 0..worker_cnt {
                let mut builder = scope.builder().name(format!("{}-{}", prefix, tid));
                if let Some(stack_size) = config.stack_size {
                    builder = builder.stack_size(stack_size);
                }

                let handle = builder
                    .spawn(move |_| {
                        if config.pin_workers {
                            pin_to_core(tid);
                        }
                        worker(WorkerCtx { tid, worker_cnt });
                    })
                    .map_err(|e| Error::Spawn(e.to_string()))?;

                handles.push(handle);
            }

            // The join barrier: nothing a worker wrote is read before this
            // loop has seen every thread terminate.
            for handle in handles {
                handle
                    .join()
                    .map_err(|_| Error::WorkerPanicked("worker thread panicked".to_string()))?;
            }

            Ok(())
        });

        // An Err from the scope itself means a thread that was still
        // unjoined when the scope closed had panicked.
        match outcome {
            Ok(result) => result,
            Err(_) => Err(Error::WorkerPanicked(
                "worker thread panicked".to_string(),
            )),
        }
    }
}

/// Default worker count: the platform-reported hardware concurrency,
/// floored at 1 so a degenerate report still yields a valid one-worker
/// dispatch.
pub fn default_worker_cnt() -> usize {
    num_cpus::get().max(1)
}

/// Pin the current thread to core `tid % ncores`, if core ids are available
fn pin_to_core(tid: usize) {
    if let Some(core_ids) = core_affinity::get_core_ids() {
        if !core_ids.is_empty() {
            core_affinity::set_for_current(core_ids[tid % core_ids.len()]);
        }
    }
}
