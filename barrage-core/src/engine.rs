use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::WorkUnit;
use crate::error::{Error, Result};
use crate::gate::StartGate;
use crate::result::{RunResult, WorkerTally};
use crate::workload::Workload;

/// Cooperative cancellation handle checked by every worker between
/// invocations. Lets a caller bound a run whose unit would otherwise block
/// forever; an untouched token never interferes with a run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Explicit run parameters, passed in at call time. There is no process-wide
/// run state anywhere in this crate.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub workers: u64,
    /// Suite-level policy: record a failed workload run and move on instead
    /// of aborting the remaining workloads.
    pub continue_on_error: bool,
    pub cancel: CancelToken,
}

impl RunConfig {
    pub fn new(workers: u64) -> Self {
        Self {
            workers,
            continue_on_error: false,
            cancel: CancelToken::new(),
        }
    }
}

/// Run one workload across a fresh pool of worker threads and reduce the
/// per-worker tallies into a single [`RunResult`].
///
/// The factory is initialized once before any worker exists; each worker
/// then owns its own unit. Workers arm themselves on a [`StartGate`] and the
/// timer covers exactly the window between the go signal and the last join,
/// so setup cost never leaks into throughput figures.
pub fn run_workload(workload: &mut Workload, cfg: &RunConfig) -> Result<RunResult> {
    if cfg.workers == 0 {
        return Err(Error::InvalidWorkers);
    }
    if workload.repeats == 0 {
        return Err(Error::InvalidRepeats);
    }

    workload.factory.init(&workload.params).map_err(Error::Init)?;

    let slices = worker_slices(workload.repeats, cfg.workers);
    let units: Vec<Box<dyn WorkUnit>> = slices.iter().map(|_| workload.factory.unit()).collect();

    tracing::debug!(
        workload = %workload.display_name(),
        workers = slices.len(),
        repeats = workload.repeats,
        "dispatching workers"
    );

    let gate = StartGate::new();
    let (elapsed, worker_results) = std::thread::scope(|scope| {
        let gate = &gate;
        let mut handles = Vec::with_capacity(slices.len());
        for (worker, (&slice, unit)) in slices.iter().zip(units).enumerate() {
            let cancel = cfg.cancel.clone();
            handles.push(scope.spawn(move || worker_loop(worker, unit, slice, gate, &cancel)));
        }

        gate.wait_ready(handles.len());
        let started = Instant::now();
        gate.release();

        let results: Vec<Result<WorkerTally>> = handles
            .into_iter()
            .enumerate()
            .map(|(worker, handle)| {
                handle.join().unwrap_or_else(|_| {
                    Err(Error::WorkerFault {
                        worker,
                        completed: 0,
                        message: "worker thread panicked".to_string(),
                    })
                })
            })
            .collect();

        (started.elapsed(), results)
    });

    let mut tallies = Vec::with_capacity(worker_results.len());
    let mut cancelled = false;
    for result in worker_results {
        match result {
            Ok(tally) => tallies.push(tally),
            Err(Error::Cancelled) => cancelled = true,
            Err(err) => return Err(err),
        }
    }
    if cancelled {
        return Err(Error::Cancelled);
    }

    if elapsed.is_zero() {
        return Err(Error::ZeroElapsed);
    }

    let result = RunResult::reduce(elapsed, tallies.iter());
    tracing::debug!(
        workload = %workload.display_name(),
        elapsed_ms = elapsed.as_millis() as u64,
        passed = result.passed,
        failed = result.failed(),
        "run complete"
    );

    Ok(result)
}

fn worker_loop(
    worker: usize,
    mut unit: Box<dyn WorkUnit>,
    slice: u64,
    gate: &StartGate,
    cancel: &CancelToken,
) -> Result<WorkerTally> {
    let mut tally = WorkerTally::default();

    gate.arrive_and_wait();

    for _ in 0..slice {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let outcome = match catch_unwind(AssertUnwindSafe(|| unit.execute())) {
            Ok(outcome) => outcome,
            Err(payload) => {
                return Err(Error::WorkerFault {
                    worker,
                    completed: tally.attempts,
                    message: panic_message(payload.as_ref()),
                });
            }
        };

        if !outcome.is_success() {
            tracing::warn!(
                worker,
                status = outcome.status,
                "invocation returned non-success status"
            );
        }
        tally.record(&outcome);
    }

    Ok(tally)
}

/// Split `repeats` across `workers`: the first `repeats % workers` workers
/// take one extra invocation, so the total attempted equals `repeats`
/// exactly even when the division is uneven.
fn worker_slices(repeats: u64, workers: u64) -> Vec<u64> {
    let workers = workers.min(usize::MAX as u64) as usize;
    let base = repeats / workers as u64;
    let extra = (repeats % workers as u64) as usize;

    (0..workers)
        .map(|worker| if worker < extra { base + 1 } else { base })
        .collect()
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unit panicked".to_string()
    }
}
