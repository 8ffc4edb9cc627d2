use crate::UnitError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("`workers` must be a positive integer")]
    InvalidWorkers,

    #[error("`repeats` must be a positive integer")]
    InvalidRepeats,

    /// The unit factory failed to initialize; fatal to this workload's run
    /// and distinct from a per-invocation failure.
    #[error("workload init failed: {0}")]
    Init(UnitError),

    #[error("run cancelled")]
    Cancelled,

    /// A unit aborted mid-run. Only the faulting worker's slice is lost;
    /// sibling tallies stay isolated until reduction.
    #[error("worker {worker} faulted after {completed} completed invocations: {message}")]
    WorkerFault {
        worker: usize,
        completed: u64,
        message: String,
    },

    #[error("run finished with zero elapsed time; refusing to derive throughput")]
    ZeroElapsed,
}
