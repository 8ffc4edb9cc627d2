use crate::engine::{RunConfig, run_workload};
use crate::error::{Error, Result};
use crate::result::RunResult;
use crate::workload::Workload;

/// Ordered collection of workloads. Registration order is execution and
/// report order; workloads run sequentially so each one gets the full worker
/// pool and an uncontended measurement window.
#[derive(Debug, Default)]
pub struct Suite {
    workloads: Vec<Workload>,
}

/// Outcome of one workload run inside a suite. A failed run (init failure,
/// worker fault, cancellation) keeps its error here when the suite is
/// configured to continue past failures.
#[derive(Debug)]
pub struct WorkloadReport {
    pub display_name: String,
    pub outcome: std::result::Result<RunResult, Error>,
}

#[derive(Debug)]
pub struct SuiteReport {
    pub runs: Vec<WorkloadReport>,
    /// Grand total over the successful runs, with elapsed times summed to
    /// match sequential execution.
    pub totals: RunResult,
}

impl SuiteReport {
    pub fn failed_runs(&self) -> usize {
        self.runs.iter().filter(|run| run.outcome.is_err()).count()
    }
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, workload: Workload) {
        self.workloads.push(workload);
    }

    pub fn len(&self) -> usize {
        self.workloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workloads.is_empty()
    }

    /// Run every workload in registration order and fold the successful
    /// results into a grand total. With `cfg.continue_on_error` a run-level
    /// failure is recorded in the report and the suite moves on; otherwise
    /// it aborts the remaining workloads.
    pub fn run_all(mut self, cfg: &RunConfig) -> Result<SuiteReport> {
        let mut runs = Vec::with_capacity(self.workloads.len());
        let mut totals = RunResult::zero();

        for workload in &mut self.workloads {
            let display_name = workload.display_name();
            match run_workload(workload, cfg) {
                Ok(result) => {
                    totals.accumulate(&result);
                    runs.push(WorkloadReport {
                        display_name,
                        outcome: Ok(result),
                    });
                }
                Err(err) if cfg.continue_on_error => {
                    tracing::warn!(workload = %display_name, error = %err, "workload run failed, continuing");
                    runs.push(WorkloadReport {
                        display_name,
                        outcome: Err(err),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        Ok(SuiteReport { runs, totals })
    }
}
