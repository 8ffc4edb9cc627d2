//! Execution-and-aggregation engine for throughput benchmarks.
//!
//! A [`Workload`] binds a name, display parameters, and a repeat count to a
//! [`UnitFactory`]. The engine fans the repeat count out across a pool of
//! worker threads, releases them through a ready/go gate so the measured
//! window contains only work execution, and reduces per-worker tallies into
//! one [`RunResult`]. What a unit actually does is opaque to this crate.

mod engine;
mod error;
mod gate;
mod param;
mod report;
mod result;
mod suite;
mod unit;
mod workload;

pub use engine::{CancelToken, RunConfig, run_workload};
pub use error::{Error, Result};
pub use gate::StartGate;
pub use param::Param;
pub use report::{render_run_line, render_totals_line};
pub use result::{RunResult, WorkerTally};
pub use suite::{Suite, SuiteReport, WorkloadReport};
pub use unit::{Outcome, UnitError, UnitFactory, WorkUnit};
pub use workload::Workload;
