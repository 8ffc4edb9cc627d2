use std::collections::BTreeMap;
use std::time::Duration;

use crate::Outcome;

/// Per-worker accumulator. Exclusively owned by its worker thread until the
/// engine reduces all tallies after the joins, so recording never contends.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WorkerTally {
    pub request_bytes: u64,
    pub response_bytes: u64,
    pub passed: u64,
    pub attempts: u64,
    /// Non-success invocation counts keyed by status code.
    pub failures: BTreeMap<i32, u64>,
}

impl WorkerTally {
    pub fn record(&mut self, outcome: &Outcome) {
        self.attempts += 1;
        if outcome.is_success() {
            self.request_bytes += outcome.request_bytes;
            self.response_bytes += outcome.response_bytes;
            self.passed += 1;
        } else {
            *self.failures.entry(outcome.status).or_insert(0) += 1;
        }
    }

    pub fn merge(&mut self, other: &WorkerTally) {
        self.request_bytes += other.request_bytes;
        self.response_bytes += other.response_bytes;
        self.passed += other.passed;
        self.attempts += other.attempts;
        for (&status, &count) in &other.failures {
            *self.failures.entry(status).or_insert(0) += count;
        }
    }
}

/// Reduced counters and wall-clock elapsed time for one workload run.
/// Immutable once built; throughput figures are derived on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub elapsed: Duration,
    pub request_bytes: u64,
    pub response_bytes: u64,
    pub passed: u64,
    pub attempts: u64,
    pub failures: BTreeMap<i32, u64>,
}

impl RunResult {
    /// Sum worker tallies into one result. Reduction is plain summation, so
    /// it is commutative and associative over workers.
    pub fn reduce<'a>(elapsed: Duration, tallies: impl IntoIterator<Item = &'a WorkerTally>) -> Self {
        let mut total = WorkerTally::default();
        for tally in tallies {
            total.merge(tally);
        }

        Self {
            elapsed,
            request_bytes: total.request_bytes,
            response_bytes: total.response_bytes,
            passed: total.passed,
            attempts: total.attempts,
            failures: total.failures,
        }
    }

    pub fn failed(&self) -> u64 {
        self.failures.values().sum()
    }

    pub fn request_bps(&self) -> f64 {
        self.request_bytes as f64 / self.elapsed.as_secs_f64()
    }

    pub fn response_bps(&self) -> f64 {
        self.response_bytes as f64 / self.elapsed.as_secs_f64()
    }

    pub fn ops_per_sec(&self) -> f64 {
        self.passed as f64 / self.elapsed.as_secs_f64()
    }

    /// Fold another run into a grand total (suite summary): counters are
    /// summed and elapsed times are added, matching sequential execution.
    pub fn accumulate(&mut self, other: &RunResult) {
        self.elapsed += other.elapsed;
        self.request_bytes += other.request_bytes;
        self.response_bytes += other.response_bytes;
        self.passed += other.passed;
        self.attempts += other.attempts;
        for (&status, &count) in &other.failures {
            *self.failures.entry(status).or_insert(0) += count;
        }
    }

    pub fn zero() -> Self {
        Self {
            elapsed: Duration::ZERO,
            request_bytes: 0,
            response_bytes: 0,
            passed: 0,
            attempts: 0,
            failures: BTreeMap::new(),
        }
    }
}
