use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use barrage_core::{
    Error, Outcome, Param, RunConfig, UnitError, UnitFactory, WorkUnit, Workload, run_workload,
};

/// Always succeeds with fixed byte counts; optionally fails every `n`-th
/// invocation of each unit with a distinct status code.
struct FixedFactory {
    request_bytes: u64,
    response_bytes: u64,
    fail_every: Option<u64>,
    fail_status: i32,
}

impl FixedFactory {
    fn always_ok(request_bytes: u64, response_bytes: u64) -> Self {
        Self {
            request_bytes,
            response_bytes,
            fail_every: None,
            fail_status: 0,
        }
    }
}

struct FixedUnit {
    request_bytes: u64,
    response_bytes: u64,
    fail_every: Option<u64>,
    fail_status: i32,
    attempt: u64,
}

impl WorkUnit for FixedUnit {
    fn execute(&mut self) -> Outcome {
        self.attempt += 1;
        if let Some(n) = self.fail_every
            && self.attempt % n == 0
        {
            return Outcome::failure(self.fail_status);
        }
        Outcome::success(self.request_bytes, self.response_bytes)
    }
}

impl UnitFactory for FixedFactory {
    fn init(&mut self, _params: &[Param]) -> Result<(), UnitError> {
        Ok(())
    }

    fn unit(&self) -> Box<dyn WorkUnit> {
        Box::new(FixedUnit {
            request_bytes: self.request_bytes,
            response_bytes: self.response_bytes,
            fail_every: self.fail_every,
            fail_status: self.fail_status,
            attempt: 0,
        })
    }
}

fn workload(name: &str, repeats: u64, factory: impl UnitFactory + 'static) -> Workload {
    Workload::new(name, Vec::new(), repeats, Box::new(factory))
}

#[test]
fn single_worker_totals_are_exact() {
    let mut w = workload("fixed", 100, FixedFactory::always_ok(7, 13));
    let result = match run_workload(&mut w, &RunConfig::new(1)) {
        Ok(r) => r,
        Err(err) => panic!("run failed: {err}"),
    };

    assert_eq!(result.passed, 100);
    assert_eq!(result.attempts, 100);
    assert_eq!(result.request_bytes, 700);
    assert_eq!(result.response_bytes, 1300);
    assert!(result.failures.is_empty());
}

#[test]
fn uneven_division_attempts_exactly_repeats() {
    // 10 repeats over 3 workers: slices are [4, 3, 3], nothing over-attempted.
    let mut w = workload("fixed", 10, FixedFactory::always_ok(1, 1));
    let result = match run_workload(&mut w, &RunConfig::new(3)) {
        Ok(r) => r,
        Err(err) => panic!("run failed: {err}"),
    };

    assert_eq!(result.attempts, 10);
    assert_eq!(result.passed, 10);
    assert_eq!(result.request_bytes, 10);
}

#[test]
fn end_to_end_noop_totals() {
    let mut w = workload("noop", 1000, FixedFactory::always_ok(10, 20));
    let result = match run_workload(&mut w, &RunConfig::new(4)) {
        Ok(r) => r,
        Err(err) => panic!("run failed: {err}"),
    };

    assert_eq!(result.passed, 1000);
    assert_eq!(result.request_bytes, 10_000);
    assert_eq!(result.response_bytes, 20_000);
    assert!(result.elapsed.as_secs_f64() > 0.0);
    assert!(result.request_bps().is_finite());
    assert!(result.response_bps().is_finite());
    assert!(result.ops_per_sec().is_finite());
}

#[test]
fn failed_invocations_are_excluded_from_throughput_counters() {
    // Every 5th invocation of each worker's unit fails: 4 workers x 250
    // attempts => 50 failures per worker, 200 overall.
    let mut w = workload(
        "flaky",
        1000,
        FixedFactory {
            request_bytes: 10,
            response_bytes: 20,
            fail_every: Some(5),
            fail_status: 0x2a,
        },
    );
    let result = match run_workload(&mut w, &RunConfig::new(4)) {
        Ok(r) => r,
        Err(err) => panic!("run failed: {err}"),
    };

    assert_eq!(result.attempts, 1000);
    assert_eq!(result.passed, 800);
    assert_eq!(result.request_bytes, 8000);
    assert_eq!(result.response_bytes, 16_000);
    assert_eq!(result.failed(), 200);
    assert_eq!(result.failures.get(&0x2a), Some(&200));
}

#[test]
fn init_runs_once_before_any_execute() {
    struct CountingFactory {
        init_calls: Arc<AtomicUsize>,
    }

    impl UnitFactory for CountingFactory {
        fn init(&mut self, _params: &[Param]) -> Result<(), UnitError> {
            self.init_calls.fetch_add(1, Ordering::AcqRel);
            Ok(())
        }

        fn unit(&self) -> Box<dyn WorkUnit> {
            let init_calls = self.init_calls.clone();
            Box::new(move || {
                // An execute observed without exactly one prior init is a
                // sequencing bug; report it as a failed invocation.
                if init_calls.load(Ordering::Acquire) == 1 {
                    Outcome::success(1, 1)
                } else {
                    Outcome::failure(-1)
                }
            })
        }
    }

    let init_calls = Arc::new(AtomicUsize::new(0));
    let mut w = workload(
        "counting",
        64,
        CountingFactory {
            init_calls: init_calls.clone(),
        },
    );
    let result = match run_workload(&mut w, &RunConfig::new(8)) {
        Ok(r) => r,
        Err(err) => panic!("run failed: {err}"),
    };

    assert_eq!(init_calls.load(Ordering::Acquire), 1);
    assert_eq!(result.passed, 64);
}

#[test]
fn init_failure_is_fatal_and_distinct() {
    struct BrokenFactory;

    impl UnitFactory for BrokenFactory {
        fn init(&mut self, _params: &[Param]) -> Result<(), UnitError> {
            Err("backend unreachable".into())
        }

        fn unit(&self) -> Box<dyn WorkUnit> {
            Box::new(|| Outcome::success(0, 0))
        }
    }

    let mut w = workload("broken", 10, BrokenFactory);
    match run_workload(&mut w, &RunConfig::new(2)) {
        Err(Error::Init(err)) => assert_eq!(err.to_string(), "backend unreachable"),
        other => panic!("expected init error, got {other:?}"),
    }
}

#[test]
fn zero_workers_is_rejected_before_spawning() {
    let mut w = workload("fixed", 10, FixedFactory::always_ok(1, 1));
    assert!(matches!(
        run_workload(&mut w, &RunConfig::new(0)),
        Err(Error::InvalidWorkers)
    ));
}

#[test]
fn zero_repeats_is_rejected() {
    let mut w = workload("fixed", 0, FixedFactory::always_ok(1, 1));
    assert!(matches!(
        run_workload(&mut w, &RunConfig::new(2)),
        Err(Error::InvalidRepeats)
    ));
}

#[test]
fn cancelled_token_stops_the_run() {
    let mut w = workload("fixed", 1_000_000, FixedFactory::always_ok(1, 1));
    let cfg = RunConfig::new(2);
    cfg.cancel.cancel();

    assert!(matches!(run_workload(&mut w, &cfg), Err(Error::Cancelled)));
}

#[test]
fn worker_panic_reports_worker_and_completed_count() {
    struct PanickyFactory;

    impl UnitFactory for PanickyFactory {
        fn init(&mut self, _params: &[Param]) -> Result<(), UnitError> {
            Ok(())
        }

        fn unit(&self) -> Box<dyn WorkUnit> {
            let attempts = AtomicU64::new(0);
            Box::new(move || {
                if attempts.fetch_add(1, Ordering::AcqRel) == 3 {
                    panic!("unit blew up");
                }
                Outcome::success(1, 1)
            })
        }
    }

    let mut w = workload("panicky", 10, PanickyFactory);
    match run_workload(&mut w, &RunConfig::new(1)) {
        Err(Error::WorkerFault {
            worker,
            completed,
            message,
        }) => {
            assert_eq!(worker, 0);
            assert_eq!(completed, 3);
            assert!(message.contains("unit blew up"), "message: {message}");
        }
        other => panic!("expected worker fault, got {other:?}"),
    }
}
