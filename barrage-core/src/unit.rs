use crate::Param;

/// Error type collaborators use to signal initialization failure.
pub type UnitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of one measured invocation.
///
/// A `status` of [`Outcome::OK`] counts the invocation toward throughput;
/// any other value marks it as failed. Failed invocations are logged and
/// tallied but contribute no bytes and do not abort the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub status: i32,
    pub request_bytes: u64,
    pub response_bytes: u64,
}

impl Outcome {
    pub const OK: i32 = 0;

    pub fn success(request_bytes: u64, response_bytes: u64) -> Self {
        Self {
            status: Self::OK,
            request_bytes,
            response_bytes,
        }
    }

    pub fn failure(status: i32) -> Self {
        Self {
            status,
            request_bytes: 0,
            response_bytes: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Self::OK
    }
}

/// The opaque operation being measured.
///
/// Each worker owns its own unit, so `execute` takes `&mut self` and needs no
/// internal synchronization. Blocking inside `execute` (e.g. waiting on a
/// remote call) is intentionally part of the measured window.
pub trait WorkUnit: Send {
    fn execute(&mut self) -> Outcome;
}

/// Builds the per-worker units for one workload run.
///
/// `init` runs exactly once, synchronously, before any worker is spawned;
/// an error here is fatal to the run. `unit` is then called once per worker
/// at dispatch time.
pub trait UnitFactory: Send {
    fn init(&mut self, params: &[Param]) -> Result<(), UnitError>;

    fn unit(&self) -> Box<dyn WorkUnit>;
}

impl<F> WorkUnit for F
where
    F: FnMut() -> Outcome + Send,
{
    fn execute(&mut self) -> Outcome {
        self()
    }
}
