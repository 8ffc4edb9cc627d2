#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,

    /// Invalid CLI flags or workload selection.
    InvalidInput = 30,

    /// Internal/runtime error (engine preconditions, panics caught at top-level).
    RuntimeError = 40,

    /// One or more workload runs failed (with --continue-on-error).
    WorkloadsFailed = 50,
}

impl ExitCode {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
