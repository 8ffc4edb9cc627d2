use std::fmt::Write as _;

use crate::{Param, UnitFactory};

/// A named, parameterized binding of a unit factory plus a target repeat
/// count. Built at suite-assembly time and consumed exactly once by the
/// engine.
pub struct Workload {
    pub name: String,
    pub params: Vec<Param>,
    pub repeats: u64,
    pub factory: Box<dyn UnitFactory>,
}

impl Workload {
    pub fn new(
        name: impl Into<String>,
        params: Vec<Param>,
        repeats: u64,
        factory: Box<dyn UnitFactory>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            repeats,
            factory,
        }
    }

    /// Display name used to correlate report lines with configuration:
    /// the workload name followed by `/name=value` per parameter.
    pub fn display_name(&self) -> String {
        let mut out = self.name.clone();
        for param in &self.params {
            write!(&mut out, "/{param}").ok();
        }
        out
    }
}

impl std::fmt::Debug for Workload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workload")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("repeats", &self.repeats)
            .finish_non_exhaustive()
    }
}
