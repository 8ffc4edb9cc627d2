use std::fmt;

/// Display parameter attached to a workload.
///
/// Parameters are carried for reporting and grouping only; the engine never
/// interprets them. When `label` is set it is rendered instead of the numeric
/// value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub value: u64,
    pub label: Option<String>,
    pub flag: bool,
}

impl Param {
    pub fn numeric(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
            label: None,
            flag: false,
        }
    }

    pub fn labeled(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 0,
            label: Some(label.into()),
            flag: false,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}={}", self.name, label),
            None => write!(f, "{}={}", self.name, self.value),
        }
    }
}
