use rustc_hash::FxHashSet;

use super::error::ConfigError;
use crate::core::state::Ticks;

/// Static description of one process, as supplied by the workload source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub name: String,
    pub arrival: Ticks,
    pub burst: Ticks,
}

impl ProcessSpec {
    pub fn new(name: impl Into<String>, arrival: Ticks, burst: Ticks) -> Self {
        Self {
            name: name.into(),
            arrival,
            burst,
        }
    }
}

/// Rejects zero bursts, empty names and duplicate names.
pub fn validate_workload(processes: &[ProcessSpec]) -> Result<(), ConfigError> {
    let mut seen = FxHashSet::default();
    for spec in processes {
        if spec.name.is_empty() {
            return Err(ConfigError::InvalidWorkload {
                process: String::new(),
                detail: "process name must not be empty",
            });
        }
        if spec.burst == 0 {
            return Err(ConfigError::InvalidWorkload {
                process: spec.name.clone(),
                detail: "burst must be positive",
            });
        }
        if !seen.insert(spec.name.as_str()) {
            return Err(ConfigError::InvalidWorkload {
                process: spec.name.clone(),
                detail: "duplicate process name",
            });
        }
    }
    Ok(())
}
