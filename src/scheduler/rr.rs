use std::num::NonZeroU64;

use super::{Policy, still_runnable};
use crate::core::state::{Process, ProcessId, Rank, Ticks, Workload};
use crate::sim::ConfigError;

/// Round-Robin with a fixed quantum.
///
/// The circular queue is implicit: the ready set is ordered by the tick each
/// process last ran, so a preempted process sorts behind everything that has
/// waited longer. A process that never ran sorts ahead of all of them.
pub struct RoundRobin {
    quantum: NonZeroU64,
}

impl RoundRobin {
    pub fn new(quantum: NonZeroU64) -> Self {
        Self { quantum }
    }

    pub fn try_new(quantum: Ticks) -> Result<Self, ConfigError> {
        NonZeroU64::new(quantum)
            .map(Self::new)
            .ok_or(ConfigError::InvalidPolicyConfig {
                detail: "round-robin quantum must be positive",
            })
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum.get()
    }
}

impl Policy for RoundRobin {
    fn name(&self) -> &'static str {
        "Round-Robin"
    }

    fn rank(&self, process: &Process) -> Rank {
        let key = process.last_ran_at.map_or(0, |at| at + 1);
        Rank::new(key, process.order)
    }

    fn select(&self, ctx: &Workload, previous: Option<ProcessId>, now: Ticks) -> Option<ProcessId> {
        if let Some(id) = still_runnable(ctx, previous) {
            let selected_at = ctx.process(id).selected_at.unwrap_or(now);
            if (now - selected_at) % self.quantum() != 0 {
                return Some(id);
            }
        }
        ctx.ready.first()
    }
}
