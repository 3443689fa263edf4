use super::{Policy, still_runnable};
use crate::core::state::{Process, ProcessId, Rank, Ticks, Workload};

/// Non-preemptive First-Come-First-Served.
pub struct Fcfs;

impl Policy for Fcfs {
    fn name(&self) -> &'static str {
        "First-Come-First-Served"
    }

    fn rank(&self, process: &Process) -> Rank {
        Rank::new(process.arrival, process.order)
    }

    fn select(&self, ctx: &Workload, previous: Option<ProcessId>, _now: Ticks) -> Option<ProcessId> {
        // Runs to completion once chosen
        still_runnable(ctx, previous).or_else(|| ctx.ready.first())
    }
}
