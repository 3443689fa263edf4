use super::Policy;
use crate::core::state::{Process, ProcessId, Rank, Ticks, Workload};

/// Preemptive Shortest-Job-First (shortest remaining burst).
pub struct ShortestJobFirst;

impl Policy for ShortestJobFirst {
    fn name(&self) -> &'static str {
        "Preemptive Shortest Job First"
    }

    fn rank(&self, process: &Process) -> Rank {
        Rank::new(process.remaining, process.order)
    }

    fn select(&self, ctx: &Workload, _previous: Option<ProcessId>, _now: Ticks) -> Option<ProcessId> {
        ctx.ready.first()
    }
}
