pub mod fcfs;
pub mod rr;
pub mod sjf;

use crate::core::state::{Process, ProcessId, Rank, Ticks, Workload};
pub use fcfs::Fcfs;
pub use rr::RoundRobin;
pub use sjf::ShortestJobFirst;

/// Dispatching policy consulted once per tick.
///
/// A policy only chooses; it never mutates the workload. The engine keeps the
/// ready set ordered by [`Policy::rank`], so the best candidate is always
/// `ctx.ready.first()`.
pub trait Policy {
    fn name(&self) -> &'static str;

    /// Ordering key for a ready process. Recomputed after every tick the
    /// process runs.
    fn rank(&self, process: &Process) -> Rank;

    /// Process to run at `now`, given the one selected on the previous tick.
    fn select(&self, ctx: &Workload, previous: Option<ProcessId>, now: Ticks) -> Option<ProcessId>;
}

// Previously selected process, if it can keep the CPU
fn still_runnable(ctx: &Workload, previous: Option<ProcessId>) -> Option<ProcessId> {
    let id = previous?;
    (ctx.ready.contains(id) && ctx.process(id).is_schedulable()).then_some(id)
}
