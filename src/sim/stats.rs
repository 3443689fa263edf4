use average::{Estimate, Mean};

use crate::core::{Process, Termination, Ticks, Workload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turnaround {
    Completed(Ticks),
    // Still ready or not yet arrived when the run limit was reached
    Incomplete,
}

impl Turnaround {
    pub fn ticks(&self) -> Option<Ticks> {
        match self {
            Self::Completed(ticks) => Some(*ticks),
            Self::Incomplete => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessStats {
    pub name: String,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub wait: Ticks,
    pub completion_time: Option<Ticks>,
    pub turnaround: Turnaround,
}

impl From<&Process> for ProcessStats {
    fn from(process: &Process) -> Self {
        let turnaround = match process.completion_time {
            Some(done) => Turnaround::Completed(done - process.arrival),
            None => Turnaround::Incomplete,
        };
        Self {
            name: process.name.clone(),
            arrival: process.arrival,
            burst: process.burst,
            wait: process.wait,
            completion_time: process.completion_time,
            turnaround,
        }
    }
}

/// End-of-run classification plus per-process statistics in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub termination: Termination,
    pub processes: Vec<ProcessStats>,
}

impl RunSummary {
    pub fn collect(ctx: &Workload, termination: Termination) -> Self {
        let mut processes: Vec<&Process> = ctx.in_order().collect();
        // Stable: equal arrivals stay in input order
        processes.sort_by_key(|p| p.arrival);
        Self {
            termination,
            processes: processes.into_iter().map(ProcessStats::from).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ProcessStats> {
        self.processes.iter().find(|p| p.name == name)
    }

    pub fn all_completed(&self) -> bool {
        self.processes
            .iter()
            .all(|p| p.turnaround != Turnaround::Incomplete)
    }

    /// Mean wait over completed processes.
    pub fn mean_wait(&self) -> Option<f64> {
        mean(self.completed().map(|p| p.wait))
    }

    pub fn mean_turnaround(&self) -> Option<f64> {
        mean(self.completed().filter_map(|p| p.turnaround.ticks()))
    }

    fn completed(&self) -> impl Iterator<Item = &ProcessStats> {
        self.processes
            .iter()
            .filter(|p| p.turnaround != Turnaround::Incomplete)
    }
}

fn mean(values: impl Iterator<Item = Ticks>) -> Option<f64> {
    let mean: Mean = values.map(|v| v as f64).collect();
    (!mean.is_empty()).then(|| mean.estimate())
}
