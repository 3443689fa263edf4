use super::state::{ProcessStatus, Workload};

/// Checks engine invariants after every executed tick (debug builds only).
#[derive(Debug)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &Workload) {
        self.step += 1;
        let elapsed = ctx.now + 1;

        let running = ctx
            .processes
            .values()
            .filter(|p| p.status == ProcessStatus::Running)
            .count();
        debug_assert!(running <= 1, "{running} processes running at tick {}", ctx.now);

        if let Some(id) = ctx.selected {
            debug_assert_eq!(
                ctx.process(id).status,
                ProcessStatus::Running,
                "Selected process {} must be Running",
                ctx.process(id).name
            );
        }

        for process in ctx.processes.values() {
            let in_ready = ctx.ready.contains(process.id);
            match process.status {
                ProcessStatus::NotArrived => {
                    debug_assert!(!in_ready, "Process {} ready before arrival", process.name);
                    debug_assert_eq!(process.wait, 0, "Process {} waited before arrival", process.name);
                }
                ProcessStatus::Ready | ProcessStatus::Running => {
                    debug_assert!(in_ready, "Process {} missing from ready set", process.name);
                    // Every tick since arrival was spent either waiting or running
                    debug_assert_eq!(
                        process.wait + process.executed(),
                        elapsed - process.arrival,
                        "Process {} lost ticks",
                        process.name
                    );
                }
                ProcessStatus::Completed => {
                    debug_assert!(!in_ready, "Completed process {} still ready", process.name);
                    debug_assert!(
                        process.completion_time.is_some_and(|t| t >= process.arrival),
                        "Completed process {} has no valid completion time",
                        process.name
                    );
                    debug_assert_eq!(
                        process.completion_time.map(|t| t - process.arrival),
                        Some(process.wait + process.burst),
                        "Process {} turnaround does not match wait + burst",
                        process.name
                    );
                }
            }
        }
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::new()
    }
}
