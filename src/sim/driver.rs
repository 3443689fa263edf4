use tracing::{info, instrument};

use super::{
    config::{PolicyKind, SimConfig},
    error::ConfigError,
    job::{ProcessSpec, validate_workload},
    stats::RunSummary,
};
use crate::{
    core::{EventSink, SchedCore, SimEvent, Ticks, TraceRecorder},
    scheduler::{Fcfs, Policy, RoundRobin, ShortestJobFirst},
};

/// One validated, not yet started simulation.
pub struct Sim<P: Policy> {
    pub core: SchedCore<P>,
    run_limit: Ticks,
}

impl<P: Policy> Sim<P> {
    pub fn new(processes: &[ProcessSpec], policy: P, run_limit: Ticks) -> Result<Self, ConfigError> {
        if run_limit == 0 {
            return Err(ConfigError::InvalidRunLimit);
        }
        validate_workload(processes)?;

        Ok(Self {
            core: SchedCore::new(processes, policy),
            run_limit,
        })
    }

    /// Runs to natural completion or the run limit, whichever is first.
    pub fn run(mut self, sink: &mut dyn EventSink) -> RunSummary {
        info!(
            policy = self.core.policy.name(),
            processes = self.core.ctx.processes.len(),
            run_limit = self.run_limit,
            "simulation started"
        );

        let termination = self.core.run(self.run_limit, sink);
        let summary = RunSummary::collect(&self.core.ctx, termination);

        info!(?termination, completed = summary.all_completed(), "simulation ended");
        sink.summary(&summary);
        summary
    }
}

/// Full event trace and statistics of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub events: Vec<SimEvent>,
    pub summary: RunSummary,
}

/// Validates `config` and runs it, reporting through `sink`.
#[instrument(skip_all, fields(policy = config.policy.abbreviation()))]
pub fn run(config: &SimConfig, sink: &mut dyn EventSink) -> Result<RunSummary, ConfigError> {
    config.validate()?;
    let processes = &config.processes;
    let run_limit = config.run_limit;

    let summary = match config.policy {
        PolicyKind::Fcfs => Sim::new(processes, Fcfs, run_limit)?.run(sink),
        PolicyKind::Sjf => Sim::new(processes, ShortestJobFirst, run_limit)?.run(sink),
        PolicyKind::RoundRobin { quantum } => {
            Sim::new(processes, RoundRobin::try_new(quantum)?, run_limit)?.run(sink)
        }
    };
    Ok(summary)
}

/// Runs `config` and records the whole trace in memory.
pub fn simulate(config: &SimConfig) -> Result<Trace, ConfigError> {
    let mut recorder = TraceRecorder::new();
    let summary = run(config, &mut recorder)?;
    Ok(Trace {
        events: recorder.events,
        summary,
    })
}
