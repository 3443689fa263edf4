//! Plain-text rendering of a run, in the `processes.out` layout.

use std::fmt::Write;

use crate::{
    core::{EventSink, SimEvent, Termination},
    sim::{RunSummary, SimConfig, Turnaround},
};

/// Event sink that renders the trace and final statistics as text.
#[derive(Debug, Default)]
pub struct TextReport {
    out: String,
}

impl TextReport {
    /// Starts a report with the workload header.
    pub fn new(config: &SimConfig) -> Self {
        let mut report = Self::default();
        report.line(format_args!("{} processes", config.processes.len()));
        report.line(format_args!("Using {}", config.policy.display_name()));
        if let Some(quantum) = config.policy.quantum() {
            report.line(format_args!("Quantum {quantum}"));
        }
        report.out.push('\n');
        report
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        // Writing to a String cannot fail
        let _ = self.out.write_fmt(args);
        self.out.push('\n');
    }
}

impl EventSink for TextReport {
    fn event(&mut self, event: SimEvent) {
        match event {
            SimEvent::Idle { at } => self.line(format_args!("Time {at}: Idle")),
            SimEvent::Arrived { at, name } => self.line(format_args!("Time {at}: {name} arrived")),
            SimEvent::Finished { at, name } => self.line(format_args!("Time {at}: {name} finished")),
            SimEvent::Selected { at, name, remaining } => {
                self.line(format_args!("Time {at}: {name} selected (burst {remaining})"))
            }
        }
    }

    fn summary(&mut self, summary: &RunSummary) {
        match summary.termination {
            Termination::FinishedAt(at) => self.line(format_args!("Finished at time {at}")),
            Termination::RanOutOfTimeAt(at) => self.line(format_args!("Ran out of time at time {at}")),
        }
        self.out.push('\n');

        for process in &summary.processes {
            match process.turnaround {
                Turnaround::Completed(turnaround) => self.line(format_args!(
                    "{} wait {} turnaround {turnaround}",
                    process.name, process.wait
                )),
                Turnaround::Incomplete => self.line(format_args!(
                    "{} wait {} did not finish",
                    process.name, process.wait
                )),
            }
        }

        if let (Some(wait), Some(turnaround)) = (summary.mean_wait(), summary.mean_turnaround()) {
            self.out.push('\n');
            self.line(format_args!(
                "Average wait {wait:.2} turnaround {turnaround:.2}"
            ));
        }
    }
}
