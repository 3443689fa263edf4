use tracing::trace;

use super::{
    event::{EventSink, SimEvent, Termination},
    observer::Observer,
    state::{ProcessId, Ticks, Workload},
};
use crate::{scheduler::Policy, sim::ProcessSpec};

pub struct SchedCore<P: Policy> {
    pub ctx: Workload,
    pub policy: P,
    observer: Observer,
}

impl<P: Policy> SchedCore<P> {
    pub fn new(processes: &[ProcessSpec], policy: P) -> Self {
        Self {
            ctx: Workload::new(processes),
            policy,
            observer: Observer::new(),
        }
    }

    /// Simulates ticks `now..run_limit`, stopping early once every process
    /// has finished.
    pub fn run(&mut self, run_limit: Ticks, sink: &mut dyn EventSink) -> Termination {
        while self.ctx.now < run_limit {
            if let Some(done) = self.tick(sink) {
                return done;
            }
        }
        self.finish(sink)
    }

    // Return the termination if the last process finished during this tick
    pub fn tick(&mut self, sink: &mut dyn EventSink) -> Option<Termination> {
        let now = self.ctx.now;

        if self.ctx.is_drained() {
            sink.event(SimEvent::Idle { at: now });
            self.ctx.advance_time(1);
            return None;
        }

        self.handle_arrivals(now, sink);

        if self.handle_completions(now, sink) && self.ctx.is_drained() {
            return Some(Termination::FinishedAt(now));
        }

        let previous = self.ctx.selected;
        let next = self.policy.select(&self.ctx, previous, now);
        if self.ctx.set_running(next) {
            if let Some(id) = next {
                let process = self.ctx.process(id);
                trace!(now, process = %process.name, remaining = process.remaining, "selected");
                sink.event(SimEvent::Selected {
                    at: now,
                    name: process.name.clone(),
                    remaining: process.remaining,
                });
            }
        }

        self.execute(next, now, sink);
        self.observer.observe(&self.ctx);
        self.ctx.advance_time(1);
        None
    }

    /// Catches completions on the boundary tick and classifies the run.
    pub fn finish(&mut self, sink: &mut dyn EventSink) -> Termination {
        let now = self.ctx.now;
        self.handle_completions(now, sink);

        if self.ctx.is_drained() {
            Termination::FinishedAt(now)
        } else {
            Termination::RanOutOfTimeAt(now)
        }
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    fn handle_arrivals(&mut self, now: Ticks, sink: &mut dyn EventSink) {
        while let Some(id) = self.ctx.pop_arrival(now) {
            let rank = self.policy.rank(self.ctx.process(id));
            self.ctx.mark_ready(id, rank);

            let process = self.ctx.process(id);
            trace!(now, process = %process.name, "arrived");
            sink.event(SimEvent::Arrived {
                at: now,
                name: process.name.clone(),
            });
        }
    }

    // Returns true if anything completed
    fn handle_completions(&mut self, now: Ticks, sink: &mut dyn EventSink) -> bool {
        let done = self.ctx.exhausted();
        for &id in &done {
            self.ctx.mark_completed(id, now);

            let process = self.ctx.process(id);
            trace!(now, process = %process.name, wait = process.wait, "finished");
            sink.event(SimEvent::Finished {
                at: now,
                name: process.name.clone(),
            });
        }
        !done.is_empty()
    }

    fn execute(&mut self, running: Option<ProcessId>, now: Ticks, sink: &mut dyn EventSink) {
        let waiting: Vec<ProcessId> = self
            .ctx
            .ready
            .ids()
            .filter(|&id| Some(id) != running)
            .collect();
        for id in waiting {
            self.ctx.process_mut(id).wait += 1;
        }

        let Some(id) = running else {
            sink.event(SimEvent::Idle { at: now });
            return;
        };

        let process = self.ctx.process_mut(id);
        debug_assert!(process.remaining > 0, "Process {} ran with no burst left", process.name);
        process.remaining -= 1;
        process.last_ran_at = Some(now);

        let rank = self.policy.rank(self.ctx.process(id));
        self.ctx.ready.rerank(id, rank);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ProcessStatus, TraceRecorder};
    use crate::scheduler::{Fcfs, RoundRobin, ShortestJobFirst};

    fn selections(events: &[SimEvent]) -> Vec<(Ticks, &str)> {
        events
            .iter()
            .filter_map(|e| match e {
                SimEvent::Selected { at, name, .. } => Some((*at, name.as_str())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_workload_idles_every_tick() {
        let mut core = SchedCore::new(&[], Fcfs);
        let mut trace = TraceRecorder::new();

        let done = core.run(4, &mut trace);

        assert_eq!(done, Termination::FinishedAt(4));
        let expected: Vec<SimEvent> = (0..4).map(|at| SimEvent::Idle { at }).collect();
        assert_eq!(trace.events, expected);
    }

    #[test]
    fn idles_until_first_arrival() {
        let mut core = SchedCore::new(&[ProcessSpec::new("A", 2, 1)], Fcfs);
        let mut trace = TraceRecorder::new();

        let done = core.run(10, &mut trace);

        assert_eq!(done, Termination::FinishedAt(3));
        assert_eq!(
            trace.events,
            vec![
                SimEvent::Idle { at: 0 },
                SimEvent::Idle { at: 1 },
                SimEvent::Arrived { at: 2, name: "A".into() },
                SimEvent::Selected { at: 2, name: "A".into(), remaining: 1 },
                SimEvent::Finished { at: 3, name: "A".into() },
            ]
        );
    }

    #[test]
    fn idle_gap_between_processes() {
        let specs = [ProcessSpec::new("A", 0, 1), ProcessSpec::new("B", 3, 1)];
        let mut core = SchedCore::new(&specs, Fcfs);
        let mut trace = TraceRecorder::new();

        core.run(10, &mut trace);

        let idle: Vec<Ticks> = trace
            .events
            .iter()
            .filter_map(|e| matches!(e, SimEvent::Idle { .. }).then(|| e.at()))
            .collect();
        assert_eq!(idle, [1, 2]);
    }

    #[test]
    fn completion_on_last_tick_is_reported() {
        let mut core = SchedCore::new(&[ProcessSpec::new("A", 0, 3)], Fcfs);
        let mut trace = TraceRecorder::new();

        let done = core.run(3, &mut trace);

        assert_eq!(done, Termination::FinishedAt(3));
        assert_eq!(
            trace.events.last(),
            Some(&SimEvent::Finished { at: 3, name: "A".into() })
        );
        assert_eq!(core.ctx.find("A").and_then(|p| p.completion_time), Some(3));
    }

    #[test]
    fn runs_out_of_time() {
        let mut core = SchedCore::new(&[ProcessSpec::new("A", 0, 5)], Fcfs);
        let mut trace = TraceRecorder::new();

        let done = core.run(3, &mut trace);

        assert_eq!(done, Termination::RanOutOfTimeAt(3));
        let a = core.ctx.find("A").unwrap();
        assert_eq!(a.remaining, 2);
        assert_eq!(a.completion_time, None);
        assert_eq!(a.status, ProcessStatus::Running);
    }

    #[test]
    fn sjf_preempts_on_shorter_arrival() {
        let specs = [ProcessSpec::new("long", 0, 6), ProcessSpec::new("short", 1, 2)];
        let mut core = SchedCore::new(&specs, ShortestJobFirst);
        let mut trace = TraceRecorder::new();

        core.run(20, &mut trace);

        assert_eq!(selections(&trace.events), [(0, "long"), (1, "short"), (3, "long")]);
    }

    #[test]
    fn rr_reselecting_same_process_is_silent() {
        let mut core = SchedCore::new(&[ProcessSpec::new("solo", 0, 5)], RoundRobin::try_new(2).unwrap());
        let mut trace = TraceRecorder::new();

        assert_eq!(core.run(20, &mut trace), Termination::FinishedAt(5));
        assert_eq!(selections(&trace.events), [(0, "solo")]);
    }
}
