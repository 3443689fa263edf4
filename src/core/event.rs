use crate::core::Ticks;
use crate::sim::RunSummary;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEvent {
    // Nothing selected this tick
    Idle {
        at: Ticks,
    },
    Arrived {
        at: Ticks,
        name: String,
    },
    Finished {
        at: Ticks,
        name: String,
    },
    // `remaining` is the burst left before this tick executes
    Selected {
        at: Ticks,
        name: String,
        remaining: Ticks,
    },
}

impl SimEvent {
    pub fn at(&self) -> Ticks {
        match self {
            Self::Idle { at }
            | Self::Arrived { at, .. }
            | Self::Finished { at, .. }
            | Self::Selected { at, .. } => *at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    FinishedAt(Ticks),
    RanOutOfTimeAt(Ticks),
}

impl Termination {
    pub fn at(&self) -> Ticks {
        match self {
            Self::FinishedAt(at) | Self::RanOutOfTimeAt(at) => *at,
        }
    }
}

/// Receiver for the ordered trace of one run.
pub trait EventSink {
    fn event(&mut self, event: SimEvent);

    fn summary(&mut self, _summary: &RunSummary) {}
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    pub events: Vec<SimEvent>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for TraceRecorder {
    fn event(&mut self, event: SimEvent) {
        self.events.push(event);
    }
}
