pub mod core;
pub mod report;
pub mod scheduler;
pub mod sim;

pub use crate::core::{EventSink, SimEvent, Termination, TraceRecorder};
pub use report::TextReport;
pub use scheduler::Policy;
pub use sim::{PolicyKind, ProcessSpec, RunSummary, Sim, SimConfig, run, simulate};
