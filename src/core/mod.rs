pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::{EventSink, SimEvent, Termination, TraceRecorder};
pub use state::{Process, ProcessId, ProcessStatus, Rank, ReadySet, Ticks, Workload};
