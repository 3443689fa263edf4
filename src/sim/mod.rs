pub mod config;
pub mod driver;
pub mod error;
pub mod generate;
pub mod job;
pub mod stats;

pub use config::{PolicyKind, SimConfig};
pub use driver::{Sim, Trace, run, simulate};
pub use error::{ConfigError, ParseError, ParseErrorKind};
pub use job::{ProcessSpec, validate_workload};
pub use stats::{ProcessStats, RunSummary, Turnaround};
