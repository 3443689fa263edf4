use std::fmt;

/// Configuration rejected before the first tick.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    InvalidWorkload {
        process: String,
        detail: &'static str,
    },
    InvalidPolicyConfig {
        detail: &'static str,
    },
    InvalidRunLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWorkload { process, detail } if process.is_empty() => {
                write!(f, "invalid workload: {detail}")
            }
            Self::InvalidWorkload { process, detail } => {
                write!(f, "invalid workload: process {process}: {detail}")
            }
            Self::InvalidPolicyConfig { detail } => write!(f, "invalid policy config: {detail}"),
            Self::InvalidRunLimit => write!(f, "run limit must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure to read a `processes.in` description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    MissingParameter { name: &'static str },
    InvalidNumber { name: &'static str, value: String },
    UnknownPolicy { value: String },
    UnknownDirective { value: String },
    MissingDirective { name: &'static str },
}

impl ParseError {
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            ParseErrorKind::MissingParameter { name } => write!(f, "parameter {name} not found"),
            ParseErrorKind::InvalidNumber { name, value } => {
                write!(f, "parameter {name}: expected a non-negative integer, got {value:?}")
            }
            ParseErrorKind::UnknownPolicy { value } => {
                write!(f, "unknown algorithm {value:?} (expected fcfs, sjf or rr)")
            }
            ParseErrorKind::UnknownDirective { value } => write!(f, "unknown directive {value:?}"),
            ParseErrorKind::MissingDirective { name } => write!(f, "missing {name} directive"),
        }
    }
}

impl std::error::Error for ParseError {}
