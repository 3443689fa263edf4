use std::str::FromStr;

use tracing::warn;

use super::{
    error::{ConfigError, ParseError, ParseErrorKind},
    job::{ProcessSpec, validate_workload},
};
use crate::core::state::Ticks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Fcfs,
    Sjf,
    RoundRobin { quantum: Ticks },
}

impl PolicyKind {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::RoundRobin { .. } => "rr",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Fcfs => "First-Come-First-Served",
            Self::Sjf => "Preemptive Shortest Job First",
            Self::RoundRobin { .. } => "Round-Robin",
        }
    }

    pub fn quantum(&self) -> Option<Ticks> {
        match self {
            Self::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    /// Resolves `fcfs`, `sjf` or `rr`. Round-Robin needs a quantum.
    pub fn from_abbreviation(value: &str, quantum: Option<Ticks>) -> Option<Self> {
        match value {
            "fcfs" => Some(Self::Fcfs),
            "sjf" => Some(Self::Sjf),
            "rr" => quantum.map(|quantum| Self::RoundRobin { quantum }),
            _ => None,
        }
    }
}

/// Everything needed for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub processes: Vec<ProcessSpec>,
    pub policy: PolicyKind,
    pub run_limit: Ticks,
}

impl SimConfig {
    pub fn new(processes: Vec<ProcessSpec>, policy: PolicyKind, run_limit: Ticks) -> Self {
        Self {
            processes,
            policy,
            run_limit,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run_limit == 0 {
            return Err(ConfigError::InvalidRunLimit);
        }
        if self.policy.quantum() == Some(0) {
            return Err(ConfigError::InvalidPolicyConfig {
                detail: "round-robin quantum must be positive",
            });
        }
        validate_workload(&self.processes)
    }

    /// Parses the `processes.in` format:
    ///
    /// ```text
    /// processcount 2
    /// runfor 10
    /// use rr
    /// quantum 2
    /// process name P1 arrival 0 burst 4
    /// process name P2 arrival 0 burst 4
    /// end
    /// ```
    ///
    /// Blank lines and `#` comments are skipped; anything after `end` is ignored.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut count: Option<(usize, Ticks)> = None;
        let mut run_limit = None;
        let mut algorithm: Option<(usize, String)> = None;
        let mut quantum = None;
        let mut processes = Vec::new();
        let mut last_line = 0;

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            last_line = line;
            let content = raw.split('#').next().unwrap_or_default();
            let words: Vec<&str> = content.split_whitespace().collect();
            let Some(&directive) = words.first() else {
                continue;
            };

            match directive {
                "processcount" => count = Some((line, number(&words, "processcount", line)?)),
                "runfor" => run_limit = Some(number(&words, "runfor", line)?),
                "use" => algorithm = Some((line, param(&words, "use", line)?.to_owned())),
                "quantum" => quantum = Some(number(&words, "quantum", line)?),
                "process" => processes.push(ProcessSpec {
                    name: param(&words, "name", line)?.to_owned(),
                    arrival: number(&words, "arrival", line)?,
                    burst: number(&words, "burst", line)?,
                }),
                "end" => break,
                other => {
                    return Err(ParseError::new(
                        line,
                        ParseErrorKind::UnknownDirective {
                            value: other.to_owned(),
                        },
                    ));
                }
            }
        }

        let run_limit = run_limit.ok_or(ParseError::new(
            last_line,
            ParseErrorKind::MissingDirective { name: "runfor" },
        ))?;
        let (use_line, algorithm) = algorithm.ok_or(ParseError::new(
            last_line,
            ParseErrorKind::MissingDirective { name: "use" },
        ))?;
        let policy = match PolicyKind::from_abbreviation(&algorithm, quantum) {
            Some(policy) => policy,
            None if algorithm == "rr" => {
                return Err(ParseError::new(
                    use_line,
                    ParseErrorKind::MissingDirective { name: "quantum" },
                ));
            }
            None => {
                return Err(ParseError::new(
                    use_line,
                    ParseErrorKind::UnknownPolicy { value: algorithm },
                ));
            }
        };

        if let Some((line, declared)) = count {
            if declared != processes.len() as Ticks {
                warn!(line, declared, found = processes.len(), "processcount does not match process lines");
            }
        }
        if quantum.is_some() && policy.quantum().is_none() {
            warn!(algorithm = policy.abbreviation(), "quantum ignored");
        }

        Ok(Self {
            processes,
            policy,
            run_limit,
        })
    }
}

impl FromStr for SimConfig {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

// Word following `name`
fn param<'a>(words: &[&'a str], name: &'static str, line: usize) -> Result<&'a str, ParseError> {
    words
        .iter()
        .position(|&word| word == name)
        .and_then(|at| words.get(at + 1))
        .copied()
        .ok_or(ParseError::new(line, ParseErrorKind::MissingParameter { name }))
}

fn number(words: &[&str], name: &'static str, line: usize) -> Result<Ticks, ParseError> {
    let value = param(words, name, line)?;
    value.parse().map_err(|_| {
        ParseError::new(
            line,
            ParseErrorKind::InvalidNumber {
                name,
                value: value.to_owned(),
            },
        )
    })
}
