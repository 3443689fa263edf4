use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sched_sim::{PolicyKind, SimConfig, TextReport, sim::generate};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sched-sim")]
#[command(about = "Discrete-time CPU scheduling simulator")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    simulate: SimulateArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a random workload in the processes.in format
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Workload description
    #[arg(default_value = "processes.in")]
    input: PathBuf,

    /// Report destination
    #[arg(short, long, default_value = "processes.out")]
    output: PathBuf,

    /// Override the algorithm named by the input
    #[arg(long, value_enum)]
    policy: Option<Algorithm>,

    /// Round-Robin quantum override
    #[arg(long)]
    quantum: Option<u64>,

    /// Run limit override
    #[arg(long)]
    run_for: Option<u64>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long, default_value_t = 50)]
    ticks: u64,

    #[arg(long, default_value_t = 0.3)]
    p_arrival: f64,

    #[arg(long, default_value_t = 0.3)]
    p_short: f64,

    #[arg(long, default_value_t = 2)]
    short_burst: u64,

    #[arg(long, default_value_t = 6)]
    long_burst: u64,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = Algorithm::Fcfs)]
    policy: Algorithm,

    #[arg(long, default_value_t = 2)]
    quantum: u64,

    /// Defaults to twice the generation window
    #[arg(long)]
    run_for: Option<u64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Algorithm {
    Fcfs,
    Sjf,
    Rr,
}

impl Algorithm {
    fn into_policy(self, quantum: Option<u64>) -> Result<PolicyKind> {
        match self {
            Self::Fcfs => Ok(PolicyKind::Fcfs),
            Self::Sjf => Ok(PolicyKind::Sjf),
            Self::Rr => quantum
                .map(|quantum| PolicyKind::RoundRobin { quantum })
                .context("round-robin needs a quantum"),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Generate(args)) => generate_workload(&args),
        None => simulate_file(&cli.simulate),
    }
}

fn simulate_file(args: &SimulateArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let mut config: SimConfig = text
        .parse()
        .with_context(|| format!("parsing {}", args.input.display()))?;

    if let Some(run_for) = args.run_for {
        config.run_limit = run_for;
    }
    let quantum = args.quantum.or(config.policy.quantum());
    if let Some(algorithm) = args.policy {
        config.policy = algorithm.into_policy(quantum)?;
    } else if let (Some(quantum), PolicyKind::RoundRobin { .. }) = (args.quantum, config.policy) {
        config.policy = PolicyKind::RoundRobin { quantum };
    }

    let mut report = TextReport::new(&config);
    sched_sim::run(&config, &mut report).context("invalid simulation config")?;

    fs::write(&args.output, report.into_string())
        .with_context(|| format!("writing {}", args.output.display()))?;
    Ok(())
}

fn generate_workload(args: &GenerateArgs) -> Result<()> {
    let processes = generate::bernoulli(
        args.ticks,
        args.p_arrival,
        args.p_short,
        args.short_burst,
        args.long_burst,
        args.seed,
    );
    let policy = args.policy.into_policy(Some(args.quantum))?;

    println!("processcount {}", processes.len());
    println!("runfor {}", args.run_for.unwrap_or(args.ticks * 2));
    println!("use {}", policy.abbreviation());
    if let Some(quantum) = policy.quantum() {
        println!("quantum {quantum}");
    }
    for process in &processes {
        println!(
            "process name {} arrival {} burst {}",
            process.name, process.arrival, process.burst
        );
    }
    println!("end");
    Ok(())
}
