//! CPU scheduling simulator CLI
//!
//! Runs a simulation request read as JSON and prints the response, or
//! generates a reproducible random request.
//!
//! # Example
//!
//! ```bash
//! # Generate a Round Robin request and simulate it
//! cpu-sched generate --count 5 --seed 42 --algorithm rr --quantum 2 > req.json
//! cpu-sched run --input req.json --format table
//!
//! # Pipe JSON through stdin, debug logs on stderr
//! cat req.json | cpu-sched -v run --pretty
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use cpu_sched::models::TimeQuantum;
use cpu_sched::{
    AlgorithmConfig, SimError, SimulationOutcome, SimulationRequest, SimulationService,
    WorkloadGenerator,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CPU scheduling simulator
///
/// Simulates FCFS, SJF, Priority and Round Robin scheduling and reports the
/// Gantt timeline with per-process metrics. Deterministic for a given input.
#[derive(Parser, Debug)]
#[command(name = "cpu-sched")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging on stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a JSON request
    Run {
        /// Request file. Reads stdin when omitted.
        #[arg(short = 'i', long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Reject requests with more processes than this
        #[arg(long)]
        max_processes: Option<usize>,
    },
    /// Emit a random request as JSON
    Generate {
        /// Number of processes
        #[arg(short = 'n', long, default_value = "5")]
        count: usize,

        /// Random seed for reproducible output. When omitted, a random seed is used.
        #[arg(long)]
        seed: Option<u64>,

        /// Latest arrival time
        #[arg(long, default_value = "10")]
        max_arrival: i64,

        /// Longest burst time
        #[arg(long, default_value = "10")]
        max_burst: i64,

        /// Largest priority value
        #[arg(long, default_value = "5")]
        max_priority: i64,

        /// Scheduling algorithm
        #[arg(short = 'a', long, value_enum, default_value_t = AlgorithmArg::Fcfs)]
        algorithm: AlgorithmArg,

        /// Preemptive variant (SJF and Priority)
        #[arg(long)]
        preemptive: bool,

        /// Round Robin time quantum
        #[arg(short = 'q', long, default_value = "2")]
        quantum: i64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Json,
    Table,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum AlgorithmArg {
    Fcfs,
    Sjf,
    Priority,
    Rr,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("malformed request JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Simulation(#[from] SimError),
    #[error("time quantum must be at least 1, got {0}")]
    Quantum(i64),
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    match execute(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Simulation(SimError::Validation(errors))) => {
            eprintln!("invalid request:");
            for error in &errors {
                eprintln!("  - {error}");
            }
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Command) -> Result<(), CliError> {
    match command {
        Command::Run {
            input,
            format,
            pretty,
            max_processes,
        } => {
            let raw = match input {
                Some(path) => fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let request: SimulationRequest = serde_json::from_str(&raw)?;

            let mut service = SimulationService::new();
            if let Some(limit) = max_processes {
                service = service.with_process_limit(limit);
            }
            let outcome = service.run(&request)?;

            match format {
                Format::Json => {
                    let response = outcome.into_response();
                    let json = if pretty {
                        serde_json::to_string_pretty(&response)?
                    } else {
                        serde_json::to_string(&response)?
                    };
                    println!("{json}");
                }
                Format::Table => print_table(&outcome),
            }
        }
        Command::Generate {
            count,
            seed,
            max_arrival,
            max_burst,
            max_priority,
            algorithm,
            preemptive,
            quantum,
        } => {
            let algorithm = match algorithm {
                AlgorithmArg::Fcfs => AlgorithmConfig::Fcfs,
                AlgorithmArg::Sjf => AlgorithmConfig::Sjf { preemptive },
                AlgorithmArg::Priority => AlgorithmConfig::Priority { preemptive },
                AlgorithmArg::Rr => AlgorithmConfig::RoundRobin {
                    quantum: TimeQuantum::new(quantum).ok_or(CliError::Quantum(quantum))?,
                },
            };
            let seed = seed.unwrap_or_else(rand::random);
            info!(count, seed, %algorithm, "generating workload");

            let request = WorkloadGenerator::new(count)
                .with_max_arrival(max_arrival)
                .with_max_burst(max_burst)
                .with_max_priority(max_priority)
                .request(algorithm, &mut SmallRng::seed_from_u64(seed));
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
    }
    Ok(())
}

fn print_table(outcome: &SimulationOutcome) {
    let metrics = &outcome.metrics;

    println!("Algorithm: {}", outcome.workload.algorithm());
    println!();
    println!("Timeline:");
    for segment in outcome.timeline.segments() {
        println!(
            "  {:>6} .. {:<6} {}",
            segment.start_time, segment.end_time, segment.owner
        );
    }

    let show_priority = outcome.workload.algorithm().requires_priority();
    println!();
    print!("{:<10} {:>8} {:>6}", "Process", "Arrival", "Burst");
    if show_priority {
        print!(" {:>8}", "Priority");
    }
    println!(
        " {:>10} {:>8} {:>10} {:>8}",
        "Completion", "Waiting", "Turnaround", "Response"
    );
    for p in &metrics.processes {
        print!("{:<10} {:>8} {:>6}", p.id, p.arrival_time, p.burst_time);
        if show_priority {
            match p.priority {
                Some(priority) => print!(" {priority:>8}"),
                None => print!(" {:>8}", "-"),
            }
        }
        println!(
            " {:>10} {:>8} {:>10} {:>8}",
            p.completion_time, p.waiting_time, p.turnaround_time, p.response_time
        );
    }

    println!();
    println!("Average waiting time:    {:.2}", metrics.waiting.value());
    println!("Average turnaround time: {:.2}", metrics.turnaround.value());
    println!("Average response time:   {:.2}", metrics.response.value());
    println!("Makespan:                {}", metrics.makespan);
    println!("Idle time:               {}", metrics.idle_time);
    println!("CPU utilization:         {:.2}%", metrics.utilization() * 100.0);
    println!("Throughput:              {:.4} /tick", metrics.throughput());
    println!("Context switches:        {}", metrics.context_switches);
}
