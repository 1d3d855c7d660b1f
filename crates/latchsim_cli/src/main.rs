//! latchsim CLI — the command-line interface for the latch/update simulator.
//!
//! Provides `latchsim run` to simulate a circuit file and print its output
//! traces, and `latchsim check` to validate a circuit without simulating it.

#![warn(missing_docs)]

mod check;
mod pipeline;
mod run;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// latchsim — simulate synchronous latch/update circuits.
#[derive(Parser, Debug)]
#[command(name = "latchsim", version, about = "Latch/update circuit simulator")]
pub struct Cli {
    /// Suppress all output except results and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate a circuit file and print its output traces.
    Run(RunArgs),
    /// Validate a circuit file without simulating it.
    Check(CheckArgs),
}

/// Arguments for the `latchsim run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the circuit file.
    pub circuit: String,

    /// Output format; overrides `[output] format` in the circuit file.
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// VCD output path; overrides `[output] waveform` in the circuit file.
    #[arg(short, long)]
    pub waveform: Option<String>,

    /// Disable waveform recording.
    #[arg(long)]
    pub no_waveform: bool,
}

/// Arguments for the `latchsim check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the circuit file.
    pub circuit: String,
}

/// Output trace format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One `<bits> <name>` line per output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress status output.
    pub quiet: bool,
    /// Whether to print verbose status output.
    pub verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    let result = match cli.command {
        Command::Run(ref args) => run::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
