//! Hazard detection unit CLI.
//!
//! This binary provides two entry points into the hazard unit. It performs:
//! 1. **Replay:** Feed a JSON cycle trace through the unit and report every
//!    decision plus statistics.
//! 2. **Eval:** Evaluate a single snapshot given on the command line.
//!
//! Logging goes to stderr through `tracing`; set `RUST_LOG` or pass `-v` to see
//! per-cycle events.

use std::error::Error;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use hdu_core::common::RegisterIndex;
use hdu_core::config::Config;
use hdu_core::sim::{CycleDecision, Replay, Trace};
use hdu_core::stats::{HazardStats, STATS_SECTIONS};
use hdu_core::{
    BranchSignal, DecodeState, ExecuteState, Hazard, HazardSnapshot, HazardUnit, MemoryState,
};

#[derive(Parser, Debug)]
#[command(
    name = "hdu",
    author,
    version,
    about = "Hazard detection and pipeline control unit",
    long_about = concat!(
        "Decide stalls and flushes for a five-stage pipeline that resolves branches in decode.\n\n",
        "Examples:\n",
        "  hdu replay trace.json --stats hazards\n",
        "  hdu eval --rs1 1 --jump --ex-rd 1 --ex-load",
    )
)]
struct Cli {
    /// Raise log verbosity (-v: debug, -vv: trace). Overridden by RUST_LOG.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON configuration file (defaults are used when omitted).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON cycle trace.
    Replay {
        /// Trace file: `{ "cycles": [ { "decode": {...}, "execute": {...}, ... } ] }`.
        trace: PathBuf,

        /// Print decisions and statistics as one JSON document.
        #[arg(long)]
        json: bool,

        /// Statistics sections to print (summary, hazards). All when omitted.
        #[arg(
            long,
            num_args = 1..,
            value_parser = clap::builder::PossibleValuesParser::new(STATS_SECTIONS.iter().copied())
        )]
        stats: Vec<String>,
    },

    /// Evaluate a single cycle.
    Eval(EvalArgs),
}

#[derive(Args, Debug)]
struct EvalArgs {
    /// Decode rs1.
    #[arg(long, default_value_t = 0)]
    rs1: u8,
    /// Decode rs2.
    #[arg(long, default_value_t = 0)]
    rs2: u8,
    /// Decode holds a jump/branch.
    #[arg(long)]
    jump: bool,
    /// Execute-stage destination register.
    #[arg(long, default_value_t = 0)]
    ex_rd: u8,
    /// Execute-stage instruction is a load.
    #[arg(long)]
    ex_load: bool,
    /// Memory-stage destination register.
    #[arg(long, default_value_t = 0)]
    mem_rd: u8,
    /// Memory-stage instruction is a load.
    #[arg(long)]
    mem_load: bool,
    /// Decode resolved a branch as taken.
    #[arg(long)]
    taken: bool,
}

impl EvalArgs {
    const fn snapshot(&self) -> HazardSnapshot {
        HazardSnapshot {
            decode: DecodeState {
                rs1: RegisterIndex(self.rs1),
                rs2: RegisterIndex(self.rs2),
                is_jump: self.jump,
            },
            execute: ExecuteState {
                rd: RegisterIndex(self.ex_rd),
                is_load: self.ex_load,
            },
            memory: MemoryState {
                rd: RegisterIndex(self.mem_rd),
                is_load: self.mem_load,
            },
            branch: BranchSignal { taken: self.taken },
        }
    }
}

/// JSON document printed by `replay --json`.
#[derive(Serialize)]
struct ReplayReport<'a> {
    decisions: &'a [CycleDecision],
    stats: &'a HazardStats,
}

type CliResult<T> = Result<T, Box<dyn Error>>;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(out) => print!("{out}"),
        Err(e) => {
            eprint!("{}", error_report(e.as_ref()));
            process::exit(1);
        }
    }
}

/// Installs a stderr `fmt` subscriber; `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs the selected subcommand and returns everything it would print.
fn run(cli: &Cli) -> CliResult<String> {
    let config = load_config(cli.config.as_deref())?;
    match &cli.command {
        Commands::Replay { trace, json, stats } => cmd_replay(&config, trace, *json, stats),
        Commands::Eval(args) => cmd_eval(&config, args),
    }
}

fn load_config(path: Option<&Path>) -> CliResult<Config> {
    match path {
        Some(p) => Ok(Config::load(p)?),
        None => Ok(Config::default()),
    }
}

/// Formats an error and its source chain the way `main` reports it.
fn error_report(err: &(dyn Error + 'static)) -> String {
    let mut out = format!("[!] error: {err}\n");
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(out, "    caused by: {cause}");
        source = cause.source();
    }
    out
}

/// Replays a trace file: per-cycle decisions followed by statistics.
fn cmd_replay(
    config: &Config,
    path: &Path,
    json: bool,
    sections: &[String],
) -> CliResult<String> {
    let trace = Trace::load(path)?;
    tracing::info!(path = %path.display(), cycles = trace.len(), "loaded trace");

    let mut replay = Replay::new(config);
    let decisions = replay.run(&trace)?;

    if json {
        let report = ReplayReport {
            decisions: &decisions,
            stats: replay.stats(),
        };
        let mut out = serde_json::to_string_pretty(&report)?;
        out.push('\n');
        return Ok(out);
    }

    let mut out = String::new();
    for d in &decisions {
        let hazard = d.hazard.map_or("-", Hazard::name);
        let _ = writeln!(out, "{:>6}  {:<22} {}", d.cycle, hazard, d.signals);
    }
    out.push_str(&replay.stats().render_sections(sections));
    Ok(out)
}

/// Evaluates a single snapshot from command-line flags.
fn cmd_eval(config: &Config, args: &EvalArgs) -> CliResult<String> {
    let mut unit = HazardUnit::new(config);
    let (hazard, signals) = unit.tick_classified(&args.snapshot())?;
    let mut out = String::new();
    let _ = writeln!(out, "hazard    {}", hazard.map_or("none", Hazard::name));
    let _ = writeln!(out, "if_flush  {}", signals.if_flush);
    let _ = writeln!(out, "id_flush  {}", signals.id_flush);
    let _ = writeln!(out, "pc_stall  {}", signals.pc_stall);
    let _ = writeln!(out, "if_stall  {}", signals.if_stall);
    Ok(out)
}
