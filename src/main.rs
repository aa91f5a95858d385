//! Samplestat CLI
//!
//! Resolves a raw sampling-profiler buffer against a binary and prints
//! own-time or total-time breakdowns per frame.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use samplestat::commands::{execute_report, validate_args, ReportArgs, TimeMode};
use samplestat::utils::config::DEFAULT_TOP_FRAMES;

/// Samplestat - own time and total time from raw sample buffers
#[derive(Parser, Debug)]
#[command(name = "samplestat")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Time spent directly in each frame
    Own(ReportOpts),

    /// Time spent in each frame including its callees
    Total(ReportOpts),

    /// Display version information
    Version,
}

#[derive(Args, Debug)]
struct ReportOpts {
    /// Binary with debug symbols the samples were taken from
    #[arg(short, long, env = "SAMPLESTAT_BINARY")]
    binary: PathBuf,

    /// Address dump (decimal or 0x-hex, 0 ends a backtrace)
    #[arg(short, long)]
    samples: PathBuf,

    /// Load bias subtracted from every address (decimal or 0x-hex)
    #[arg(long, default_value = "0", value_parser = parse_u64)]
    load_bias: u64,

    /// Sampler capacity, used to warn about a full buffer
    #[arg(long)]
    capacity: Option<usize>,

    /// Only count frames whose file path contains this substring
    #[arg(long)]
    file_contains: Option<String>,

    /// Number of frames to print
    #[arg(long, default_value_t = DEFAULT_TOP_FRAMES)]
    top: usize,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Do not warn when the buffer is full
    #[arg(long)]
    no_warn: bool,
}

impl ReportOpts {
    fn into_args(self, mode: TimeMode) -> ReportArgs {
        ReportArgs {
            binary: self.binary,
            samples: self.samples,
            mode,
            load_bias: self.load_bias,
            capacity: self.capacity,
            file_contains: self.file_contains,
            top: self.top,
            json: self.json,
            warn_on_full: !self.no_warn,
        }
    }
}

fn parse_u64(value: &str) -> Result<u64, String> {
    let parsed = match value.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|e| format!("invalid number {value:?}: {e}"))
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    let args = match cli.command {
        Commands::Own(opts) => opts.into_args(TimeMode::Own),
        Commands::Total(opts) => opts.into_args(TimeMode::Total),
        Commands::Version => {
            println!("Samplestat v{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
    };

    validate_args(&args)?;
    execute_report(args)?;

    Ok(())
}
