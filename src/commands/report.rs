//! Report command implementation.
//!
//! The report command:
//! 1. Loads the raw buffer from an address dump
//! 2. Opens the binary's debug information
//! 3. Resolves the buffer into stack traces
//! 4. Aggregates own time or total time
//! 5. Renders the result as text or JSON

use crate::aggregator::{file_contains, AcceptAll, FrameCounts, FrameFilter, FrameShare};
use crate::profile::Profiler;
use crate::sampler::{load_addresses, MemorySampler};
use crate::symbols::DwarfResolver;
use crate::utils::config::DEFAULT_TOP_FRAMES;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Which attribution to report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeMode {
    /// Leaf frame only
    Own,
    /// Every frame on the stack, once per sample
    Total,
}

/// Arguments for the report command
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Binary the samples were taken from
    pub binary: PathBuf,

    /// Address dump holding the raw buffer
    pub samples: PathBuf,

    pub mode: TimeMode,

    /// Subtracted from each address before lookup
    pub load_bias: u64,

    /// Sampler capacity the dump was recorded with (for the full warning)
    pub capacity: Option<usize>,

    /// Keep only frames whose file path contains this
    pub file_contains: Option<String>,

    /// Number of rows to print
    pub top: usize,

    pub json: bool,

    pub warn_on_full: bool,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            binary: PathBuf::new(),
            samples: PathBuf::new(),
            mode: TimeMode::Own,
            load_bias: 0,
            capacity: None,
            file_contains: None,
            top: DEFAULT_TOP_FRAMES,
            json: false,
            warn_on_full: true,
        }
    }
}

/// Machine-readable report body
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    mode: TimeMode,
    total: usize,
    frames: Vec<FrameShare<'a>>,
}

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Unreadable or malformed address dump
/// * Binary without usable debug information
/// * Symbol lookup failures
pub fn execute_report(args: ReportArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Step 1/4: Loading samples from {}", args.samples.display());
    let addresses = load_addresses(&args.samples)
        .with_context(|| format!("Failed to load samples from {}", args.samples.display()))?;

    let mut sampler = MemorySampler::with_capacity(args.capacity.unwrap_or(usize::MAX));
    sampler.replace(addresses);

    info!("Step 2/4: Loading debug information from {}", args.binary.display());
    let resolver = DwarfResolver::open(&args.binary)
        .with_context(|| format!("Failed to open {}", args.binary.display()))?
        .with_load_bias(args.load_bias);

    let filter: Box<dyn FrameFilter> = match &args.file_contains {
        Some(needle) => Box::new(file_contains(needle.as_str())),
        None => Box::new(AcceptAll),
    };

    info!("Step 3/4: Aggregating {:?} time...", args.mode);
    let mut profiler = Profiler::new(sampler, resolver);
    let counts = match args.mode {
        TimeMode::Own => profiler.own_time(&*filter, args.warn_on_full),
        TimeMode::Total => profiler.total_time(&*filter, args.warn_on_full),
    }
    .context("Failed to aggregate samples")?;

    debug!("{} frames over {} samples", counts.len(), counts.total());

    info!("Step 4/4: Rendering report...");
    let rendered = render_report(&counts.top(args.top), args.mode, args.json)?;
    print!("{rendered}");

    info!("Report completed in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(())
}

/// Render counts as a text table or pretty JSON
pub fn render_report(counts: &FrameCounts, mode: TimeMode, json: bool) -> Result<String> {
    if json {
        let report = JsonReport {
            mode,
            total: counts.total(),
            frames: counts.shares(),
        };
        let mut out = serde_json::to_string_pretty(&report)
            .context("Failed to serialize report")?;
        out.push('\n');
        return Ok(out);
    }

    let title = match mode {
        TimeMode::Own => "OWN TIME",
        TimeMode::Total => "TOTAL TIME",
    };

    let mut out = String::new();
    out.push_str(&format!("{title} ({} samples)\n", counts.total()));
    out.push_str(&"-".repeat(60));
    out.push('\n');
    out.push_str(&counts.to_string());
    Ok(out)
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    if args.top == 0 {
        anyhow::bail!("top must be greater than 0");
    }

    if !args.samples.is_file() {
        anyhow::bail!("Samples file not found: {}", args.samples.display());
    }

    if !args.binary.is_file() {
        anyhow::bail!("Binary not found: {}", args.binary.display());
    }

    if args.capacity == Some(0) {
        anyhow::bail!("capacity must be greater than 0");
    }

    Ok(())
}
