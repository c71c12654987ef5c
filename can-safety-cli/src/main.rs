//! CAN Safety Gate CLI
//!
//! Replay/diagnostics front end for the can-safety-core library. It feeds a
//! JSON-Lines trace of decoded frames through a gate instance and reports
//! every verdict plus the final tracker state. The gate itself lives in the
//! library; this binary only adds file input, configuration, and reporting.

use anyhow::{Context, Result};
use can_safety_core::{ProfileId, ProfileParams, SafetyGate, VehicleProfile};
use clap::Parser;
use std::path::PathBuf;

mod config;
mod replay;
mod report;
mod trace;

/// CAN Safety Gate - replay decoded frame traces through the safety rules
#[derive(Parser, Debug)]
#[command(name = "can-safety-cli")]
#[command(about = "Replay decoded CAN traces through the vehicle safety gate", long_about = None)]
#[command(version)]
struct Args {
    /// Path to a JSON-Lines trace of decoded frames
    #[arg(short, long, value_name = "FILE")]
    trace: Option<PathBuf>,

    /// Vehicle profile to load
    #[arg(short, long, value_name = "NAME", default_value = "ford")]
    profile: String,

    /// Profile parameter flags (sub-mode bits, e.g. 1 = alternate wiring)
    #[arg(long, value_name = "FLAGS", default_value_t = 0)]
    flags: u16,

    /// Output file for the report (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of trace records to replay
    #[arg(long, value_name = "COUNT")]
    max_frames: Option<usize>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("CAN Safety Gate CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using core library v{}", can_safety_core::VERSION);

    if let Some(config_path) = &args.config {
        config_mode(config_path, &args)
    } else if let Some(trace_path) = args.trace.clone() {
        simple_mode(&args, &trace_path)
    } else {
        println!("CAN Safety Gate - No input specified");
        println!("\nQuick Start:");
        println!("  can-safety-cli --trace trace.jsonl");
        println!("  can-safety-cli --trace trace.jsonl --profile ford --flags 1");
        println!("\nFor repeatable runs:");
        println!("  can-safety-cli --config config.toml");
        println!("\nUse --help for more options");
        Ok(())
    }
}

/// Simple mode - profile and trace straight from the command line
fn simple_mode(args: &Args, trace_path: &std::path::Path) -> Result<()> {
    let profile_id: ProfileId = args
        .profile
        .parse()
        .with_context(|| format!("Unknown profile: {}", args.profile))?;
    let params = ProfileParams::new().with_flags(args.flags);
    let mut gate = SafetyGate::new(profile_id, params)?;

    run_replay(&mut gate, trace_path, args.max_frames, args.output.as_deref())
}

/// Config mode - everything pinned down in a TOML file
fn config_mode(config_path: &PathBuf, args: &Args) -> Result<()> {
    log::info!("Loading configuration from: {:?}", config_path);
    let app_config = config::load_config(config_path)?;

    let params = ProfileParams::new().with_flags(app_config.profile.flags);
    let mut profile = VehicleProfile::load(app_config.profile.name, params)?;
    if let Some(thresholds) = app_config.thresholds {
        log::debug!("Applying threshold overrides: {:?}", thresholds);
        profile.thresholds = thresholds;
    }
    let mut gate = SafetyGate::from_profile(profile);

    // Command-line trace/output take precedence over the config file
    let trace_path = args
        .trace
        .clone()
        .or(app_config.input.trace)
        .context("No trace file given (set input.trace or pass --trace)")?;
    let max_frames = args.max_frames.or(app_config.input.max_frames);
    let output = args.output.clone().or(app_config.output.report);

    run_replay(&mut gate, &trace_path, max_frames, output.as_deref())
}

/// Shared replay-and-report path
fn run_replay(
    gate: &mut SafetyGate,
    trace_path: &std::path::Path,
    max_frames: Option<usize>,
    output: Option<&std::path::Path>,
) -> Result<()> {
    let records = trace::read_trace(trace_path)?;
    let summary = replay::replay(gate, &records, max_frames);
    let report = report::render(gate, &summary);

    match output {
        Some(path) => {
            std::fs::write(path, &report)
                .with_context(|| format!("Failed to write report: {:?}", path))?;
            log::info!("Report written to {:?}", path);
        }
        None => print!("{}", report),
    }

    if summary.tx_denied > 0 {
        log::warn!("{} candidate frame(s) denied", summary.tx_denied);
    }
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
