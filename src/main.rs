use anyhow::{Context, Result};
use clap::Parser;
use gazeval_analysis::{AnalysisConfig, SegmentStrategy, Session};
use std::path::PathBuf;
use tracing::{info, warn};

mod input;

#[derive(Parser, Debug)]
#[command(name = "gazeval")]
#[command(about = "Score eye-tracker accuracy and precision against a fixation-target grid")]
struct Args {
    /// Analysis configuration (display geometry and device profiles)
    #[arg(short, long)]
    config: PathBuf,

    /// Device profile name from the configuration
    #[arg(short, long)]
    device: String,

    /// Fixation targets (.json or .csv)
    #[arg(short, long)]
    targets: PathBuf,

    /// Gaze samples in device time (.json or .csv)
    #[arg(short, long)]
    samples: PathBuf,

    /// Recording header text holding the start time
    #[arg(long, conflicts_with = "header_file")]
    header: Option<String>,

    /// File whose contents are the recording header
    #[arg(long)]
    header_file: Option<PathBuf>,

    /// Write the report as JSON here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the configured segmentation strategy
    #[arg(long, value_parser = parse_strategy)]
    strategy: Option<SegmentStrategy>,
}

fn parse_strategy(s: &str) -> Result<SegmentStrategy, String> {
    match s {
        "auto" => Ok(SegmentStrategy::Auto),
        "nested" => Ok(SegmentStrategy::Nested),
        "sorted-merge" | "sorted_merge" => Ok(SegmentStrategy::SortedMerge),
        other => Err(format!(
            "unknown strategy {other:?} (expected auto, nested or sorted-merge)"
        )),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gazeval=info,gazeval_analysis=info,gazeval_timing=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = AnalysisConfig::load(&args.config)
        .with_context(|| format!("loading config {}", args.config.display()))?;
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }

    let targets = input::load_targets(&args.targets)?;
    let samples = input::load_samples(&args.samples)?;
    let header = input::load_header(args.header.as_deref(), args.header_file.as_deref())?;
    info!(
        targets = targets.len(),
        samples = samples.len(),
        device = %args.device,
        "inputs loaded"
    );
    if targets.is_empty() {
        warn!("target table is empty, report will hold no targets");
    }

    let session = Session::new(&config, &args.device)?;
    let report = session
        .analyze(&targets, &header, &samples)
        .with_context(|| format!("analysing {}", args.samples.display()))?;

    print!("{report}");

    if let Some(path) = &args.output {
        let json = report.to_json_pretty()?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    Ok(())
}
