//! Target tables and gaze recordings on disk.
//!
//! Both come as JSON arrays or CSV with a header row, picked by extension.
//! Sample CSV uses empty `x`/`y` cells for loss of signal.

use anyhow::{bail, Context, Result};
use gazeval_core::{GazeSample, Target};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Csv,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(Format::Csv),
        _ => bail!("{}: expected a .json or .csv file", path.display()),
    }
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let format = format_of(path)?;
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let records = match format {
        Format::Json => serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?,
        Format::Csv => csv::Reader::from_reader(file)
            .deserialize()
            .collect::<Result<Vec<T>, csv::Error>>()
            .with_context(|| format!("parsing {}", path.display()))?,
    };
    Ok(records)
}

pub fn load_targets(path: &Path) -> Result<Vec<Target>> {
    let targets: Vec<Target> = read_records(path)?;
    debug!(path = %path.display(), count = targets.len(), "loaded targets");
    Ok(targets)
}

pub fn load_samples(path: &Path) -> Result<Vec<GazeSample>> {
    let samples: Vec<GazeSample> = read_records(path)?;
    debug!(path = %path.display(), count = samples.len(), "loaded gaze samples");
    Ok(samples)
}

/// Recording header from the command line, or the leading lines of a file.
pub fn load_header(inline: Option<&str>, file: Option<&Path>) -> Result<String> {
    match (inline, file) {
        (Some(h), _) => Ok(h.to_string()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("reading header from {}", path.display())),
        (None, None) => bail!("a recording header is required (--header or --header-file)"),
    }
}
