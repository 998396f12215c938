use std::path::PathBuf;

use gazeval_timing::ClockError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid display geometry: {0}")]
    InvalidDisplay(&'static str),

    #[error("unknown device {name:?} (configured: {})", .known.join(", "))]
    UnknownDevice { name: String, known: Vec<String> },
}

/// Anything that aborts the analysis of a recording
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
