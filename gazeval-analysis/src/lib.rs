pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod segment;
pub mod session;

pub use config::{AnalysisConfig, ClockModel, DeviceProfile, MissingData};
pub use error::{AnalysisError, ConfigError};
pub use metrics::compute_metrics;
pub use report::{Report, Summary, TargetOutcome, TargetReport};
pub use segment::{find_overlaps, segment, segment_with, SegmentStrategy, Segmentation};
pub use session::{analyze_reconciled, Session};
