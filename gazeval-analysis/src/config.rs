use std::collections::BTreeMap;
use std::path::Path;

use gazeval_core::{DisplayGeometry, RequirePosition, SampleValidity, Sentinel};
use gazeval_timing::{ClockCorrection, HeaderFormat, SpatialOffset};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::segment::SegmentStrategy;

/// Everything the analysis needs to know about the display and the trackers.
///
/// ```toml
/// reference_epoch_basis = 0.0
/// strategy = "auto"
///
/// [display]
/// resolution_px = [1920.0, 1080.0]
/// fov_deg = [60.0, 34.0]
///
/// [devices.glasses]
/// clock = "wall_clock"
/// correction_hours = 2.0
/// header = { key = "Date:", format = "%d.%m.%Y %H:%M:%S" }
///
/// [devices.webcam]
/// clock = "tick_counter"
/// spatial_offset = { x = 320.0, y = 180.0 }
/// missing = { kind = "sentinel", x = -1.0, y = -1.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub display: DisplayGeometry,
    /// Unix time at which the stimulus clock reads zero
    pub reference_epoch_basis: f64,
    pub strategy: SegmentStrategy,
    pub devices: BTreeMap<String, DeviceProfile>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            display: DisplayGeometry::default(),
            reference_epoch_basis: 0.0,
            strategy: SegmentStrategy::Auto,
            devices: BTreeMap::new(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), devices = config.devices.len(), "loaded analysis config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.display.problem() {
            Some(p) => Err(ConfigError::InvalidDisplay(p)),
            None => Ok(()),
        }
    }

    pub fn device(&self, name: &str) -> Result<&DeviceProfile, ConfigError> {
        self.devices
            .get(name)
            .ok_or_else(|| ConfigError::UnknownDevice {
                name: name.to_string(),
                known: self.devices.keys().cloned().collect(),
            })
    }

    pub fn with_device(mut self, name: impl Into<String>, profile: DeviceProfile) -> Self {
        self.devices.insert(name.into(), profile);
        self
    }
}

/// How a tracker timestamps its samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockModel {
    /// Seconds since a wall-clock recording start read from the header
    #[default]
    WallClock,
    /// Free-running millisecond ticks; the first tick is the recording start
    TickCounter,
}

/// How a tracker reports loss of signal
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MissingData {
    /// Empty coordinates
    #[default]
    Empty,
    /// A fixed coordinate, in addition to empty ones
    Sentinel { x: f64, y: f64 },
}

impl MissingData {
    pub fn validity(&self) -> Box<dyn SampleValidity> {
        match *self {
            MissingData::Empty => Box::new(RequirePosition),
            MissingData::Sentinel { x, y } => Box::new(Sentinel::new(x, y)),
        }
    }
}

/// Per-tracker corrections. All of them are properties of the physical
/// setup, never derived from the recorded data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    pub clock: ClockModel,
    pub header: HeaderFormat,
    pub correction_hours: f64,
    pub spatial_offset: SpatialOffset,
    pub missing: MissingData,
}

impl DeviceProfile {
    pub fn correction(&self) -> ClockCorrection {
        ClockCorrection::hours(self.correction_hours)
    }
}
