use serde::{Deserialize, Serialize};

use crate::target::Point;

/// A single tracker reading.
///
/// `timestamp` is on the device clock until reconciled, then on the reference
/// clock. A missing `position` is tracker loss of signal. Serialized in the
/// canonical `{timestamp, x, y}` form with `null` coordinates for missing data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "SampleRecord", into = "SampleRecord")]
pub struct GazeSample {
    pub timestamp: f64,
    pub position: Option<Point>,
}

impl GazeSample {
    pub fn new(timestamp: f64, x: f64, y: f64) -> Self {
        Self {
            timestamp,
            position: Some(Point::new(x, y)),
        }
    }

    pub fn missing(timestamp: f64) -> Self {
        Self {
            timestamp,
            position: None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.position.is_none()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct SampleRecord {
    timestamp: f64,
    x: Option<f64>,
    y: Option<f64>,
}

impl From<SampleRecord> for GazeSample {
    fn from(r: SampleRecord) -> Self {
        match (r.x, r.y) {
            (Some(x), Some(y)) => GazeSample::new(r.timestamp, x, y),
            _ => GazeSample::missing(r.timestamp),
        }
    }
}

impl From<GazeSample> for SampleRecord {
    fn from(s: GazeSample) -> Self {
        Self {
            timestamp: s.timestamp,
            x: s.position.map(|p| p.x),
            y: s.position.map(|p| p.y),
        }
    }
}

/// Decides whether a sample carries usable gaze data
pub trait SampleValidity {
    fn accepts(&self, sample: &GazeSample) -> bool;

    /// Position of an accepted sample.
    fn position(&self, sample: &GazeSample) -> Option<Point> {
        if self.accepts(sample) {
            sample.position
        } else {
            None
        }
    }
}

/// Rejects only samples without a position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RequirePosition;

impl SampleValidity for RequirePosition {
    fn accepts(&self, sample: &GazeSample) -> bool {
        sample.position.is_some()
    }
}

/// For trackers that report loss of signal as a fixed coordinate
/// (e.g. `(-1, -1)`) instead of an empty field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentinel {
    pub value: Point,
}

impl Sentinel {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            value: Point::new(x, y),
        }
    }
}

impl SampleValidity for Sentinel {
    fn accepts(&self, sample: &GazeSample) -> bool {
        sample.position.is_some_and(|p| p != self.value)
    }
}

impl<F> SampleValidity for F
where
    F: Fn(&GazeSample) -> bool,
{
    fn accepts(&self, sample: &GazeSample) -> bool {
        self(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_position_drops_missing() {
        assert!(RequirePosition.accepts(&GazeSample::new(0.0, 1.0, 2.0)));
        assert!(!RequirePosition.accepts(&GazeSample::missing(0.0)));
    }

    #[test]
    fn sentinel_drops_loss_coordinate_and_missing() {
        let s = Sentinel::new(-1.0, -1.0);
        assert!(!s.accepts(&GazeSample::new(0.0, -1.0, -1.0)));
        assert!(!s.accepts(&GazeSample::missing(0.0)));
        assert!(s.accepts(&GazeSample::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn closures_are_predicates() {
        let left_half = |s: &GazeSample| s.position.is_some_and(|p| p.x < 960.0);
        assert!(left_half.accepts(&GazeSample::new(0.0, 10.0, 10.0)));
        assert_eq!(left_half.position(&GazeSample::new(0.0, 1000.0, 10.0)), None);
    }

    #[test]
    fn half_present_record_is_missing() {
        let s = GazeSample::from(SampleRecord {
            timestamp: 1.5,
            x: Some(3.0),
            y: None,
        });
        assert!(s.is_missing());
        assert_eq!(s.timestamp, 1.5);
    }
}
