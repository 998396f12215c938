use serde::{Deserialize, Serialize};

use crate::target::Point;

/// Gaze positions recorded while one target was displayed, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixationBucket {
    samples: Vec<Point>,
}

impl FixationBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, p: Point) {
        self.samples.push(p);
    }

    pub fn samples(&self) -> &[Point] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl From<Vec<Point>> for FixationBucket {
    fn from(samples: Vec<Point>) -> Self {
        Self { samples }
    }
}

/// Per-axis pixel magnitude plus the combined visual angle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisError {
    pub x: f64,
    pub y: f64,
    pub degrees: f64,
}

/// Summary of one non-empty fixation bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub sample_count: usize,
    pub mean: Point,
    /// Mean absolute deviation from the target
    pub accuracy: AxisError,
    /// Population standard deviation around the bucket mean
    pub precision: AxisError,
    /// RMS of successive-sample differences; needs at least two samples
    pub inter_sample_rms: Option<AxisError>,
}
