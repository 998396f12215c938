use gazeval_core::GazeSample;
use serde::{Deserialize, Serialize};

/// Placement of a cropped capture window on the stimulus screen.
///
/// Some trackers report gaze relative to their capture window; adding the
/// window's top-left corner moves samples into full-screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpatialOffset {
    pub x: f64,
    pub y: f64,
}

impl SpatialOffset {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Missing positions stay missing.
    pub fn apply(&self, sample: &GazeSample) -> GazeSample {
        GazeSample {
            timestamp: sample.timestamp,
            position: sample.position.map(|p| p.offset(self.x, self.y)),
        }
    }
}
