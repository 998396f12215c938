//! Pixel to visual-angle conversion.

use serde::{Deserialize, Serialize};

/// Physical display the stimulus was shown on.
///
/// Each axis has its own pixels-per-degree ratio, `resolution / fov`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayGeometry {
    /// `(width, height)` in pixels
    pub resolution_px: (f64, f64),
    /// `(horizontal, vertical)` field of view in degrees
    pub fov_deg: (f64, f64),
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self {
            resolution_px: (1920.0, 1080.0),
            fov_deg: (60.0, 34.0),
        }
    }
}

impl DisplayGeometry {
    pub fn new(width_px: f64, height_px: f64, h_fov_deg: f64, v_fov_deg: f64) -> Self {
        Self {
            resolution_px: (width_px, height_px),
            fov_deg: (h_fov_deg, v_fov_deg),
        }
    }

    pub fn pixels_per_degree(&self) -> (f64, f64) {
        (
            self.resolution_px.0 / self.fov_deg.0,
            self.resolution_px.1 / self.fov_deg.1,
        )
    }

    /// Combined angular magnitude of a per-axis pixel error.
    pub fn to_degrees(&self, error_x_px: f64, error_y_px: f64) -> f64 {
        let (ratio_x, ratio_y) = self.pixels_per_degree();
        (error_x_px / ratio_x).hypot(error_y_px / ratio_y)
    }

    /// `None` when the geometry is usable, otherwise what is wrong with it.
    pub fn problem(&self) -> Option<&'static str> {
        let (w, h) = self.resolution_px;
        let (hf, vf) = self.fov_deg;
        if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
            Some("resolution must be positive")
        } else if !(hf.is_finite() && vf.is_finite()) || hf <= 0.0 || vf <= 0.0 {
            Some("field of view must be positive")
        } else {
            None
        }
    }
}
