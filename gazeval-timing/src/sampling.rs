use gazeval_core::GazeSample;
use serde::{Deserialize, Serialize};

/// Inter-sample interval statistics of a recording.
///
/// Trackers advertise a nominal rate; dropped frames and host scheduling
/// show up here as jitter and as a long maximum interval.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SamplingStats {
    pub sample_count: usize,
    pub missing_count: usize,
    pub mean_interval_s: f64,
    /// Population standard deviation of the intervals
    pub jitter_s: f64,
    pub min_interval_s: f64,
    pub max_interval_s: f64,
    pub effective_rate_hz: f64,
}

impl SamplingStats {
    pub fn from_samples(samples: &[GazeSample]) -> Self {
        let missing_count = samples.iter().filter(|s| s.is_missing()).count();
        let intervals: Vec<f64> = samples
            .windows(2)
            .map(|w| w[1].timestamp - w[0].timestamp)
            .collect();
        if intervals.is_empty() {
            return SamplingStats {
                sample_count: samples.len(),
                missing_count,
                ..Default::default()
            };
        }
        let n = intervals.len() as f64;
        let avg = intervals.iter().sum::<f64>() / n;
        let var = intervals.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / n;
        let min = intervals.iter().copied().fold(f64::INFINITY, f64::min);
        let max = intervals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        SamplingStats {
            sample_count: samples.len(),
            missing_count,
            mean_interval_s: avg,
            jitter_s: var.sqrt(),
            min_interval_s: min,
            max_interval_s: max,
            effective_rate_hz: if avg > 0.0 { 1.0 / avg } else { 0.0 },
        }
    }
}
