use std::fmt;

use gazeval_core::{AxisError, Metrics, Target};
use gazeval_timing::SamplingStats;
use serde::{Deserialize, Serialize};

use crate::segment::Segmentation;

/// Result for one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "metrics", rename_all = "snake_case")]
pub enum TargetOutcome {
    /// The tracker never delivered a valid sample inside the interval
    NoData,
    Measured(Metrics),
}

impl TargetOutcome {
    pub fn metrics(&self) -> Option<&Metrics> {
        match self {
            TargetOutcome::NoData => None,
            TargetOutcome::Measured(m) => Some(m),
        }
    }
}

impl From<Option<Metrics>> for TargetOutcome {
    fn from(m: Option<Metrics>) -> Self {
        m.map_or(TargetOutcome::NoData, TargetOutcome::Measured)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetReport {
    pub index: usize,
    pub target: Target,
    pub outcome: TargetOutcome,
}

/// Grid-level view of a session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub targets: usize,
    pub measured: usize,
    pub no_data: usize,
    pub samples_assigned: usize,
    pub samples_invalid: usize,
    pub samples_unmatched: usize,
    pub mean_accuracy_deg: Option<f64>,
    pub mean_precision_deg: Option<f64>,
    /// Averaged over targets with at least two samples
    pub mean_inter_sample_rms_deg: Option<f64>,
    /// Target index pairs whose intervals overlap; their shared samples are
    /// counted in both buckets.
    pub overlapping_targets: Vec<(usize, usize)>,
}

impl Summary {
    pub fn new(
        reports: &[TargetReport],
        seg: &Segmentation,
        overlapping_targets: Vec<(usize, usize)>,
    ) -> Self {
        let measured: Vec<&Metrics> = reports.iter().filter_map(|r| r.outcome.metrics()).collect();
        Summary {
            targets: reports.len(),
            measured: measured.len(),
            no_data: reports.len() - measured.len(),
            samples_assigned: seg.assigned,
            samples_invalid: seg.invalid,
            samples_unmatched: seg.unmatched,
            mean_accuracy_deg: mean(measured.iter().map(|m| m.accuracy.degrees)),
            mean_precision_deg: mean(measured.iter().map(|m| m.precision.degrees)),
            mean_inter_sample_rms_deg: mean(
                measured
                    .iter()
                    .filter_map(|m| m.inter_sample_rms.map(|r| r.degrees)),
            ),
            overlapping_targets,
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Everything produced for one recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub device: Option<String>,
    pub clock_offset_s: f64,
    pub sampling: SamplingStats,
    pub targets: Vec<TargetReport>,
    pub summary: Summary,
}

impl Report {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn metrics(&self, index: usize) -> Option<&Metrics> {
        self.targets.get(index).and_then(|r| r.outcome.metrics())
    }
}

const INSUFFICIENT: &str = "insufficient data";

struct Cell<'a>(Option<&'a AxisError>);

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(e) => write!(f, "{:6.2} {:6.2} px {:5.2}°", e.x, e.y, e.degrees),
            None => f.write_str(INSUFFICIENT),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(device) = &self.device {
            writeln!(f, "Device: {device}")?;
        }
        writeln!(f, "Clock offset: {:.3} s", self.clock_offset_s)?;
        writeln!(
            f,
            "Sampling: {} samples ({} missing), {:.1} Hz, jitter {:.3} ms",
            self.sampling.sample_count,
            self.sampling.missing_count,
            self.sampling.effective_rate_hz,
            self.sampling.jitter_s * 1e3,
        )?;
        writeln!(f)?;
        for r in &self.targets {
            let t = &r.target;
            write!(
                f,
                "#{:<3} target ({:7.1}, {:7.1}) [{:.3}, {:.3}]  ",
                r.index, t.position.x, t.position.y, t.interval.start, t.interval.stop
            )?;
            match &r.outcome {
                TargetOutcome::NoData => writeln!(f, "{INSUFFICIENT}")?,
                TargetOutcome::Measured(m) => {
                    writeln!(
                        f,
                        "n={:<4} mean ({:7.1}, {:7.1})",
                        m.sample_count, m.mean.x, m.mean.y
                    )?;
                    writeln!(f, "      accuracy  {}", Cell(Some(&m.accuracy)))?;
                    writeln!(f, "      precision {}", Cell(Some(&m.precision)))?;
                    writeln!(f, "      rms s2s   {}", Cell(m.inter_sample_rms.as_ref()))?;
                }
            }
        }
        let s = &self.summary;
        writeln!(f)?;
        writeln!(
            f,
            "Targets: {} measured, {} without data",
            s.measured, s.no_data
        )?;
        writeln!(
            f,
            "Samples: {} assigned, {} invalid, {} outside every interval",
            s.samples_assigned, s.samples_invalid, s.samples_unmatched
        )?;
        for (label, v) in [
            ("Mean accuracy", s.mean_accuracy_deg),
            ("Mean precision", s.mean_precision_deg),
            ("Mean rms s2s", s.mean_inter_sample_rms_deg),
        ] {
            match v {
                Some(deg) => writeln!(f, "{label}: {deg:.3}°")?,
                None => writeln!(f, "{label}: {INSUFFICIENT}")?,
            }
        }
        for (a, b) in &s.overlapping_targets {
            writeln!(f, "Warning: intervals of targets {a} and {b} overlap")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gazeval_core::Point;

    fn measured(acc: f64, rms: Option<f64>) -> TargetOutcome {
        let err = |d| AxisError {
            x: 1.0,
            y: 1.0,
            degrees: d,
        };
        TargetOutcome::Measured(Metrics {
            sample_count: if rms.is_some() { 2 } else { 1 },
            mean: Point::new(0.0, 0.0),
            accuracy: err(acc),
            precision: err(0.0),
            inter_sample_rms: rms.map(err),
        })
    }

    fn report(outcomes: Vec<TargetOutcome>) -> Report {
        let targets: Vec<TargetReport> = outcomes
            .into_iter()
            .enumerate()
            .map(|(index, outcome)| TargetReport {
                index,
                target: Target::new(0.0, 0.0, index as f64, index as f64 + 0.5),
                outcome,
            })
            .collect();
        let summary = Summary::new(&targets, &Segmentation::default(), vec![]);
        Report {
            device: None,
            clock_offset_s: 0.0,
            sampling: SamplingStats::default(),
            targets,
            summary,
        }
    }

    #[test]
    fn summary_skips_absent_metrics() {
        let r = report(vec![
            measured(1.0, Some(0.2)),
            TargetOutcome::NoData,
            measured(3.0, None),
        ]);
        assert_eq!(r.summary.measured, 2);
        assert_eq!(r.summary.no_data, 1);
        assert_eq!(r.summary.mean_accuracy_deg, Some(2.0));
        assert_eq!(r.summary.mean_inter_sample_rms_deg, Some(0.2));
    }

    #[test]
    fn all_empty_summary_has_no_means() {
        let r = report(vec![TargetOutcome::NoData]);
        assert_eq!(r.summary.mean_accuracy_deg, None);
        assert_eq!(r.summary.mean_precision_deg, None);
    }

    #[test]
    fn absent_metrics_render_as_insufficient_data() {
        let text = report(vec![TargetOutcome::NoData, measured(1.0, None)]).to_string();
        assert!(text.contains("#0   target"));
        assert_eq!(text.matches(INSUFFICIENT).count(), 3);
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn json_tags_outcomes() {
        let json = report(vec![TargetOutcome::NoData]).to_json_pretty().unwrap();
        assert!(json.contains("\"status\": \"no_data\""));
        let back: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(back.targets[0].outcome, TargetOutcome::NoData);
    }
}
