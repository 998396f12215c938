//! End-to-end analysis of one recording: reconcile, segment, aggregate.

use gazeval_core::{DisplayGeometry, GazeSample, RequirePosition, SampleValidity, Target};
use gazeval_timing::{
    corrected_epoch_from_header, reconcile, DeviceClock, SamplingStats, TickCounterClock,
    WallClock,
};
use tracing::{info, warn};

use crate::config::{AnalysisConfig, ClockModel, DeviceProfile};
use crate::error::AnalysisError;
use crate::metrics::compute_metrics;
use crate::report::{Report, Summary, TargetReport};
use crate::segment::{find_overlaps, segment_with, SegmentStrategy};

/// One tracker recording analysed against one stimulus table.
pub struct Session<'a> {
    config: &'a AnalysisConfig,
    device_name: String,
    device: &'a DeviceProfile,
}

impl<'a> Session<'a> {
    pub fn new(config: &'a AnalysisConfig, device: &str) -> Result<Self, AnalysisError> {
        config.validate()?;
        let profile = config.device(device)?;
        Ok(Self {
            config,
            device_name: device.to_string(),
            device: profile,
        })
    }

    pub fn device(&self) -> &DeviceProfile {
        self.device
    }

    /// Clock anchor for the recording. `raw` is only consulted by tick-counter
    /// devices, whose first sample pins the counter.
    pub fn clock(&self, header: &str, raw: &[GazeSample]) -> Result<Box<dyn DeviceClock>, AnalysisError> {
        let basis = self.config.reference_epoch_basis;
        let correction = self.device.correction();
        let clock: Box<dyn DeviceClock> = match self.device.clock {
            ClockModel::WallClock => Box::new(WallClock::from_header(
                header,
                &self.device.header,
                correction,
                basis,
            )?),
            ClockModel::TickCounter => {
                let start = corrected_epoch_from_header(header, &self.device.header, correction)?;
                Box::new(TickCounterClock::from_samples(start, raw, basis)?)
            }
        };
        Ok(clock)
    }

    /// Reference-clock samples in full-screen coordinates. Samples the device
    /// profile rejects come back without a position.
    pub fn prepare(&self, header: &str, raw: &[GazeSample]) -> Result<(f64, Vec<GazeSample>), AnalysisError> {
        let clock = self.clock(header, raw)?;
        let validity = self.device.missing.validity();
        let spatial = self.device.spatial_offset;
        // sentinels are in device coordinates, mask before shifting
        let samples = reconcile(raw, clock.as_ref())
            .into_iter()
            .map(|s| match validity.position(&s) {
                Some(_) => spatial.apply(&s),
                None => GazeSample::missing(s.timestamp),
            })
            .collect();
        Ok((clock.offset().seconds(), samples))
    }

    pub fn analyze(
        &self,
        targets: &[Target],
        header: &str,
        raw: &[GazeSample],
    ) -> Result<Report, AnalysisError> {
        let (offset, samples) = self.prepare(header, raw)?;
        let mut report = analyze_reconciled(
            targets,
            &samples,
            &RequirePosition,
            &self.config.display,
            self.config.strategy,
        );
        report.device = Some(self.device_name.clone());
        report.clock_offset_s = offset;
        info!(
            device = %self.device_name,
            measured = report.summary.measured,
            no_data = report.summary.no_data,
            "session analysed"
        );
        Ok(report)
    }
}

/// Segments already-reconciled samples and aggregates every bucket.
pub fn analyze_reconciled<V>(
    targets: &[Target],
    samples: &[GazeSample],
    validity: &V,
    display: &DisplayGeometry,
    strategy: SegmentStrategy,
) -> Report
where
    V: SampleValidity + ?Sized,
{
    let overlaps = find_overlaps(targets);
    for (a, b) in &overlaps {
        warn!(first = a, second = b, "fixation intervals overlap, shared samples are double-counted");
    }

    let seg = segment_with(targets, samples, validity, strategy);
    let reports: Vec<TargetReport> = targets
        .iter()
        .zip(&seg.buckets)
        .enumerate()
        .map(|(index, (target, bucket))| TargetReport {
            index,
            target: *target,
            outcome: compute_metrics(bucket, target.position, display).into(),
        })
        .collect();
    let summary = Summary::new(&reports, &seg, overlaps);

    Report {
        device: None,
        clock_offset_s: 0.0,
        sampling: SamplingStats::from_samples(samples),
        targets: reports,
        summary,
    }
}
