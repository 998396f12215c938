//! Device clock to reference clock reconciliation.
//!
//! Every gaze sample is re-stamped as `reference_time = device_time + offset`
//! so it can be compared against the stimulus program's fixation intervals.

use chrono::NaiveDateTime;
use gazeval_core::GazeSample;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ClockError;
use crate::header::{parse_recording_start, HeaderFormat};

/// Additive correction from device seconds to reference seconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct ClockOffset(f64);

impl ClockOffset {
    pub const fn from_seconds(s: f64) -> Self {
        Self(s)
    }

    pub fn seconds(&self) -> f64 {
        self.0
    }
}

/// Fixed wall-clock correction for devices whose internal clock runs in a
/// different timezone (or DST state) than the stimulus host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClockCorrection {
    pub hours: f64,
}

impl ClockCorrection {
    pub const fn hours(hours: f64) -> Self {
        Self { hours }
    }

    pub fn seconds(&self) -> f64 {
        self.hours * 3600.0
    }
}

/// Maps a device's native timestamps onto the reference clock
pub trait DeviceClock {
    fn offset(&self) -> ClockOffset;

    fn to_reference(&self, device_ts: f64) -> f64 {
        device_ts + self.offset().seconds()
    }

    fn reconcile_sample(&self, sample: &GazeSample) -> GazeSample {
        GazeSample {
            timestamp: self.to_reference(sample.timestamp),
            position: sample.position,
        }
    }
}

/// Unix seconds of a header wall clock after the device correction.
pub fn corrected_epoch(device_start: NaiveDateTime, correction: ClockCorrection) -> f64 {
    let utc = device_start.and_utc();
    utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) * 1e-9 + correction.seconds()
}

/// Recording-start epoch read from a header, device correction applied.
pub fn corrected_epoch_from_header(
    header: &str,
    format: &HeaderFormat,
    correction: ClockCorrection,
) -> Result<f64, ClockError> {
    let start = parse_recording_start(header, format)?;
    Ok(corrected_epoch(start, correction))
}

/// Offset for a device whose samples are seconds since its recording start.
///
/// `reference_epoch_basis` is the Unix time at which the reference clock reads
/// zero; use `0.0` when the stimulus log is already in Unix seconds.
pub fn compute_offset(
    device_start: NaiveDateTime,
    correction: ClockCorrection,
    reference_epoch_basis: f64,
) -> ClockOffset {
    let offset = corrected_epoch(device_start, correction) - reference_epoch_basis;
    debug!(%device_start, correction_h = correction.hours, offset, "computed clock offset");
    ClockOffset(offset)
}

/// Device that timestamps samples in seconds relative to a header wall clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallClock {
    offset: ClockOffset,
}

impl WallClock {
    pub fn new(offset: ClockOffset) -> Self {
        Self { offset }
    }

    pub fn from_header(
        header: &str,
        format: &HeaderFormat,
        correction: ClockCorrection,
        reference_epoch_basis: f64,
    ) -> Result<Self, ClockError> {
        let start = parse_recording_start(header, format)?;
        let offset = compute_offset(start, correction, reference_epoch_basis);
        info!(offset_s = offset.seconds(), "wall-clock device reconciled");
        Ok(Self { offset })
    }
}

impl DeviceClock for WallClock {
    fn offset(&self) -> ClockOffset {
        self.offset
    }
}

/// Device that stamps samples with a free-running millisecond tick counter.
///
/// The first tick of the recording is pinned to the recording-start epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickCounterClock {
    /// Recording start on the reference clock, seconds
    start: f64,
    first_tick_ms: f64,
}

impl TickCounterClock {
    pub fn new(recording_start_epoch: f64, first_tick_ms: f64, reference_epoch_basis: f64) -> Self {
        Self {
            start: recording_start_epoch - reference_epoch_basis,
            first_tick_ms,
        }
    }

    /// Anchors the counter on the first sample of `samples`, whose timestamps
    /// are raw tick values.
    pub fn from_samples(
        recording_start_epoch: f64,
        samples: &[GazeSample],
        reference_epoch_basis: f64,
    ) -> Result<Self, ClockError> {
        let first = samples.first().ok_or(ClockError::EmptyRecording)?;
        let clock = Self::new(recording_start_epoch, first.timestamp, reference_epoch_basis);
        info!(
            first_tick_ms = first.timestamp,
            offset_s = clock.offset().seconds(),
            "tick-counter device reconciled"
        );
        Ok(clock)
    }

    pub fn first_tick_ms(&self) -> f64 {
        self.first_tick_ms
    }
}

impl DeviceClock for TickCounterClock {
    /// Offset relative to `tick / 1000`.
    fn offset(&self) -> ClockOffset {
        ClockOffset(self.start - self.first_tick_ms / 1000.0)
    }

    // ticks are differenced before scaling
    fn to_reference(&self, tick_ms: f64) -> f64 {
        self.start + (tick_ms - self.first_tick_ms) / 1000.0
    }
}

/// Re-stamps every sample onto the reference clock, preserving order.
pub fn reconcile<C: DeviceClock + ?Sized>(samples: &[GazeSample], clock: &C) -> Vec<GazeSample> {
    samples.iter().map(|s| clock.reconcile_sample(s)).collect()
}
