pub mod clock;
pub mod error;
pub mod header;
pub mod sampling;
pub mod spatial;

pub use clock::{
    compute_offset, corrected_epoch, corrected_epoch_from_header, reconcile, ClockCorrection,
    ClockOffset, DeviceClock, TickCounterClock, WallClock,
};
pub use error::ClockError;
pub use header::{parse_recording_start, HeaderFormat};
pub use sampling::SamplingStats;
pub use spatial::SpatialOffset;
