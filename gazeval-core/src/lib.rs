pub mod angle;
pub mod fixation;
pub mod gaze;
pub mod target;

pub use angle::DisplayGeometry;
pub use fixation::{AxisError, FixationBucket, Metrics};
pub use gaze::{GazeSample, RequirePosition, SampleValidity, Sentinel};
pub use target::{Interval, Point, Target};
