use serde::{Deserialize, Serialize};

/// Screen position in stimulus-display pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Reference-clock window, in seconds, during which a target was on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub stop: f64,
}

impl Interval {
    pub const fn new(start: f64, stop: f64) -> Self {
        Self { start, stop }
    }

    /// Strict on both ends: a sample stamped exactly at `start` or `stop` is outside.
    pub fn contains(&self, t: f64) -> bool {
        self.start < t && t < self.stop
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.stop && other.start < self.stop
    }

    pub fn duration(&self) -> f64 {
        self.stop - self.start
    }
}

/// One fixation point of the stimulus grid.
///
/// Serialized in the flat canonical form emitted by the stimulus program:
/// `{x, y, interval_start, interval_stop}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "TargetRecord", into = "TargetRecord")]
pub struct Target {
    pub position: Point,
    pub interval: Interval,
}

impl Target {
    pub fn new(x: f64, y: f64, start: f64, stop: f64) -> Self {
        Self {
            position: Point::new(x, y),
            interval: Interval::new(start, stop),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct TargetRecord {
    x: f64,
    y: f64,
    interval_start: f64,
    interval_stop: f64,
}

impl From<TargetRecord> for Target {
    fn from(r: TargetRecord) -> Self {
        Target::new(r.x, r.y, r.interval_start, r.interval_stop)
    }
}

impl From<Target> for TargetRecord {
    fn from(t: Target) -> Self {
        Self {
            x: t.position.x,
            y: t.position.y,
            interval_start: t.interval.start,
            interval_stop: t.interval.stop,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_bounds_are_exclusive() {
        let iv = Interval::new(0.0, 1.0);
        assert!(iv.contains(0.5));
        assert!(!iv.contains(0.0));
        assert!(!iv.contains(1.0));
        assert!(!iv.contains(-0.1));
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let a = Interval::new(0.0, 1.0);
        assert!(!a.overlaps(&Interval::new(1.0, 2.0)));
        assert!(a.overlaps(&Interval::new(0.9, 2.0)));
        assert!(Interval::new(0.2, 0.4).overlaps(&a));
    }
}
