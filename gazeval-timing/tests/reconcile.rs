use approx::assert_abs_diff_eq;
use gazeval_core::{GazeSample, Point};
use gazeval_timing::{
    corrected_epoch_from_header, reconcile, ClockCorrection, ClockError, DeviceClock,
    HeaderFormat, SpatialOffset, TickCounterClock, WallClock,
};

const HEADER: &str = "## [Recording]\n## Date: 05.03.2019 12:22:10\n## Sample rate: 60\n";

fn format() -> HeaderFormat {
    HeaderFormat::new("%d.%m.%Y %H:%M:%S").with_key("Date:")
}

#[test]
fn device_two_hours_behind_lines_up_with_stimulus_clock() {
    // stimulus log counts from 2019-03-05 14:22:10 UTC
    let basis = 1_551_795_730.0;
    let clock = WallClock::from_header(HEADER, &format(), ClockCorrection::hours(2.0), basis).unwrap();
    assert_abs_diff_eq!(clock.offset().seconds(), 0.0, epsilon = 1e-6);

    let out = reconcile(&[GazeSample::new(1.0, 5.0, 5.0)], &clock);
    assert_abs_diff_eq!(out[0].timestamp, 1.0, epsilon = 1e-6);
}

#[test]
fn tick_counter_with_cropped_window() {
    let start = corrected_epoch_from_header(HEADER, &format(), ClockCorrection::default()).unwrap();
    let raw = [
        GazeSample::new(40_000.0, 10.0, 10.0),
        GazeSample::missing(40_033.0),
        GazeSample::new(40_066.0, 12.0, 8.0),
    ];
    let clock = TickCounterClock::from_samples(start, &raw, start).unwrap();
    let window = SpatialOffset::new(640.0, 360.0);
    let out: Vec<GazeSample> = reconcile(&raw, &clock)
        .iter()
        .map(|s| window.apply(s))
        .collect();

    assert_eq!(out[0].timestamp, 0.0);
    assert_abs_diff_eq!(out[2].timestamp, 0.066, epsilon = 1e-9);
    assert_eq!(out[0].position, Some(Point::new(650.0, 370.0)));
    assert!(out[1].is_missing());
    assert_eq!(out[2].position, Some(Point::new(652.0, 368.0)));
}

#[test]
fn header_error_carries_raw_text() {
    let broken = "## Date: yesterday-ish";
    match WallClock::from_header(broken, &format(), ClockCorrection::default(), 0.0) {
        Err(ClockError::InvalidHeader { header, reason }) => {
            assert_eq!(header, broken);
            assert!(reason.contains("%d.%m.%Y"));
        }
        other => panic!("expected InvalidHeader, got {other:?}"),
    }
}
