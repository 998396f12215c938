use gazeval_core::{AxisError, DisplayGeometry, FixationBucket, Metrics, Point};

/// Accuracy, precision and jitter of one fixation. `None` for an empty bucket.
///
/// - accuracy: mean absolute deviation from `target`, per axis
/// - precision: population standard deviation around the bucket mean
/// - inter-sample RMS: RMS of successive differences, absent below two samples
pub fn compute_metrics(
    bucket: &FixationBucket,
    target: Point,
    display: &DisplayGeometry,
) -> Option<Metrics> {
    let samples = bucket.samples();
    if samples.is_empty() {
        return None;
    }
    let n = samples.len() as f64;

    // Welford: identical samples give an exact mean and zero spread.
    let mut mean = Point::default();
    let mut m2 = (0.0, 0.0);
    for (k, p) in samples.iter().enumerate() {
        let k = (k + 1) as f64;
        let (dx, dy) = (p.x - mean.x, p.y - mean.y);
        mean.x += dx / k;
        mean.y += dy / k;
        m2.0 += dx * (p.x - mean.x);
        m2.1 += dy * (p.y - mean.y);
    }

    let abs_x = samples.iter().map(|p| (p.x - target.x).abs()).sum::<f64>() / n;
    let abs_y = samples.iter().map(|p| (p.y - target.y).abs()).sum::<f64>() / n;

    Some(Metrics {
        sample_count: samples.len(),
        mean,
        accuracy: axis_error(abs_x, abs_y, display),
        precision: axis_error((m2.0 / n).sqrt(), (m2.1 / n).sqrt(), display),
        inter_sample_rms: inter_sample_rms(samples, display),
    })
}

fn inter_sample_rms(samples: &[Point], display: &DisplayGeometry) -> Option<AxisError> {
    if samples.len() < 2 {
        return None;
    }
    let n = (samples.len() - 1) as f64;
    let (sx, sy) = samples.windows(2).fold((0.0, 0.0), |(sx, sy), w| {
        let (dx, dy) = (w[1].x - w[0].x, w[1].y - w[0].y);
        (sx + dx * dx, sy + dy * dy)
    });
    Some(axis_error((sx / n).sqrt(), (sy / n).sqrt(), display))
}

fn axis_error(x: f64, y: f64, display: &DisplayGeometry) -> AxisError {
    AxisError {
        x,
        y,
        degrees: display.to_degrees(x, y),
    }
}
