//! Assignment of reconciled gaze samples to target fixation intervals.

use gazeval_core::{FixationBucket, GazeSample, SampleValidity, Target};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentStrategy {
    /// Sorted merge when the targets allow it, otherwise nested
    #[default]
    Auto,
    /// Every sample against every target
    Nested,
    /// Binary search over interval starts. Requires targets sorted by start
    /// with non-overlapping intervals; falls back to `Nested` otherwise.
    SortedMerge,
}

/// Buckets index-aligned with the targets, plus where every sample went.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmentation {
    pub buckets: Vec<FixationBucket>,
    /// Valid samples inside at least one interval
    pub assigned: usize,
    /// Samples rejected by the validity predicate
    pub invalid: usize,
    /// Valid samples outside every interval
    pub unmatched: usize,
}

/// Nested-scan segmentation. A sample inside several (overlapping) intervals
/// lands in every one of them.
pub fn segment<V>(targets: &[Target], samples: &[GazeSample], validity: &V) -> Vec<FixationBucket>
where
    V: SampleValidity + ?Sized,
{
    nested(targets, samples, validity).buckets
}

pub fn segment_with<V>(
    targets: &[Target],
    samples: &[GazeSample],
    validity: &V,
    strategy: SegmentStrategy,
) -> Segmentation
where
    V: SampleValidity + ?Sized,
{
    let seg = match strategy {
        SegmentStrategy::Nested => nested(targets, samples, validity),
        SegmentStrategy::Auto | SegmentStrategy::SortedMerge => match first_conflict(targets) {
            None => sorted_merge(targets, samples, validity),
            Some((a, b)) => {
                warn!(
                    first = a,
                    second = b,
                    "targets unsorted or overlapping, using nested segmentation"
                );
                nested(targets, samples, validity)
            }
        },
    };
    debug!(
        targets = targets.len(),
        assigned = seg.assigned,
        invalid = seg.invalid,
        unmatched = seg.unmatched,
        "segmentation finished"
    );
    seg
}

fn nested<V>(targets: &[Target], samples: &[GazeSample], validity: &V) -> Segmentation
where
    V: SampleValidity + ?Sized,
{
    let mut seg = Segmentation {
        buckets: vec![FixationBucket::new(); targets.len()],
        ..Default::default()
    };
    for sample in samples {
        let Some(pos) = validity.position(sample) else {
            seg.invalid += 1;
            continue;
        };
        let mut matched = false;
        for (bucket, target) in seg.buckets.iter_mut().zip(targets) {
            if target.interval.contains(sample.timestamp) {
                bucket.push(pos);
                matched = true;
            }
        }
        if matched {
            seg.assigned += 1;
        } else {
            seg.unmatched += 1;
        }
    }
    seg
}

fn sorted_merge<V>(targets: &[Target], samples: &[GazeSample], validity: &V) -> Segmentation
where
    V: SampleValidity + ?Sized,
{
    let mut seg = Segmentation {
        buckets: vec![FixationBucket::new(); targets.len()],
        ..Default::default()
    };
    for sample in samples {
        let Some(pos) = validity.position(sample) else {
            seg.invalid += 1;
            continue;
        };
        let t = sample.timestamp;
        // last target starting strictly before t is the only candidate
        let idx = targets.partition_point(|tg| tg.interval.start < t);
        match idx.checked_sub(1) {
            Some(i) if targets[i].interval.contains(t) => {
                seg.buckets[i].push(pos);
                seg.assigned += 1;
            }
            _ => seg.unmatched += 1,
        }
    }
    seg
}

/// First adjacent pair that breaks "sorted by start, non-overlapping".
fn first_conflict(targets: &[Target]) -> Option<(usize, usize)> {
    targets
        .windows(2)
        .position(|w| w[1].interval.start < w[0].interval.stop.max(w[0].interval.start))
        .map(|i| (i, i + 1))
}

/// Every pair of targets whose intervals overlap.
pub fn find_overlaps(targets: &[Target]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (i, a) in targets.iter().enumerate() {
        for (j, b) in targets.iter().enumerate().skip(i + 1) {
            if a.interval.overlaps(&b.interval) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
