use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-layout")]
use rayon::prelude::*;

use crate::core::binning::{BinnedAxis, Bucket};
use crate::core::category::{CategorySet, DominantCategory, dominant_category};
use crate::core::record::Record;
use crate::core::scale::LinearScale;
use crate::core::types::PlotArea;
use crate::error::{ChartError, ChartResult};

/// Deterministic dot geometry for one record, relative to the plot origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionedRecord {
    /// Index into the dataset records.
    pub record: usize,
    pub bucket: usize,
    /// Zero-based position inside the bucket, in insertion order.
    pub index: usize,
    pub dominant: DominantCategory,
    pub radius: f64,
    pub cx: f64,
    pub cy: f64,
}

/// Histogram dot layout shared by the scene builder and snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramLayout {
    pub radius: f64,
    pub bucket_offsets: Vec<f64>,
    pub positioned: Vec<PositionedRecord>,
    lookup: Vec<Option<usize>>,
}

impl HistogramLayout {
    /// Positioned entry for a dataset record, if the record was binned.
    #[must_use]
    pub fn position_of(&self, record: usize) -> Option<&PositionedRecord> {
        self.lookup
            .get(record)
            .copied()
            .flatten()
            .and_then(|slot| self.positioned.get(slot))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positioned.is_empty()
    }
}

/// Shared dot radius so the densest bucket fits the width and every bucket
/// fits the height.
///
/// `min(width / (2 * max_bucket_len), height / (2 * bucket_count))`, with both
/// denominators floored at one. Returns `0.0` when nothing was binned.
#[must_use]
pub fn compute_radius(binned: &BinnedAxis, width: f64, height: f64) -> f64 {
    if binned.buckets.iter().all(Bucket::is_empty) {
        return 0.0;
    }

    let max_bucket_len = binned.max_bucket_len().max(1) as f64;
    let bucket_count = binned.buckets.len().max(1) as f64;
    let by_width = width / (2.0 * max_bucket_len);
    let by_height = height / (2.0 * bucket_count);
    by_width.min(by_height)
}

/// Radius actually drawn: `radius - gap`, but never below half the radius.
#[must_use]
pub fn drawn_radius(radius: f64, gap_px: f64) -> f64 {
    (radius - gap_px).max(radius * 0.5)
}

/// Assigns every binned record its in-bucket index, dominant category and
/// dot center.
///
/// `cx = index * 2r + r`; `cy` is the axis scale applied to the bucket's
/// lower edge.
pub fn layout_histogram(
    records: &[Record],
    binned: &BinnedAxis,
    categories: &CategorySet,
    plot: PlotArea,
    axis: LinearScale,
) -> ChartResult<HistogramLayout> {
    let finite = plot.width.is_finite() && plot.height.is_finite();
    if !finite || plot.width <= 0.0 || plot.height <= 0.0 {
        return Err(ChartError::InvalidData(
            "plot area must be finite and non-empty".to_owned(),
        ));
    }

    let radius = compute_radius(binned, plot.width, plot.height);
    let bucket_offsets = binned
        .buckets
        .iter()
        .map(|bucket| axis.map(bucket.x0))
        .collect::<ChartResult<Vec<f64>>>()?;

    let place_bucket = |(bucket_index, bucket): (usize, &Bucket)| -> Vec<PositionedRecord> {
        let cy = bucket_offsets[bucket_index];
        bucket
            .members
            .iter()
            .enumerate()
            .filter_map(|(index, &record_index)| {
                let record = records.get(record_index)?;
                Some(PositionedRecord {
                    record: record_index,
                    bucket: bucket_index,
                    index,
                    dominant: dominant_category(record, categories),
                    radius,
                    cx: index as f64 * radius * 2.0 + radius,
                    cy,
                })
            })
            .collect()
    };

    #[cfg(feature = "parallel-layout")]
    let per_bucket: Vec<Vec<PositionedRecord>> = binned
        .buckets
        .par_iter()
        .enumerate()
        .map(place_bucket)
        .collect();

    #[cfg(not(feature = "parallel-layout"))]
    let per_bucket: Vec<Vec<PositionedRecord>> =
        binned.buckets.iter().enumerate().map(place_bucket).collect();

    let positioned: Vec<PositionedRecord> = per_bucket.into_iter().flatten().collect();
    let mut lookup = vec![None; records.len()];
    for (slot, entry) in positioned.iter().enumerate() {
        if let Some(cell) = lookup.get_mut(entry.record) {
            *cell = Some(slot);
        }
    }

    Ok(HistogramLayout {
        radius,
        bucket_offsets,
        positioned,
        lookup,
    })
}

#[cfg(test)]
mod tests {
    use super::drawn_radius;

    #[test]
    fn drawn_radius_keeps_gap_until_half_radius() {
        assert_eq!(drawn_radius(15.0, 5.0), 10.0);
        assert_eq!(drawn_radius(6.0, 5.0), 3.0);
    }
}
