use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::record::Record;
use crate::core::scale::nice_ticks;
use crate::error::{ChartError, ChartResult};

/// Upper bound on the bucket count of the `Uniform` and `NiceTicks` strategies.
pub const MAX_BUCKETS: usize = 1024;

/// How bucket edges are derived from the axis domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BinningStrategy {
    /// `count` equal-width buckets spanning the domain.
    Uniform { count: usize },
    /// Buckets split at the "nice" ticks of the domain for `count`.
    NiceTicks { count: usize },
    /// Buckets split at explicit thresholds; values outside the domain are
    /// ignored, as are thresholds `<= min` or `> max`.
    Thresholds { values: Vec<f64> },
}

impl Default for BinningStrategy {
    fn default() -> Self {
        Self::Uniform { count: 14 }
    }
}

impl BinningStrategy {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Uniform { count } | Self::NiceTicks { count } => check_bucket_count(*count),
            Self::Thresholds { values } if values.iter().any(|v| !v.is_finite()) => Err(
                ChartError::InvalidData("binning thresholds must be finite".to_owned()),
            ),
            Self::Thresholds { .. } => Ok(()),
        }
    }
}

/// Contiguous interval over the binned axis.
///
/// The interval is half-open `[x0, x1)` except for the last bucket of an
/// axis, which is closed on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub x0: f64,
    pub x1: f64,
    /// Indices into the binned record slice, in input order.
    pub members: Vec<usize>,
}

impl Bucket {
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Result of binning one axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BinnedAxis {
    pub buckets: Vec<Bucket>,
    /// Records whose axis value fell outside the requested domain.
    pub dropped: Vec<usize>,
}

impl BinnedAxis {
    #[must_use]
    pub fn max_bucket_len(&self) -> usize {
        self.buckets.iter().map(Bucket::len).max().unwrap_or(0)
    }

    /// Index of the bucket that holds `record_index`, if it was placed.
    #[must_use]
    pub fn bucket_of(&self, record_index: usize) -> Option<usize> {
        self.buckets
            .iter()
            .position(|bucket| bucket.members.contains(&record_index))
    }
}

/// Observed `(min, max)` of `accessor` over `records`; `None` when empty.
#[must_use]
pub fn extent<F>(records: &[Record], accessor: F) -> Option<(f64, f64)>
where
    F: Fn(&Record) -> f64,
{
    records.iter().map(accessor).fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
    })
}

/// Partitions `records` into `count` equal-width buckets over `domain`.
///
/// Zero records yield zero buckets. A degenerate domain (`min == max`) yields
/// one bucket holding every in-domain record. `count == 0` is raised to 1;
/// counts above [`MAX_BUCKETS`] are rejected.
pub fn bin_uniform<F>(
    records: &[Record],
    accessor: F,
    domain: (f64, f64),
    count: usize,
) -> ChartResult<BinnedAxis>
where
    F: Fn(&Record) -> f64,
{
    let (min, max) = validate_domain(domain)?;
    check_bucket_count(count)?;
    if records.is_empty() {
        return Ok(BinnedAxis::default());
    }

    let count = if count == 0 {
        warn!("bucket count 0 requested; using a single bucket");
        1
    } else {
        count
    };
    let count = if min == max { 1 } else { count };

    let width = (max - min) / count as f64;
    let edges: Vec<f64> = (0..count)
        .map(|i| min + i as f64 * width)
        .chain(std::iter::once(max))
        .collect();

    let binned = place_by_edges(records, accessor, &edges);
    debug!(
        buckets = binned.buckets.len(),
        dropped = binned.dropped.len(),
        "binned records uniformly"
    );
    Ok(binned)
}

/// Partitions `records` at explicit interior thresholds over `domain`.
///
/// Thresholds are sorted and deduplicated; those `<= min` or `> max` are
/// removed. Buckets are `[min, t0), [t0, t1), ..., [tk, max]`.
pub fn bin_thresholds<F>(
    records: &[Record],
    accessor: F,
    domain: (f64, f64),
    thresholds: &[f64],
) -> ChartResult<BinnedAxis>
where
    F: Fn(&Record) -> f64,
{
    let (min, max) = validate_domain(domain)?;
    if records.is_empty() {
        return Ok(BinnedAxis::default());
    }

    let mut interior: Vec<f64> = thresholds
        .iter()
        .copied()
        .filter(|t| t.is_finite() && *t > min && *t <= max)
        .collect();
    interior.sort_by_key(|t| OrderedFloat(*t));
    interior.dedup_by_key(|t| OrderedFloat(*t));

    let mut edges = Vec::with_capacity(interior.len() + 2);
    edges.push(min);
    edges.extend(interior);
    edges.push(max);

    let binned = place_by_edges(records, accessor, &edges);
    debug!(
        buckets = binned.buckets.len(),
        dropped = binned.dropped.len(),
        "binned records at thresholds"
    );
    Ok(binned)
}

/// Dispatches to the binning routine selected by `strategy`.
pub fn bin_records<F>(
    records: &[Record],
    accessor: F,
    domain: (f64, f64),
    strategy: &BinningStrategy,
) -> ChartResult<BinnedAxis>
where
    F: Fn(&Record) -> f64,
{
    match strategy {
        BinningStrategy::Uniform { count } => bin_uniform(records, accessor, domain, *count),
        BinningStrategy::NiceTicks { count } => {
            check_bucket_count(*count)?;
            let ticks = nice_ticks(domain.0, domain.1, (*count).max(1));
            bin_thresholds(records, accessor, domain, &ticks)
        }
        BinningStrategy::Thresholds { values } => {
            bin_thresholds(records, accessor, domain, values)
        }
    }
}

fn check_bucket_count(count: usize) -> ChartResult<()> {
    if count > MAX_BUCKETS {
        return Err(ChartError::InvalidData(format!(
            "bucket count {count} exceeds the limit of {MAX_BUCKETS}"
        )));
    }
    Ok(())
}

fn validate_domain(domain: (f64, f64)) -> ChartResult<(f64, f64)> {
    let (min, max) = domain;
    if !min.is_finite() || !max.is_finite() {
        return Err(ChartError::InvalidData(
            "binning domain must be finite".to_owned(),
        ));
    }
    if min > max {
        return Err(ChartError::InvalidData(format!(
            "binning domain is reversed: min={min}, max={max}"
        )));
    }
    Ok((min, max))
}

/// Places records into buckets delimited by ascending `edges`.
///
/// `edges` holds `bucket_count + 1` values; the first and last are the domain
/// bounds. A value sits in the bucket whose lower edge is the greatest edge
/// `<= value`, the domain max sits in the last bucket.
fn place_by_edges<F>(records: &[Record], accessor: F, edges: &[f64]) -> BinnedAxis
where
    F: Fn(&Record) -> f64,
{
    let bucket_count = edges.len().saturating_sub(1).max(1);
    let min = edges[0];
    let max = edges[edges.len() - 1];

    let mut buckets: Vec<Bucket> = (0..bucket_count)
        .map(|i| Bucket {
            x0: edges[i],
            x1: edges.get(i + 1).copied().unwrap_or(max),
            members: Vec::new(),
        })
        .collect();
    let mut dropped = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let value = accessor(record);
        if !value.is_finite() || value < min || value > max {
            dropped.push(index);
            continue;
        }
        // Interior edges are edges[1..bucket_count]; count those <= value.
        let slot = edges[1..bucket_count].partition_point(|edge| *edge <= value);
        buckets[slot].members.push(index);
    }

    if !dropped.is_empty() {
        warn!(
            dropped = dropped.len(),
            "records outside binning domain were not placed"
        );
    }

    BinnedAxis { buckets, dropped }
}

#[cfg(test)]
mod tests {
    use super::{bin_uniform, extent};
    use crate::core::record::Record;

    fn litres(values: &[i64]) -> Vec<Record> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Record::new(format!("c{i}")).with_field("total", *v))
            .collect()
    }

    #[test]
    fn interior_edge_value_belongs_to_upper_bucket() {
        let records = litres(&[0, 5, 10]);
        let binned = bin_uniform(&records, |r| r.value("total") as f64, (0.0, 10.0), 2)
            .expect("bin");
        assert_eq!(binned.buckets[0].members, vec![0]);
        assert_eq!(binned.buckets[1].members, vec![1, 2]);
    }

    #[test]
    fn extent_of_empty_slice_is_none() {
        assert_eq!(extent(&[], |r| r.value("total") as f64), None);
        let records = litres(&[3, 9, 1]);
        assert_eq!(extent(&records, |r| r.value("total") as f64), Some((1.0, 9.0)));
    }
}
