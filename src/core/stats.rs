use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::dataset::Dataset;

/// Min/mean/max of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    pub field: String,
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub mean: f64,
}

/// Summarizes every numeric column of `dataset` in header order.
///
/// Returns an empty vector for an empty dataset. Diagnostic only: nothing in
/// the layout pipeline depends on these values.
#[must_use]
pub fn summarize(dataset: &Dataset) -> Vec<FieldSummary> {
    if dataset.is_empty() {
        return Vec::new();
    }

    dataset
        .columns()
        .iter()
        .map(|field| {
            let mut min = i64::MAX;
            let mut max = i64::MIN;
            let mut sum = 0.0;
            for record in dataset.records() {
                let value = record.value(field);
                min = min.min(value);
                max = max.max(value);
                sum += value as f64;
            }
            let count = dataset.len();
            FieldSummary {
                field: field.clone(),
                count,
                min,
                max,
                mean: sum / count as f64,
            }
        })
        .collect()
}

/// Emits one `debug` event per summary.
pub fn log_summaries(summaries: &[FieldSummary]) {
    for summary in summaries {
        debug!(
            field = summary.field.as_str(),
            count = summary.count,
            min = summary.min,
            max = summary.max,
            mean = summary.mean,
            "dataset field summary"
        );
    }
}
