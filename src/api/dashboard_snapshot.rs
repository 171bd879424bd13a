use serde::{Deserialize, Serialize};

use crate::core::{CategoryBreakdown, FieldSummary, LoadReport, Viewport, dominant_category};
use crate::render::Renderer;

use super::Dashboard;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSnapshot {
    pub x0: f64,
    pub x1: f64,
    /// Member keys in in-bucket order.
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotSnapshot {
    pub key: String,
    pub bucket: usize,
    pub index: usize,
    /// Dominant category label, or the fallback label.
    pub category: String,
    pub cx: f64,
    pub cy: f64,
}

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub viewport: Viewport,
    pub records_len: usize,
    pub axis_domain: (f64, f64),
    pub radius: f64,
    pub buckets: Vec<BucketSnapshot>,
    pub dropped_keys: Vec<String>,
    pub dots: Vec<DotSnapshot>,
    pub selected_key: Option<String>,
    pub breakdown: Option<CategoryBreakdown>,
    /// Breakdown values as displayed, fallback labels applied.
    pub display_values: Vec<String>,
    pub favorite: Option<String>,
    pub input_suppressed: bool,
    pub cooldown_remaining_seconds: f64,
    pub animating: bool,
    pub load_report: LoadReport,
    pub summaries: Vec<FieldSummary>,
}

impl<R: Renderer> Dashboard<R> {
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        let key_of = |index: usize| {
            self.dataset
                .record(index)
                .map(|record| record.key().to_owned())
                .unwrap_or_default()
        };
        let categories = &self.config.categories;
        let session = self.session();
        let breakdown = session.breakdown().cloned();

        DashboardSnapshot {
            viewport: self.config.viewport,
            records_len: self.dataset.len(),
            axis_domain: self.axis().domain(),
            radius: self.layout.radius,
            buckets: self
                .binned
                .buckets
                .iter()
                .map(|bucket| BucketSnapshot {
                    x0: bucket.x0,
                    x1: bucket.x1,
                    keys: bucket.members.iter().map(|index| key_of(*index)).collect(),
                })
                .collect(),
            dropped_keys: self.binned.dropped.iter().map(|index| key_of(*index)).collect(),
            dots: self
                .layout
                .positioned
                .iter()
                .map(|entry| DotSnapshot {
                    key: key_of(entry.record),
                    bucket: entry.bucket,
                    index: entry.index,
                    category: categories.label_of(entry.dominant).to_owned(),
                    cx: entry.cx,
                    cy: entry.cy,
                })
                .collect(),
            selected_key: self.selected_key().map(str::to_owned),
            display_values: breakdown
                .as_ref()
                .map(|b| b.display_values(self.config.fallback_policy))
                .unwrap_or_default(),
            breakdown,
            favorite: session
                .current()
                .and_then(|index| self.dataset.record(index))
                .map(|record| {
                    categories
                        .label_of(dominant_category(record, categories))
                        .to_owned()
                }),
            input_suppressed: session.input_suppressed(),
            cooldown_remaining_seconds: session.cooldown().remaining_seconds(),
            animating: self.is_animating(),
            load_report: self.dataset.report().clone(),
            summaries: self.summaries.clone(),
        }
    }
}
