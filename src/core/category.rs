use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::record::Record;
use crate::error::{ChartError, ChartResult};

/// Sentinel shown for every breakdown entry when a record has no servings.
pub const NO_DRINKS_LABEL: &str = "no drinks";
/// Sentinel shown for an individual zero entry under `PerZeroEntry`.
pub const NONE_LABEL: &str = "none";

/// One numeric field compared when resolving a record's dominant category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub field: String,
    pub label: String,
    /// `#RRGGBB` fill color.
    pub color: String,
}

impl Category {
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        label: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            color: color.into(),
        }
    }
}

/// Fixed, ordered category list plus the fallback used for "no category".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    pub categories: Vec<Category>,
    #[serde(default = "default_fallback_label")]
    pub fallback_label: String,
    #[serde(default = "default_fallback_color")]
    pub fallback_color: String,
}

fn default_fallback_label() -> String {
    "no drink".to_owned()
}

fn default_fallback_color() -> String {
    "#808080".to_owned()
}

impl Default for CategorySet {
    fn default() -> Self {
        Self {
            categories: vec![
                Category::new("beer_servings", "beer", "#FDBF6F"),
                Category::new("wine_servings", "wine", "#E7298A"),
                Category::new("spirit_servings", "spirit", "#00BEFF"),
            ],
            fallback_label: default_fallback_label(),
            fallback_color: default_fallback_color(),
        }
    }
}

impl CategorySet {
    pub fn validate(&self) -> ChartResult<()> {
        if self.categories.is_empty() {
            return Err(ChartError::InvalidData(
                "category set must contain at least one category".to_owned(),
            ));
        }
        for (i, category) in self.categories.iter().enumerate() {
            if category.field.is_empty() || category.label.is_empty() {
                return Err(ChartError::InvalidData(format!(
                    "category #{i} must have a non-empty field and label"
                )));
            }
            if self.categories[..i]
                .iter()
                .any(|other| other.field == category.field)
            {
                return Err(ChartError::InvalidData(format!(
                    "category field `{}` is listed twice",
                    category.field
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    #[must_use]
    pub fn label_of(&self, dominant: DominantCategory) -> &str {
        match dominant {
            DominantCategory::Category(index) => self
                .categories
                .get(index)
                .map_or(self.fallback_label.as_str(), |c| c.label.as_str()),
            DominantCategory::None => &self.fallback_label,
        }
    }

    #[must_use]
    pub fn color_of(&self, dominant: DominantCategory) -> &str {
        match dominant {
            DominantCategory::Category(index) => self
                .categories
                .get(index)
                .map_or(self.fallback_color.as_str(), |c| c.color.as_str()),
            DominantCategory::None => &self.fallback_color,
        }
    }
}

/// The category holding a record's largest value, by position in the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DominantCategory {
    Category(usize),
    None,
}

/// Resolves the dominant category of `record`.
///
/// Scans left to right and only replaces the running best on a strictly
/// greater value, so ties go to the category listed first. Returns `None`
/// when no category value is positive.
#[must_use]
pub fn dominant_category(record: &Record, categories: &CategorySet) -> DominantCategory {
    let mut best: Option<(usize, i64)> = None;
    for (index, category) in categories.categories.iter().enumerate() {
        let value = record.value(&category.field);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((index, value)),
        }
    }

    match best {
        Some((index, value)) if value > 0 => DominantCategory::Category(index),
        _ => DominantCategory::None,
    }
}

/// How zero values are labeled in the breakdown presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FallbackLabelPolicy {
    /// Every entry shows [`NO_DRINKS_LABEL`] when all values are zero.
    #[default]
    WhenAllZero,
    /// Each zero entry shows [`NONE_LABEL`] individually.
    PerZeroEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub field: String,
    pub label: String,
    pub color: String,
    pub value: i64,
}

/// Per-category values of one record, in fixed category order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub key: String,
    pub entries: SmallVec<[BreakdownEntry; 4]>,
}

impl CategoryBreakdown {
    #[must_use]
    pub fn from_record(record: &Record, categories: &CategorySet) -> Self {
        Self {
            key: record.key().to_owned(),
            entries: categories
                .categories
                .iter()
                .map(|category| BreakdownEntry {
                    field: category.field.clone(),
                    label: category.label.clone(),
                    color: category.color.clone(),
                    value: record.value(&category.field),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.entries.iter().map(|entry| entry.value).sum()
    }

    #[must_use]
    pub fn is_all_zero(&self) -> bool {
        self.entries.iter().all(|entry| entry.value == 0)
    }

    /// Display text for each entry, in entry order.
    ///
    /// Stored values are never altered; only the presentation substitutes the
    /// sentinel labels.
    #[must_use]
    pub fn display_values(&self, policy: FallbackLabelPolicy) -> Vec<String> {
        match policy {
            FallbackLabelPolicy::WhenAllZero if self.is_all_zero() => {
                vec![NO_DRINKS_LABEL.to_owned(); self.entries.len()]
            }
            FallbackLabelPolicy::WhenAllZero => self
                .entries
                .iter()
                .map(|entry| entry.value.to_string())
                .collect(),
            FallbackLabelPolicy::PerZeroEntry => self
                .entries
                .iter()
                .map(|entry| {
                    if entry.value == 0 {
                        NONE_LABEL.to_owned()
                    } else {
                        entry.value.to_string()
                    }
                })
                .collect(),
        }
    }
}
