use serde::{Deserialize, Serialize};

use crate::core::{
    BinningStrategy, CategorySet, DEFAULT_KEY_COLUMN, FallbackLabelPolicy, Margins, PieGeometry,
    PlotArea, Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::DEFAULT_COOLDOWN_SECONDS;

/// Durations (seconds) and stroke parameters of dashboard transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionTimings {
    #[serde(default = "default_slice_tween")]
    pub slice_tween: f64,
    #[serde(default = "default_slice_fade_in")]
    pub slice_fade_in: f64,
    #[serde(default = "default_label_delay")]
    pub label_delay: f64,
    #[serde(default = "default_label_tween")]
    pub label_tween: f64,
    #[serde(default = "default_label_fade_in")]
    pub label_fade_in: f64,
    #[serde(default = "default_stroke_in")]
    pub stroke_in: f64,
    #[serde(default = "default_stroke_out")]
    pub stroke_out: f64,
    #[serde(default = "default_stroke_overshoot")]
    pub stroke_overshoot: f64,
    #[serde(default = "default_active_stroke_width")]
    pub active_stroke_width: f64,
    #[serde(default = "default_dot_fade_in")]
    pub dot_fade_in: f64,
    /// Extra delay per in-bucket index before a dot fades in.
    #[serde(default = "default_dot_stagger")]
    pub dot_stagger: f64,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            slice_tween: default_slice_tween(),
            slice_fade_in: default_slice_fade_in(),
            label_delay: default_label_delay(),
            label_tween: default_label_tween(),
            label_fade_in: default_label_fade_in(),
            stroke_in: default_stroke_in(),
            stroke_out: default_stroke_out(),
            stroke_overshoot: default_stroke_overshoot(),
            active_stroke_width: default_active_stroke_width(),
            dot_fade_in: default_dot_fade_in(),
            dot_stagger: default_dot_stagger(),
        }
    }
}

impl TransitionTimings {
    /// Every timing collapsed to zero, so each change lands on the next tick.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            slice_tween: 0.0,
            slice_fade_in: 0.0,
            label_delay: 0.0,
            label_tween: 0.0,
            label_fade_in: 0.0,
            stroke_in: 0.0,
            stroke_out: 0.0,
            dot_fade_in: 0.0,
            dot_stagger: 0.0,
            ..Self::default()
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (name, value) in [
            ("slice_tween", self.slice_tween),
            ("slice_fade_in", self.slice_fade_in),
            ("label_delay", self.label_delay),
            ("label_tween", self.label_tween),
            ("label_fade_in", self.label_fade_in),
            ("stroke_in", self.stroke_in),
            ("stroke_out", self.stroke_out),
            ("stroke_overshoot", self.stroke_overshoot),
            ("active_stroke_width", self.active_stroke_width),
            ("dot_fade_in", self.dot_fade_in),
            ("dot_stagger", self.dot_stagger),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "transition timing `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// Font sizes in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    #[serde(default = "default_tick_font_px")]
    pub tick_px: f64,
    #[serde(default = "default_title_font_px")]
    pub title_px: f64,
    #[serde(default = "default_title_font_px")]
    pub label_px: f64,
    #[serde(default = "default_value_font_px")]
    pub value_px: f64,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            tick_px: default_tick_font_px(),
            title_px: default_title_font_px(),
            label_px: default_title_font_px(),
            value_px: default_value_font_px(),
        }
    }
}

/// Public dashboard bootstrap configuration.
///
/// Serializable so host applications can persist and load a dashboard setup.
/// Every field has a default matching the reference dashboard, so `{}` is a
/// valid configuration. Positions are relative to the plot origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default = "default_key_column")]
    pub key_column: String,
    /// Numeric field the histogram bins on.
    #[serde(default = "default_axis_field")]
    pub axis_field: String,
    #[serde(default)]
    pub binning: BinningStrategy,
    #[serde(default)]
    pub categories: CategorySet,
    #[serde(default)]
    pub fallback_policy: FallbackLabelPolicy,
    #[serde(default = "default_dot_gap_px")]
    pub dot_gap_px: f64,
    #[serde(default = "default_axis_inset_top")]
    pub axis_inset_top: f64,
    #[serde(default = "default_axis_inset_bottom")]
    pub axis_inset_bottom: f64,
    #[serde(default = "default_axis_tick_count")]
    pub axis_tick_count: usize,
    #[serde(default = "default_axis_title")]
    pub axis_title: String,
    #[serde(default = "default_row_title")]
    pub row_title: String,
    #[serde(default)]
    pub pie: PieGeometry,
    /// Distance of the pie center from the right edge of the plot.
    #[serde(default = "default_pie_right_inset")]
    pub pie_right_inset: f64,
    #[serde(default = "default_pie_top")]
    pub pie_top: f64,
    /// Vertical offset of the favorite block below the pie center.
    #[serde(default = "default_favorite_offset")]
    pub favorite_offset: f64,
    #[serde(default = "default_legend_origin")]
    pub legend_origin: (f64, f64),
    #[serde(default = "default_legend_row_spacing")]
    pub legend_row_spacing: f64,
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: f64,
    #[serde(default)]
    pub timings: TransitionTimings,
    #[serde(default)]
    pub typography: Typography,
    /// Fixed seed for random picks; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::new(default_viewport())
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            margins: Margins::default(),
            key_column: default_key_column(),
            axis_field: default_axis_field(),
            binning: BinningStrategy::default(),
            categories: CategorySet::default(),
            fallback_policy: FallbackLabelPolicy::default(),
            dot_gap_px: default_dot_gap_px(),
            axis_inset_top: default_axis_inset_top(),
            axis_inset_bottom: default_axis_inset_bottom(),
            axis_tick_count: default_axis_tick_count(),
            axis_title: default_axis_title(),
            row_title: default_row_title(),
            pie: PieGeometry::default(),
            pie_right_inset: default_pie_right_inset(),
            pie_top: default_pie_top(),
            favorite_offset: default_favorite_offset(),
            legend_origin: default_legend_origin(),
            legend_row_spacing: default_legend_row_spacing(),
            cooldown_seconds: default_cooldown_seconds(),
            timings: TransitionTimings::default(),
            typography: Typography::default(),
            seed: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_binning(mut self, binning: BinningStrategy) -> Self {
        self.binning = binning;
        self
    }

    #[must_use]
    pub fn with_fallback_policy(mut self, policy: FallbackLabelPolicy) -> Self {
        self.fallback_policy = policy;
        self
    }

    #[must_use]
    pub fn with_timings(mut self, timings: TransitionTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Plot region left after the margins.
    pub fn plot_area(&self) -> ChartResult<PlotArea> {
        PlotArea::from_viewport(self.viewport, self.margins)
    }

    /// Pie center relative to the plot origin.
    pub fn pie_center(&self) -> ChartResult<(f64, f64)> {
        let plot = self.plot_area()?;
        Ok((plot.width - self.pie_right_inset, self.pie_top))
    }

    pub fn validate(&self) -> ChartResult<()> {
        let plot = self.plot_area()?;
        if self.key_column.is_empty() || self.axis_field.is_empty() {
            return Err(ChartError::InvalidData(
                "key column and axis field must not be empty".to_owned(),
            ));
        }
        if self.key_column == self.axis_field {
            return Err(ChartError::InvalidData(
                "axis field must differ from the key column".to_owned(),
            ));
        }
        self.categories.validate()?;
        self.pie.validate()?;
        self.timings.validate()?;

        for (name, value) in [
            ("dot_gap_px", self.dot_gap_px),
            ("axis_inset_top", self.axis_inset_top),
            ("axis_inset_bottom", self.axis_inset_bottom),
            ("cooldown_seconds", self.cooldown_seconds),
            ("legend_row_spacing", self.legend_row_spacing),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        if self.axis_inset_top + self.axis_inset_bottom >= plot.height {
            return Err(ChartError::InvalidData(
                "axis insets leave no vertical range".to_owned(),
            ));
        }
        for (name, value) in [
            ("pie_right_inset", self.pie_right_inset),
            ("pie_top", self.pie_top),
            ("favorite_offset", self.favorite_offset),
            ("legend_origin.x", self.legend_origin.0),
            ("legend_origin.y", self.legend_origin.1),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!("`{name}` must be finite")));
            }
        }
        let typography = self.typography;
        for (name, value) in [
            ("tick_px", typography.tick_px),
            ("title_px", typography.title_px),
            ("label_px", typography.label_px),
            ("value_px", typography.value_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "font size `{name}` must be finite and > 0"
                )));
            }
        }
        self.binning.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_viewport() -> Viewport {
    Viewport::new(1120, 500)
}

fn default_key_column() -> String {
    DEFAULT_KEY_COLUMN.to_owned()
}

fn default_axis_field() -> String {
    "total_litres_of_pure_alcohol".to_owned()
}

fn default_dot_gap_px() -> f64 {
    5.0
}

fn default_axis_inset_top() -> f64 {
    20.0
}

fn default_axis_inset_bottom() -> f64 {
    30.0
}

fn default_axis_tick_count() -> usize {
    14
}

fn default_axis_title() -> String {
    "litres of pure alcohol / year \u{27f6}".to_owned()
}

fn default_row_title() -> String {
    "each row sorted by country name \u{27f6}".to_owned()
}

fn default_pie_right_inset() -> f64 {
    150.0
}

fn default_pie_top() -> f64 {
    160.0
}

fn default_favorite_offset() -> f64 {
    170.0
}

fn default_legend_origin() -> (f64, f64) {
    (550.0, 120.0)
}

fn default_legend_row_spacing() -> f64 {
    20.0
}

fn default_cooldown_seconds() -> f64 {
    DEFAULT_COOLDOWN_SECONDS
}

fn default_slice_tween() -> f64 {
    0.6
}

fn default_slice_fade_in() -> f64 {
    0.4
}

fn default_label_delay() -> f64 {
    0.14
}

fn default_label_tween() -> f64 {
    0.6
}

fn default_label_fade_in() -> f64 {
    0.13
}

fn default_stroke_in() -> f64 {
    0.4
}

fn default_stroke_out() -> f64 {
    0.05
}

fn default_stroke_overshoot() -> f64 {
    15.0
}

fn default_active_stroke_width() -> f64 {
    4.0
}

fn default_dot_fade_in() -> f64 {
    0.25
}

fn default_dot_stagger() -> f64 {
    0.01
}

fn default_tick_font_px() -> f64 {
    11.0
}

fn default_title_font_px() -> f64 {
    14.0
}

fn default_value_font_px() -> f64 {
    20.0
}
