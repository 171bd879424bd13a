use tracing::{debug, trace};

use crate::core::stats::log_summaries;
use crate::core::{
    BinnedAxis, Dataset, FieldSummary, HistogramLayout, LinearScale, Record, bin_records, extent,
    layout_histogram, summarize,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{DashboardPlugin, PluginEvent};
use crate::interaction::{SelectionController, SelectionOutcome, SelectionSession, SelectionSource};
use crate::render::{PatchSummary, Renderer, Scene, diff_scenes};

use super::{DashboardConfig, DotAnimator, FrameState, PieAnimator, SceneBuilder};

/// Interactive dashboard: binned dot histogram linked to a breakdown donut.
///
/// Owns the dataset, the derived layout, the selection session and the
/// renderer. Every operation takes `&mut self`, so selection changes are
/// serialized; time only advances through [`Dashboard::tick`].
pub struct Dashboard<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: DashboardConfig,
    pub(super) dataset: Dataset,
    pub(super) summaries: Vec<FieldSummary>,
    pub(super) binned: BinnedAxis,
    pub(super) layout: HistogramLayout,
    pub(super) builder: SceneBuilder,
    pub(super) selection: SelectionController,
    pub(super) dots: DotAnimator,
    pub(super) pie: PieAnimator,
    pub(super) last_scene: Option<Scene>,
    pub(super) plugins: Vec<Box<dyn DashboardPlugin>>,
}

impl<R: Renderer> Dashboard<R> {
    /// Binds `dataset`, lays out the histogram and makes the initial random
    /// selection. Nothing is drawn until [`Dashboard::render`].
    pub fn new(renderer: R, config: DashboardConfig, dataset: Dataset) -> ChartResult<Self> {
        Self::with_plugins(renderer, config, dataset, Vec::new())
    }

    /// Like [`Dashboard::new`], with plugins that observe the initial events.
    pub fn with_plugins(
        renderer: R,
        config: DashboardConfig,
        dataset: Dataset,
        plugins: Vec<Box<dyn DashboardPlugin>>,
    ) -> ChartResult<Self> {
        config.validate()?;
        if dataset.key_column() != config.key_column {
            return Err(ChartError::MissingColumn {
                column: config.key_column.clone(),
            });
        }
        if !dataset.is_empty() && !dataset.columns().iter().any(|c| *c == config.axis_field) {
            return Err(ChartError::MissingColumn {
                column: config.axis_field.clone(),
            });
        }

        let summaries = summarize(&dataset);
        log_summaries(&summaries);

        let axis_field = config.axis_field.as_str();
        let accessor = |record: &Record| record.value(axis_field) as f64;
        let domain = extent(dataset.records(), accessor).unwrap_or((0.0, 0.0));
        let binned = bin_records(dataset.records(), accessor, domain, &config.binning)?;

        let plot = config.plot_area()?;
        let axis = LinearScale::new(
            domain,
            (plot.height - config.axis_inset_bottom, config.axis_inset_top),
        )?;
        let layout = layout_histogram(dataset.records(), &binned, &config.categories, plot, axis)?;
        let builder = SceneBuilder::new(&config, plot, axis)?;
        debug!(
            records = dataset.len(),
            buckets = binned.buckets.len(),
            radius = layout.radius,
            "dataset bound"
        );

        let selection = match config.seed {
            Some(seed) => SelectionController::with_seed(seed, config.cooldown_seconds),
            None => SelectionController::new(config.cooldown_seconds),
        };
        let dots = DotAnimator::appear(&layout, dataset.len(), config.timings);

        let mut dashboard = Self {
            renderer,
            config,
            dataset,
            summaries,
            binned,
            layout,
            builder,
            selection,
            dots,
            pie: PieAnimator::new(),
            last_scene: None,
            plugins: Vec::new(),
        };
        for plugin in plugins {
            dashboard.register_plugin(plugin)?;
        }

        dashboard.emit_plugin_event(PluginEvent::DatasetBound {
            records_len: dashboard.dataset.len(),
            issues: dashboard.dataset.report().issues.len(),
        });
        dashboard.surprise(SelectionSource::Initial);
        Ok(dashboard)
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn summaries(&self) -> &[FieldSummary] {
        &self.summaries
    }

    #[must_use]
    pub fn binned(&self) -> &BinnedAxis {
        &self.binned
    }

    #[must_use]
    pub fn layout(&self) -> &HistogramLayout {
        &self.layout
    }

    #[must_use]
    pub fn axis(&self) -> LinearScale {
        self.builder.axis()
    }

    #[must_use]
    pub fn session(&self) -> &SelectionSession {
        self.selection.session()
    }

    /// Key of the selected record.
    #[must_use]
    pub fn selected_key(&self) -> Option<&str> {
        self.session()
            .current()
            .and_then(|index| self.dataset.record(index))
            .map(Record::key)
    }

    /// Every unique key in load order, for the search collaborator.
    #[must_use]
    pub fn search_keys(&self) -> Vec<&str> {
        self.dataset.keys()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Pointer entered the dot of `key`. Ignored while the cooldown is open.
    pub fn pointer_enter(&mut self, key: &str) -> SelectionOutcome {
        if self.session().input_suppressed() {
            trace!(key, "hover suppressed by input cooldown");
            self.emit_plugin_event(PluginEvent::PointerSuppressed {
                key: key.to_owned(),
            });
            return SelectionOutcome::Suppressed;
        }
        self.select_key(key, SelectionSource::Hover)
    }

    /// Pointer clicked the dot of `key`; selects it and opens the cooldown.
    pub fn pointer_click(&mut self, key: &str) -> SelectionOutcome {
        self.select_key(key, SelectionSource::Click)
    }

    /// Selection requested by the search collaborator.
    pub fn search_select(&mut self, key: &str) -> SelectionOutcome {
        let was_cooling = self.session().input_suppressed();
        let outcome = self
            .selection
            .select_by_key(&self.dataset, &self.config.categories, key);
        if outcome == SelectionOutcome::NotFound {
            self.emit_plugin_event(PluginEvent::SelectionNotFound {
                key: key.to_owned(),
            });
        }
        self.apply_outcome(outcome, SelectionSource::Search, was_cooling);
        outcome
    }

    /// "Surprise me": uniform random pick.
    pub fn surprise_me(&mut self) -> SelectionOutcome {
        self.surprise(SelectionSource::Random)
    }

    /// Advances every transition and the cooldown clock.
    pub fn tick(&mut self, delta_seconds: f64) {
        let delta_seconds = if delta_seconds.is_finite() {
            delta_seconds.max(0.0)
        } else {
            0.0
        };
        if self.selection.tick(delta_seconds) {
            self.emit_plugin_event(PluginEvent::CooldownEnded);
        }
        self.dots.tick(delta_seconds);
        self.pie.tick(delta_seconds);
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.dots.is_animating() || self.pie.is_animating()
    }

    /// Full desired scene for the current state.
    #[must_use]
    pub fn scene(&self) -> Scene {
        self.builder.build(
            &self.config,
            &FrameState {
                dataset: &self.dataset,
                layout: &self.layout,
                session: self.selection.session(),
                dots: &self.dots,
                pie: &self.pie,
            },
        )
    }

    /// Diffs the current scene against the last rendered one and hands the
    /// patch to the renderer.
    pub fn render(&mut self) -> ChartResult<PatchSummary> {
        let scene = self.scene();
        let patch = diff_scenes(self.last_scene.as_ref(), &scene);
        let summary = patch.summary();
        if !patch.is_empty() || self.last_scene.is_none() {
            self.renderer.render(&patch)?;
        }
        trace!(
            inserted = summary.inserted,
            updated = summary.updated,
            removed = summary.removed,
            "scene patch rendered"
        );
        self.last_scene = Some(scene);
        self.emit_plugin_event(PluginEvent::Rendered { summary });
        Ok(summary)
    }

    fn select_key(&mut self, key: &str, source: SelectionSource) -> SelectionOutcome {
        let Some(index) = self.dataset.position(key) else {
            debug!(key, ?source, "selection key not found");
            self.emit_plugin_event(PluginEvent::SelectionNotFound {
                key: key.to_owned(),
            });
            return SelectionOutcome::NotFound;
        };
        let was_cooling = self.session().input_suppressed();
        let outcome = self
            .selection
            .select(&self.dataset, &self.config.categories, index, source);
        self.apply_outcome(outcome, source, was_cooling);
        outcome
    }

    fn surprise(&mut self, source: SelectionSource) -> SelectionOutcome {
        let was_cooling = self.session().input_suppressed();
        let outcome = self
            .selection
            .select_random(&self.dataset, &self.config.categories, source);
        self.apply_outcome(outcome, source, was_cooling);
        outcome
    }

    fn apply_outcome(
        &mut self,
        outcome: SelectionOutcome,
        source: SelectionSource,
        was_cooling: bool,
    ) {
        if !was_cooling && self.session().input_suppressed() {
            self.emit_plugin_event(PluginEvent::CooldownStarted {
                seconds: self.selection.cooldown_seconds(),
            });
        }

        let SelectionOutcome::Changed { current, .. } = outcome else {
            return;
        };
        self.dots.set_active(current, self.config.timings);
        if let Some(breakdown) = self.selection.session().breakdown() {
            self.pie
                .apply_breakdown(breakdown, self.config.fallback_policy, self.config.timings);
        }
        if let Some(key) = self.dataset.record(current).map(|r| r.key().to_owned()) {
            self.emit_plugin_event(PluginEvent::SelectionChanged { key, source });
        }
    }
}
