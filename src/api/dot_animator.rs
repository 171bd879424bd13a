use std::collections::BTreeMap;

use crate::animation::{Easing, Transition, TransitionSpec};
use crate::core::HistogramLayout;

use super::TransitionTimings;

/// Appearance and highlight transitions of the histogram dots.
///
/// Opacity is indexed by dataset record. Only dots with a visible or
/// animating outline keep a stroke entry.
#[derive(Debug, Clone, Default)]
pub struct DotAnimator {
    opacity: Vec<Transition<f64>>,
    stroke: BTreeMap<usize, Transition<f64>>,
    active: Option<usize>,
}

impl DotAnimator {
    /// Every binned dot fades in, staggered by its index inside the bucket.
    #[must_use]
    pub fn appear(
        layout: &HistogramLayout,
        records_len: usize,
        timings: TransitionTimings,
    ) -> Self {
        let mut opacity = vec![Transition::new(1.0); records_len];
        for entry in &layout.positioned {
            if let Some(slot) = opacity.get_mut(entry.record) {
                let spec = TransitionSpec::new(timings.dot_fade_in, Easing::Linear)
                    .with_delay(entry.index as f64 * timings.dot_stagger);
                slot.animate_from_to(0.0, 1.0, spec);
            }
        }
        Self {
            opacity,
            stroke: BTreeMap::new(),
            active: None,
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Moves the highlight outline to `record`.
    pub fn set_active(&mut self, record: usize, timings: TransitionTimings) {
        if self.active == Some(record) {
            return;
        }
        if let Some(previous) = self.active.replace(record) {
            if let Some(stroke) = self.stroke.get_mut(&previous) {
                stroke.animate_to(0.0, TransitionSpec::new(timings.stroke_out, Easing::Linear));
            }
        }
        let easing = Easing::BackOut {
            overshoot: timings.stroke_overshoot,
        };
        self.stroke
            .entry(record)
            .or_insert_with(|| Transition::new(0.0))
            .animate_to(
                timings.active_stroke_width,
                TransitionSpec::new(timings.stroke_in, easing),
            );
    }

    pub fn tick(&mut self, delta_seconds: f64) {
        for opacity in &mut self.opacity {
            opacity.tick(delta_seconds);
        }
        for stroke in self.stroke.values_mut() {
            stroke.tick(delta_seconds);
        }
        let active = self.active;
        self.stroke.retain(|record, stroke| {
            Some(*record) == active || stroke.is_animating() || stroke.value() > 0.0
        });
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.opacity.iter().any(Transition::is_animating)
            || self.stroke.values().any(Transition::is_animating)
    }

    #[must_use]
    pub fn opacity(&self, record: usize) -> f64 {
        self.opacity.get(record).map_or(1.0, Transition::value)
    }

    /// Outline width; back-out easing may briefly overshoot below zero,
    /// which is clamped.
    #[must_use]
    pub fn stroke_width(&self, record: usize) -> f64 {
        self.stroke
            .get(&record)
            .map_or(0.0, |stroke| stroke.value().max(0.0))
    }
}
