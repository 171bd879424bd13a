use tracing::trace;

use crate::animation::{Easing, Transition, TransitionSpec};
use crate::core::{ArcAngles, CategoryBreakdown, FallbackLabelPolicy, pie_angles};

use super::TransitionTimings;

#[derive(Debug, Clone)]
struct SliceState {
    field: String,
    color: String,
    text: String,
    angles: Transition<ArcAngles>,
    opacity: Transition<f64>,
    label_angles: Transition<ArcAngles>,
    label_opacity: Transition<f64>,
}

/// Interpolated state of one slice, its label and leader at the current tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceFrame {
    pub field: String,
    pub color: String,
    /// Value text, or the fallback label for zero values.
    pub text: String,
    pub angles: ArcAngles,
    pub opacity: f64,
    pub label_angles: ArcAngles,
    pub label_opacity: f64,
}

/// Transition state of the donut chart.
///
/// Slices stay keyed by category field across selections, so a new
/// breakdown retargets existing slices instead of replacing them.
#[derive(Debug, Clone, Default)]
pub struct PieAnimator {
    slices: Vec<SliceState>,
    total: i64,
}

impl PieAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `false` until the first breakdown arrives.
    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.slices.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn apply_breakdown(
        &mut self,
        breakdown: &CategoryBreakdown,
        policy: FallbackLabelPolicy,
        timings: TransitionTimings,
    ) {
        let values: Vec<i64> = breakdown.entries.iter().map(|entry| entry.value).collect();
        let targets = pie_angles(&values);
        let texts = breakdown.display_values(policy);
        self.total = breakdown.total();

        let label_fade = TransitionSpec::new(timings.label_fade_in, Easing::Linear)
            .with_delay(timings.label_delay + timings.label_tween);

        let same_shape = self.slices.len() == breakdown.entries.len()
            && self
                .slices
                .iter()
                .zip(&breakdown.entries)
                .all(|(slice, entry)| slice.field == entry.field);

        if !same_shape {
            trace!(slices = targets.len(), "pie slices entering");
            self.slices = breakdown
                .entries
                .iter()
                .zip(targets)
                .zip(texts)
                .map(|((entry, target), text)| {
                    let mut opacity = Transition::new(0.0);
                    opacity.animate_to(
                        1.0,
                        TransitionSpec::new(timings.slice_fade_in, Easing::Linear),
                    );
                    let mut label_opacity = Transition::new(0.0);
                    label_opacity.animate_from_to(0.0, 1.0, label_fade);
                    SliceState {
                        field: entry.field.clone(),
                        color: entry.color.clone(),
                        text,
                        angles: Transition::new(target),
                        opacity,
                        label_angles: Transition::new(target),
                        label_opacity,
                    }
                })
                .collect();
            return;
        }

        let slice_spec = TransitionSpec::new(timings.slice_tween, Easing::CubicInOut);
        let label_spec = TransitionSpec::new(timings.label_tween, Easing::CubicInOut)
            .with_delay(timings.label_delay);
        for ((slice, target), text) in self.slices.iter_mut().zip(targets).zip(texts) {
            slice.angles.animate_to(target, slice_spec);
            slice.label_angles.animate_to(target, label_spec);
            // Labels blink out and fade back in on every selection.
            slice.label_opacity.animate_from_to(0.0, 1.0, label_fade);
            slice.text = text;
        }
    }

    /// Advances every transition by `delta_seconds`.
    pub fn tick(&mut self, delta_seconds: f64) {
        for slice in &mut self.slices {
            slice.angles.tick(delta_seconds);
            slice.opacity.tick(delta_seconds);
            slice.label_angles.tick(delta_seconds);
            slice.label_opacity.tick(delta_seconds);
        }
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.slices.iter().any(|slice| {
            slice.angles.is_animating()
                || slice.opacity.is_animating()
                || slice.label_angles.is_animating()
                || slice.label_opacity.is_animating()
        })
    }

    #[must_use]
    pub fn frames(&self) -> Vec<SliceFrame> {
        self.slices
            .iter()
            .map(|slice| SliceFrame {
                field: slice.field.clone(),
                color: slice.color.clone(),
                text: slice.text.clone(),
                angles: slice.angles.value(),
                opacity: slice.opacity.value(),
                label_angles: slice.label_angles.value(),
                label_opacity: slice.label_opacity.value(),
            })
            .collect()
    }

    /// Final slice angles once every transition settled.
    #[must_use]
    pub fn target_angles(&self) -> Vec<ArcAngles> {
        self.slices.iter().map(|slice| slice.angles.target()).collect()
    }
}
