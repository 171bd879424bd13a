use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::core::ArcAngles;

/// Values a transition can blend between.
pub trait Interpolate: Copy {
    fn interpolate(self, to: Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for (f64, f64) {
    fn interpolate(self, to: Self, t: f64) -> Self {
        (self.0.interpolate(to.0, t), self.1.interpolate(to.1, t))
    }
}

impl Interpolate for ArcAngles {
    fn interpolate(self, to: Self, t: f64) -> Self {
        ArcAngles::new(
            self.start.interpolate(to.start, t),
            self.end.interpolate(to.end, t),
        )
    }
}

/// Delay, duration (seconds) and easing of one transition run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub delay: f64,
    pub duration: f64,
    pub easing: Easing,
}

impl TransitionSpec {
    #[must_use]
    pub const fn new(duration: f64, easing: Easing) -> Self {
        Self {
            delay: 0.0,
            duration,
            easing,
        }
    }

    #[must_use]
    pub const fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    fn is_instant(self) -> bool {
        self.delay <= 0.0 && self.duration <= 0.0
    }

    fn total(self) -> f64 {
        self.delay.max(0.0) + self.duration.max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionState<T> {
    Idle {
        value: T,
    },
    Animating {
        from: T,
        to: T,
        elapsed: f64,
        spec: TransitionSpec,
    },
}

/// Per-element `Idle -> Animating(target) -> Idle` state machine.
///
/// Time only moves through [`Transition::tick`]. Retargeting while animating
/// restarts from the currently displayed value, so the last target wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<T> {
    state: TransitionState<T>,
}

impl<T: Interpolate + PartialEq> Transition<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            state: TransitionState::Idle { value },
        }
    }

    #[must_use]
    pub fn state(&self) -> TransitionState<T> {
        self.state
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.state, TransitionState::Animating { .. })
    }

    /// Value to draw right now.
    #[must_use]
    pub fn value(&self) -> T {
        match self.state {
            TransitionState::Idle { value } => value,
            TransitionState::Animating {
                from,
                to,
                elapsed,
                spec,
            } => {
                let active = elapsed - spec.delay.max(0.0);
                if active <= 0.0 {
                    return from;
                }
                let progress = if spec.duration <= 0.0 {
                    1.0
                } else {
                    active / spec.duration
                };
                from.interpolate(to, spec.easing.apply(progress))
            }
        }
    }

    /// Value the element settles on once idle.
    #[must_use]
    pub fn target(&self) -> T {
        match self.state {
            TransitionState::Idle { value } => value,
            TransitionState::Animating { to, .. } => to,
        }
    }

    pub fn set_immediate(&mut self, value: T) {
        self.state = TransitionState::Idle { value };
    }

    /// Starts animating from the current value towards `to`.
    ///
    /// Idle elements already showing `to` stay idle.
    pub fn animate_to(&mut self, to: T, spec: TransitionSpec) {
        if let TransitionState::Idle { value } = self.state {
            if value == to {
                return;
            }
        }
        let from = self.value();
        self.start(from, to, spec);
    }

    /// Starts animating from an explicit `from`, discarding the current value.
    pub fn animate_from_to(&mut self, from: T, to: T, spec: TransitionSpec) {
        self.start(from, to, spec);
    }

    fn start(&mut self, from: T, to: T, spec: TransitionSpec) {
        self.state = if spec.is_instant() {
            TransitionState::Idle { value: to }
        } else {
            TransitionState::Animating {
                from,
                to,
                elapsed: 0.0,
                spec,
            }
        };
    }

    /// Advances the clock; returns `true` when this tick finished the run.
    pub fn tick(&mut self, delta_seconds: f64) -> bool {
        let TransitionState::Animating {
            from,
            to,
            elapsed,
            spec,
        } = self.state
        else {
            return false;
        };

        let elapsed = elapsed + delta_seconds.max(0.0);
        if elapsed >= spec.total() {
            self.state = TransitionState::Idle { value: to };
            return true;
        }

        self.state = TransitionState::Animating {
            from,
            to,
            elapsed,
            spec,
        };
        false
    }
}
