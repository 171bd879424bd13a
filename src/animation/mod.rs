//! Explicit transition state machines driven by a single tick clock.

mod easing;
mod transition;

pub use easing::Easing;
pub use transition::{Interpolate, Transition, TransitionSpec, TransitionState};
