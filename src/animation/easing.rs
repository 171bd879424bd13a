use serde::{Deserialize, Serialize};

/// Timing curves used by dashboard transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Cubic ease-in-out, the default for tweens.
    #[default]
    CubicInOut,
    /// Overshoots past the target before settling; larger `overshoot`
    /// means a stronger bounce.
    BackOut { overshoot: f64 },
}

impl Easing {
    /// Maps linear progress `t` to eased progress. `t` is clamped to `[0, 1]`
    /// and the endpoints are always exact.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }

        match self {
            Self::Linear => t,
            Self::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let u = t2 - 2.0;
                    (u * u * u + 2.0) / 2.0
                }
            }
            Self::BackOut { overshoot } => {
                let u = t - 1.0;
                u * u * ((overshoot + 1.0) * u + overshoot) + 1.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::Easing;

    #[test]
    fn endpoints_are_exact_for_every_curve() {
        for easing in [
            Easing::Linear,
            Easing::CubicInOut,
            Easing::BackOut { overshoot: 15.0 },
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
    }

    #[test]
    fn cubic_in_out_is_symmetric_at_midpoint() {
        assert_abs_diff_eq!(Easing::CubicInOut.apply(0.5), 0.5, epsilon = 1e-12);
        assert!(Easing::CubicInOut.apply(0.25) < 0.25);
    }

    #[test]
    fn back_out_overshoots_target() {
        let peak = (1..100)
            .map(|i| Easing::BackOut { overshoot: 15.0 }.apply(f64::from(i) / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }
}
