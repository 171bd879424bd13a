use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Angular extent of one slice.
///
/// Angles are in radians, `0` at twelve o'clock, increasing clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArcAngles {
    pub start: f64,
    pub end: f64,
}

impl ArcAngles {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn mid(self) -> f64 {
        self.start + (self.end - self.start) / 2.0
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }
}

/// Proportional slice angles for `values`, kept in input order.
///
/// Slices run from `0` to `TAU`. Negative values count as zero. A zero total
/// collapses every slice at angle `0`.
#[must_use]
pub fn pie_angles(values: &[i64]) -> Vec<ArcAngles> {
    let total: f64 = values.iter().map(|v| (*v).max(0) as f64).sum();
    let k = if total > 0.0 { TAU / total } else { 0.0 };

    let mut cursor = 0.0;
    values
        .iter()
        .map(|value| {
            let start = cursor;
            cursor += (*value).max(0) as f64 * k;
            ArcAngles::new(start, cursor)
        })
        .collect()
}

/// Radii of the donut, the label ring and the leader line end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PieGeometry {
    pub radius: f64,
    pub inner_ratio: f64,
    pub outer_ratio: f64,
    pub label_ratio: f64,
    pub leader_ratio: f64,
}

impl Default for PieGeometry {
    fn default() -> Self {
        Self {
            radius: 120.0,
            inner_ratio: 0.6,
            outer_ratio: 0.8,
            label_ratio: 0.9,
            leader_ratio: 0.95,
        }
    }
}

/// Where a slice label and its leader polyline go, relative to the pie center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub anchor: (f64, f64),
    /// `true` when the label sits right of the center and grows rightwards.
    pub right_side: bool,
    pub leader: [(f64, f64); 3],
}

impl PieGeometry {
    pub fn validate(self) -> ChartResult<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ChartError::InvalidData(
                "pie radius must be finite and > 0".to_owned(),
            ));
        }
        let ratios = [
            self.inner_ratio,
            self.outer_ratio,
            self.label_ratio,
            self.leader_ratio,
        ];
        if ratios.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(ChartError::InvalidData(
                "pie ratios must be finite and >= 0".to_owned(),
            ));
        }
        if self.inner_ratio >= self.outer_ratio {
            return Err(ChartError::InvalidData(
                "pie inner ratio must be smaller than outer ratio".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn inner_radius(self) -> f64 {
        self.radius * self.inner_ratio
    }

    #[must_use]
    pub fn outer_radius(self) -> f64 {
        self.radius * self.outer_ratio
    }

    #[must_use]
    pub fn label_radius(self) -> f64 {
        self.radius * self.label_ratio
    }

    /// Centroid of the donut section spanned by `angles`.
    #[must_use]
    pub fn slice_centroid(self, angles: ArcAngles) -> (f64, f64) {
        polar((self.inner_radius() + self.outer_radius()) / 2.0, angles.mid())
    }

    /// Centroid of the zero-width label ring section spanned by `angles`.
    #[must_use]
    pub fn label_ring_centroid(self, angles: ArcAngles) -> (f64, f64) {
        polar(self.label_radius(), angles.mid())
    }

    #[must_use]
    pub fn label_placement(self, angles: ArcAngles) -> LabelPlacement {
        let right_side = angles.mid() < PI;
        let side = if right_side { 1.0 } else { -1.0 };
        let ring = self.label_ring_centroid(angles);
        LabelPlacement {
            anchor: (self.radius * side, ring.1),
            right_side,
            leader: [
                self.slice_centroid(angles),
                ring,
                (self.radius * self.leader_ratio * side, ring.1),
            ],
        }
    }
}

/// Converts a clockwise-from-twelve angle into screen coordinates (y down).
#[must_use]
pub fn polar(radius: f64, angle: f64) -> (f64, f64) {
    let theta = angle - FRAC_PI_2;
    (radius * theta.cos(), radius * theta.sin())
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{PI, TAU};

    use approx::assert_abs_diff_eq;

    use super::{ArcAngles, PieGeometry, pie_angles, polar};

    #[test]
    fn pie_angles_keep_input_order_and_cover_full_turn() {
        let angles = pie_angles(&[1, 0, 3]);
        assert_eq!(angles[0], ArcAngles::new(0.0, TAU / 4.0));
        assert_eq!(angles[1].span(), 0.0);
        assert_abs_diff_eq!(angles[2].end, TAU, epsilon = 1e-12);
    }

    #[test]
    fn zero_total_collapses_every_slice() {
        for angles in pie_angles(&[0, 0, 0]) {
            assert_eq!(angles, ArcAngles::new(0.0, 0.0));
        }
    }

    #[test]
    fn polar_zero_points_up() {
        let (x, y) = polar(10.0, 0.0);
        assert_abs_diff_eq!(x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(y, -10.0, epsilon = 1e-12);
    }

    #[test]
    fn labels_switch_side_at_half_turn() {
        let geometry = PieGeometry::default();
        let right = geometry.label_placement(ArcAngles::new(0.0, PI / 2.0));
        assert!(right.right_side);
        assert_abs_diff_eq!(right.anchor.0, 120.0);

        let left = geometry.label_placement(ArcAngles::new(PI, TAU));
        assert!(!left.right_side);
        assert_abs_diff_eq!(left.leader[2].0, -114.0, epsilon = 1e-9);
    }
}
