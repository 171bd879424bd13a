use crate::error::{ChartError, ChartResult};

/// Linear map from a value domain to a pixel range.
///
/// The range may be inverted (`range_start > range_end`), which is how the
/// histogram axis puts larger values higher on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    /// Creates a scale; a degenerate domain (`start == end`) is accepted and
    /// maps every value to the middle of the range.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite() || !domain_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_start == self.domain_end
    }

    pub fn map(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = if span == 0.0 {
            0.5
        } else {
            (value - self.domain_start) / span
        };
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn invert(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return Ok(self.domain_start);
        }
        let normalized = (pixel - self.range_start) / range_span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// "Nice" tick values (1, 2 or 5 times a power of ten) covering `[start, stop]`.
///
/// Roughly `count` ticks are produced; all of them lie inside the closed
/// interval. Returns an empty vector for non-finite input or `count == 0`.
#[must_use]
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi, reversed) = if start < stop {
        (start, stop, false)
    } else {
        (stop, start, true)
    };

    let step = (hi - lo) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    // Negative powers divide by an integer inverse to avoid 0.1 * 3 drift.
    let mut ticks: Vec<f64> = if power >= 0.0 {
        let increment = factor * 10f64.powf(power);
        let first = (lo / increment).ceil() as i64;
        let last = (hi / increment).floor() as i64;
        (first..=last).map(|i| i as f64 * increment).collect()
    } else {
        let inverse = 10f64.powf(-power) / factor;
        let first = (lo * inverse).ceil() as i64;
        let last = (hi * inverse).floor() as i64;
        (first..=last).map(|i| i as f64 / inverse).collect()
    };

    if reversed {
        ticks.reverse();
    }
    ticks
}

/// Formats a tick value with as many decimals as the tick spacing needs.
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    let step = step.abs();
    if step >= 0.95 || step == 0.0 {
        format!("{value:.0}")
    } else if step >= 0.095 {
        format!("{value:.1}")
    } else if step >= 0.0095 {
        format!("{value:.2}")
    } else {
        format!("{value:.3}")
    }
}

#[cfg(test)]
mod tests {
    use super::{LinearScale, format_tick, nice_ticks};

    #[test]
    fn inverted_range_puts_domain_max_on_top() {
        let scale = LinearScale::new((0.0, 14.0), (420.0, 20.0)).expect("scale");
        assert_eq!(scale.map(0.0).expect("min"), 420.0);
        assert_eq!(scale.map(14.0).expect("max"), 20.0);
        assert_eq!(scale.invert(220.0).expect("invert"), 7.0);
    }

    #[test]
    fn degenerate_domain_maps_to_range_midpoint() {
        let scale = LinearScale::new((5.0, 5.0), (100.0, 0.0)).expect("scale");
        assert!(scale.is_degenerate());
        assert_eq!(scale.map(5.0).expect("map"), 50.0);
    }

    #[test]
    fn nice_ticks_follow_unit_steps_for_litre_domain() {
        let ticks = nice_ticks(0.0, 14.0, 14);
        assert_eq!(ticks.len(), 15);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert_eq!(ticks.last().copied(), Some(14.0));
    }

    #[test]
    fn nice_ticks_use_exact_fractional_steps() {
        assert_eq!(nice_ticks(0.0, 1.0, 10)[3], 0.3);
        assert_eq!(nice_ticks(0.0, 100.0, 4), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn format_tick_matches_step_precision() {
        assert_eq!(format_tick(4.0, 1.0), "4");
        assert_eq!(format_tick(0.3, 0.1), "0.3");
    }
}
