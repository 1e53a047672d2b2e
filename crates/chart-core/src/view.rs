// File: crates/chart-core/src/view.rs
// Summary: Visible data ranges and autoscale.

use crate::Chart;

/// Relative padding added around the data bounds by default.
pub const DEFAULT_MARGIN: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewState {
    /// Bounds of all series data, widened by `margin` (fraction of the span) on each side.
    ///
    /// A zero-span axis (single sample, flat series) is first widened around its
    /// value so the view never collapses.
    pub fn from_chart(chart: &Chart, margin: f64) -> Self {
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for s in &chart.series {
            if let Some((lo, hi)) = s.x_bounds() {
                x_min = x_min.min(lo);
                x_max = x_max.max(hi);
            }
            if let Some((lo, hi)) = s.y_bounds() {
                y_min = y_min.min(lo);
                y_max = y_max.max(hi);
            }
        }
        if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
            return Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
        }
        let (x_min, x_max) = expand(x_min, x_max, margin);
        let (y_min, y_max) = expand(y_min, y_max, margin);
        Self { x_min, x_max, y_min, y_max }
    }

    pub fn apply_to_chart(&self, chart: &mut Chart) {
        chart.x_axis.min = self.x_min;
        chart.x_axis.max = self.x_max;
        chart.y_axis.min = self.y_min;
        chart.y_axis.max = self.y_max;
    }
}

fn expand(lo: f64, hi: f64, margin: f64) -> (f64, f64) {
    let (lo, hi) = if (hi - lo).abs() < 1e-9 {
        let half = (lo.abs() * 0.05).max(0.5);
        (lo - half, hi + half)
    } else {
        (lo, hi)
    };
    let m = (hi - lo) * margin.max(0.0);
    (lo - m, hi + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_span_is_widened_around_value() {
        let (lo, hi) = expand(100.0, 100.0, 0.0);
        assert!(lo < 100.0 && hi > 100.0);
        assert!(((lo + hi) * 0.5 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn margin_is_relative_to_span() {
        assert_eq!(expand(0.0, 20.0, 0.05), (-1.0, 21.0));
        assert_eq!(expand(0.0, 20.0, -1.0), (0.0, 20.0));
    }
}
