// File: crates/chart-core/src/plugin.rs
// Summary: Overlay trait and the horizontal reference-line overlay.

use crate::series::{Series, SeriesKind, Stroke};
use crate::Chart;

/// Overlay derives extra series from the chart's current state (axes, data).
pub trait Overlay {
    fn id(&self) -> &'static str;
    /// Compute one or more series to render on top of the chart.
    fn compute(&self, chart: &Chart) -> Vec<Series>;
}

/// Horizontal reference line at a fixed `y`, spanning the current X range.
/// Apply after the axes are final so the line reaches both plot edges.
/// Without an explicit stroke color it takes the theme's reference-line color.
#[derive(Clone, Debug)]
pub struct HLineOverlay {
    pub y: f64,
    pub label: Option<String>,
    pub stroke: Stroke,
}

impl HLineOverlay {
    pub fn new(y: f64) -> Self {
        Self { y, label: None, stroke: Stroke::dashed(1.5) }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }
}

impl Overlay for HLineOverlay {
    fn id(&self) -> &'static str { "hline" }

    fn compute(&self, chart: &Chart) -> Vec<Series> {
        if !self.y.is_finite() {
            return Vec::new();
        }
        let x0 = chart.x_axis.min;
        let x1 = chart.x_axis.max;
        let mut s = Series::with_data(vec![(x0, self.y), (x1, self.y)])
            .with_stroke(self.stroke)
            .with_kind(SeriesKind::Reference);
        s.label = self.label.clone();
        vec![s]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use crate::Axis;

    #[test]
    fn hline_spans_current_x_range() {
        let mut chart = Chart::new();
        chart.x_axis = Axis::new("t", -1.0, 21.0);
        let out = HLineOverlay::new(200.0).with_label("avg").compute(&chart);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].data_xy, vec![(-1.0, 200.0), (21.0, 200.0)]);
        assert_eq!(out[0].label.as_deref(), Some("avg"));
        assert!(out[0].stroke.dash.is_some());
    }

    #[test]
    fn hline_takes_reference_color_from_theme() {
        let chart = Chart::new();
        let out = HLineOverlay::new(1.0).compute(&chart);
        assert_eq!(out[0].kind, SeriesKind::Reference);
        assert_eq!(out[0].resolved_color(&Theme::dark()), Theme::dark().reference_line);
        assert_eq!(out[0].resolved_color(&Theme::light()), Theme::light().reference_line);
    }

    #[test]
    fn non_finite_level_draws_nothing() {
        let chart = Chart::new();
        assert!(HLineOverlay::new(f64::NAN).compute(&chart).is_empty());
    }
}
