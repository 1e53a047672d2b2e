// File: crates/chart-core/src/series.rs
// Summary: Line series model with stroke, point markers and legend label.

use skia_safe as skia;

use crate::theme::Theme;

/// Line appearance. `color: None` falls back to the theme's line color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Option<skia::Color>,
    pub width: f32,
    /// Dash on/off lengths in points; `None` draws a solid line.
    pub dash: Option<[f32; 2]>,
}

impl Stroke {
    pub fn solid(width: f32) -> Self {
        Self { color: None, width, dash: None }
    }

    pub fn dashed(width: f32) -> Self {
        Self { color: None, width, dash: Some([3.7, 1.6].map(|d| d * width.max(1.0))) }
    }

    pub fn with_color(mut self, color: skia::Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl Default for Stroke {
    fn default() -> Self { Self::solid(1.5) }
}

/// Filled circle drawn at every data point, in the series color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    /// Marker diameter in points.
    pub size: f32,
}

/// What a series shows; picks the theme color when the stroke has none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SeriesKind {
    #[default]
    Data,
    /// Guide lines such as averages or thresholds.
    Reference,
}

#[derive(Clone, Debug)]
pub struct Series {
    pub kind: SeriesKind,
    pub data_xy: Vec<(f64, f64)>,
    pub stroke: Stroke,
    pub marker: Option<Marker>,
    /// Series with a label get a legend entry.
    pub label: Option<String>,
}

impl Series {
    pub fn new() -> Self {
        Self::with_data(Vec::new())
    }

    pub fn with_data(data: Vec<(f64, f64)>) -> Self {
        Self { kind: SeriesKind::Data, data_xy: data, stroke: Stroke::default(), marker: None, label: None }
    }

    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    pub fn with_marker(mut self, size: f32) -> Self {
        self.marker = Some(Marker { size });
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_kind(mut self, kind: SeriesKind) -> Self {
        self.kind = kind;
        self
    }

    /// Stroke color, or the theme color for this series' kind.
    pub fn resolved_color(&self, theme: &Theme) -> skia::Color {
        self.stroke.color.unwrap_or(match self.kind {
            SeriesKind::Data => theme.line_stroke,
            SeriesKind::Reference => theme.reference_line,
        })
    }

    /// (min, max) over finite y values, `None` when there are none.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        bounds(self.data_xy.iter().map(|&(_, y)| y))
    }

    /// (min, max) over finite x values, `None` when there are none.
    pub fn x_bounds(&self) -> Option<(f64, f64)> {
        bounds(self.data_xy.iter().map(|&(x, _)| x))
    }
}

impl Default for Series {
    fn default() -> Self { Self::new() }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_skip_non_finite() {
        let s = Series::with_data(vec![(0.0, 3.0), (1.0, f64::NAN), (2.0, -1.0)]);
        assert_eq!(s.y_bounds(), Some((-1.0, 3.0)));
        assert_eq!(s.x_bounds(), Some((0.0, 2.0)));
        assert_eq!(Series::new().y_bounds(), None);
    }

    #[test]
    fn builders_set_style() {
        let s = Series::with_data(vec![(0.0, 1.0)])
            .with_stroke(Stroke::dashed(1.5).with_color(skia::Color::RED))
            .with_marker(4.0)
            .with_label("avg");
        assert_eq!(s.stroke.color, Some(skia::Color::RED));
        assert!(s.stroke.dash.is_some());
        assert_eq!(s.marker, Some(Marker { size: 4.0 }));
        assert_eq!(s.label.as_deref(), Some("avg"));
    }

    #[test]
    fn color_falls_back_to_theme_by_kind() {
        let dark = Theme::dark();
        let data = Series::with_data(vec![(0.0, 1.0)]);
        let guide = Series::with_data(vec![(0.0, 1.0)]).with_kind(SeriesKind::Reference);
        assert_eq!(data.resolved_color(&dark), dark.line_stroke);
        assert_eq!(guide.resolved_color(&dark), dark.reference_line);
        let pinned = guide.with_stroke(Stroke::solid(1.0).with_color(skia::Color::GREEN));
        assert_eq!(pinned.resolved_color(&dark), skia::Color::GREEN);
    }
}
