// File: crates/chart-core/src/grid.rs
// Summary: Grid styling and tick layout helpers.

/// Gridline appearance. Gridlines follow the major ticks of both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridStyle {
    /// Opacity applied on top of the theme grid color, 0.0..=1.0.
    pub alpha: f32,
    pub width: f32,
    /// Dash on/off lengths in points; `None` draws solid lines.
    pub dash: Option<[f32; 2]>,
}

impl GridStyle {
    pub fn solid() -> Self {
        Self { alpha: 1.0, width: 0.8, dash: None }
    }

    /// Light dashed grid.
    pub fn dashed(alpha: f32) -> Self {
        Self { alpha: alpha.clamp(0.0, 1.0), width: 0.8, dash: Some([2.96, 1.28]) }
    }
}

impl Default for GridStyle {
    fn default() -> Self { Self::solid() }
}

/// Round `raw` up to 1, 2, 2.5, 5 or 10 times a power of ten.
pub fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 { return 1.0; }
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let nice = if norm <= 1.0 {
        1.0
    } else if norm <= 2.0 {
        2.0
    } else if norm <= 2.5 {
        2.5
    } else if norm <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * mag
}

/// Tick positions at a "nice" step inside `[min, max]`, at most `max_ticks` of them.
pub fn nice_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || max <= min {
        return vec![min];
    }
    let step = tick_step(min, max, max_ticks);
    let first = (min / step).ceil() * step;
    let eps = step * 1e-9;
    let mut out = Vec::new();
    let mut k = 0usize;
    loop {
        let v = first + step * k as f64;
        if v > max + eps { break; }
        out.push(if v.abs() < eps { 0.0 } else { v });
        k += 1;
    }
    out
}

/// The step `nice_ticks` uses for the same arguments.
pub fn tick_step(min: f64, max: f64, max_ticks: usize) -> f64 {
    let intervals = max_ticks.max(2) - 1;
    nice_step((max - min) / intervals as f64)
}

/// Format a tick value with just enough decimals to distinguish ticks `step` apart.
pub fn format_tick(value: f64, step: f64) -> String {
    let mut decimals = 0usize;
    while decimals < 6 {
        let scaled = step * 10f64.powi(decimals as i32);
        if (scaled - scaled.round()).abs() < 1e-6 { break; }
        decimals += 1;
    }
    let v = if value.abs() < step.abs() * 1e-9 { 0.0 } else { value };
    format!("{:.*}", decimals, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_step_rounds_up() {
        assert_eq!(nice_step(0.7), 1.0);
        assert_eq!(nice_step(1.5), 2.0);
        assert_eq!(nice_step(2.2), 2.5);
        assert_eq!(nice_step(4.0), 5.0);
        assert_eq!(nice_step(7.0), 10.0);
        assert_eq!(nice_step(3000.0), 5000.0);
    }

    #[test]
    fn ticks_cover_range_at_nice_steps() {
        assert_eq!(nice_ticks(0.0, 20.0, 6), vec![0.0, 5.0, 10.0, 15.0, 20.0]);
        let t = nice_ticks(-1.0, 21.0, 6);
        assert_eq!(t.first().copied(), Some(0.0));
        assert_eq!(t.last().copied(), Some(20.0));
    }

    #[test]
    fn fractional_ticks() {
        let t = nice_ticks(0.0, 1.0, 5);
        assert_eq!(t.len(), 5);
        assert!((t[1] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn degenerate_range_yields_single_tick() {
        assert_eq!(nice_ticks(3.0, 3.0, 6), vec![3.0]);
    }

    #[test]
    fn tick_labels() {
        assert_eq!(format_tick(2000.0, 500.0), "2000");
        assert_eq!(format_tick(0.25, 0.25), "0.25");
        assert_eq!(format_tick(0.5, 0.5), "0.5");
        assert_eq!(format_tick(-0.0, 1.0), "0");
    }

    #[test]
    fn dashed_style_clamps_alpha() {
        let g = GridStyle::dashed(1.7);
        assert_eq!(g.alpha, 1.0);
        assert!(g.dash.is_some());
    }
}
