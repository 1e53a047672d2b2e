// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark theming for chart rendering colors.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub line_stroke: skia::Color,
    pub reference_line: skia::Color,
    pub legend_fill: skia::Color,
    pub legend_border: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 90, 90, 100),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            line_stroke: skia::Color::from_argb(255, 64, 160, 255),
            reference_line: skia::Color::from_argb(255, 240, 80, 80),
            legend_fill: skia::Color::from_argb(204, 30, 30, 34),
            legend_border: skia::Color::from_argb(255, 80, 80, 90),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::WHITE,
            grid: skia::Color::from_argb(255, 0xb0, 0xb0, 0xb0),
            axis_line: skia::Color::BLACK,
            axis_label: skia::Color::BLACK,
            tick: skia::Color::BLACK,
            line_stroke: skia::Color::from_argb(255, 0x2e, 0x86, 0xab),
            reference_line: skia::Color::RED,
            legend_fill: skia::Color::from_argb(204, 255, 255, 255),
            legend_border: skia::Color::from_argb(255, 0xcc, 0xcc, 0xcc),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Theme::light)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_case_insensitive_with_fallback() {
        assert_eq!(find("DARK").name, "dark");
        assert_eq!(find("light").name, "light");
        assert_eq!(find("no-such-theme").name, "light");
    }
}
