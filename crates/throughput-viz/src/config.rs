// File: crates/throughput-viz/src/config.rs
// Summary: Render configuration; defaults reproduce the fixed paths, title and figure size.

use std::path::PathBuf;

use chart_core::{theme, types, RenderOptions};

pub const DEFAULT_INPUT: &str = "throughput.csv";
pub const DEFAULT_OUTPUT: &str = "throughput-chart.png";
pub const DEFAULT_TITLE: &str = "Throughput Over Time - 500,000 Messages Load Test";
pub const DEFAULT_THEME: &str = "light";
pub const DEFAULT_DPI: f32 = types::DPI;

pub const X_LABEL: &str = "Time (seconds)";
pub const Y_LABEL: &str = "Messages per 10 seconds";

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub title: String,
    /// Theme preset name, see [`chart_core::theme::presets`].
    pub theme: String,
    pub dpi: f32,
    pub width_in: f32,
    pub height_in: f32,
}

impl RenderConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width_in: self.width_in,
            height_in: self.height_in,
            dpi: self.dpi,
            theme: theme::find(&self.theme),
            ..RenderOptions::default()
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            title: DEFAULT_TITLE.to_string(),
            theme: DEFAULT_THEME.to_string(),
            dpi: DEFAULT_DPI,
            width_in: types::WIDTH_IN,
            height_in: types::HEIGHT_IN,
        }
    }
}
