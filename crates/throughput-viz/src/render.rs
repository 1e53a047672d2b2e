// File: crates/throughput-viz/src/render.rs
// Summary: Throughput chart pipeline: load CSV, average, build chart, save PNG.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chart_core::{Axis, Chart, Color, GridStyle, HLineOverlay, Series, Stroke, DEFAULT_MARGIN};
use tracing::{debug, info};

use crate::config::{RenderConfig, X_LABEL, Y_LABEL};
use crate::error::{Error, RenderError};
use crate::sample::{load_series, ThroughputSeries};

const LINE_WIDTH: f32 = 2.0;
const MARKER_SIZE: f32 = 4.0;
const GRID_ALPHA: f32 = 0.3;

fn line_color() -> Color {
    Color::from_rgb(0x2e, 0x86, 0xab)
}

/// What a successful render produced.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSummary {
    pub samples: usize,
    pub average: f64,
    pub output: PathBuf,
}

/// Legend text for the average line, rounded to a whole message count.
pub fn average_label(average: f64) -> String {
    format!("Average: {average:.0} msg/10s")
}

/// Chart model for `series`: the throughput line with markers, autoscaled
/// axes, and a dashed average line across the full X range.
pub fn build_chart(series: &ThroughputSeries, config: &RenderConfig) -> Chart {
    let mut chart = Chart::new();
    chart.title = Some(config.title.clone());
    chart.x_axis = Axis::default_x().with_label(X_LABEL);
    chart.y_axis = Axis::default_y().with_label(Y_LABEL);
    chart.grid = Some(GridStyle::dashed(GRID_ALPHA));
    chart.add_series(
        Series::with_data(series.points())
            .with_stroke(Stroke::solid(LINE_WIDTH).with_color(line_color()))
            .with_marker(MARKER_SIZE),
    );
    chart.autoscale_axes(DEFAULT_MARGIN);

    let average = series.average();
    chart.add_overlay(&HLineOverlay::new(average).with_label(average_label(average)));
    chart
}

/// Render `input` to `output` with the default title, theme and figure size.
pub fn render(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<(), Error> {
    let config = RenderConfig {
        input: input.as_ref().to_path_buf(),
        output: output.as_ref().to_path_buf(),
        ..RenderConfig::default()
    };
    render_with(&config).map(|_| ())
}

pub fn render_with(config: &RenderConfig) -> Result<RenderSummary, Error> {
    let started = Instant::now();
    let series = load_series(&config.input)?;
    let average = series.average();
    info!(samples = series.len(), average, input = %config.input.display(), "loaded throughput samples");

    let chart = build_chart(&series, config);
    debug!(
        x_min = chart.x_axis.min,
        x_max = chart.x_axis.max,
        y_min = chart.y_axis.min,
        y_max = chart.y_axis.max,
        "axis ranges"
    );

    chart
        .render_to_png(&config.render_options(), &config.output)
        .map_err(RenderError::Chart)?;
    info!(
        output = %config.output.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "chart saved"
    );

    Ok(RenderSummary { samples: series.len(), average, output: config.output.clone() })
}
