// File: crates/throughput-viz/src/lib.rs
// Summary: Renders a load-test throughput CSV into a line chart with an average overlay.

pub mod config;
pub mod error;
pub mod render;
pub mod sample;

pub use config::RenderConfig;
pub use error::{Error, RenderError};
pub use render::{average_label, build_chart, render, render_with, RenderSummary};
pub use sample::{load_series, ThroughputSample, ThroughputSeries};
