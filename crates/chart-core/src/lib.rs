// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports public API for chart construction and rendering.

pub mod chart;
pub mod series;
pub mod axis;
pub mod grid;
pub mod types;
pub mod geometry;
pub mod view;
pub mod theme;
pub mod text;
pub mod plugin;

pub use chart::{Chart, RenderOptions};
pub use series::{Marker, Series, SeriesKind, Stroke};
pub use axis::Axis;
pub use grid::GridStyle;
pub use geometry::PlotArea;
pub use view::{ViewState, DEFAULT_MARGIN};
pub use theme::Theme;
pub use text::TextShaper;
pub use plugin::{HLineOverlay, Overlay};

pub use skia_safe::Color;
