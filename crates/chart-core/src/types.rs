// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (figure size, resolution, paddings).

/// Default figure width in inches.
pub const WIDTH_IN: f32 = 12.0;
/// Default figure height in inches.
pub const HEIGHT_IN: f32 = 6.0;
/// Default output resolution.
pub const DPI: f32 = 300.0;
/// Layout happens in points; the canvas is scaled by `dpi / POINTS_PER_INCH`.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Figure margins around the plot area, in points.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    /// Create new insets; negative values are clamped to zero.
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left: left.max(0.0), right: right.max(0.0), top: top.max(0.0), bottom: bottom.max(0.0) }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(54.0, 18.0, 18.0, 42.0)
    }
}
