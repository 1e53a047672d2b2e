// File: crates/chart-core/src/geometry.rs
// Summary: Plot-area rectangle and data-to-point mapping.

use crate::types::Insets;
use crate::Axis;

/// Plot rectangle in points (figure coordinates, y grows downwards).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PlotArea {
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Carve the plot area out of a `width` x `height` figure.
    /// Degenerate insets still leave at least one point of plot.
    pub fn from_insets(width: f32, height: f32, insets: &Insets) -> Self {
        let right = (width - insets.right).max(insets.left + 1.0);
        let bottom = (height - insets.bottom).max(insets.top + 1.0);
        Self { left: insets.left, top: insets.top, right, bottom }
    }

    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }

    pub fn to_rect(&self) -> skia_safe::Rect {
        skia_safe::Rect::from_ltrb(self.left, self.top, self.right, self.bottom)
    }

    #[inline]
    pub fn x_to_pt(&self, axis: &Axis, x: f64) -> f32 {
        let span = axis.span().max(1e-9);
        self.left + ((x - axis.min) / span) as f32 * self.width()
    }

    #[inline]
    pub fn y_to_pt(&self, axis: &Axis, y: f64) -> f32 {
        let span = axis.span().max(1e-9);
        self.bottom - ((y - axis.min) / span) as f32 * self.height()
    }
}
