// File: crates/chart-core/src/text.rs
// Summary: Simple text shaper/renderer using Skia textlayout with sensible defaults.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

/// Font weight used for a run of text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weight {
    Normal,
    Bold,
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, weight: Weight) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&["DejaVu Sans", "Segoe UI", "Arial", "Helvetica", "Roboto", "sans-serif"]);
        if weight == Weight::Bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color, weight: Weight) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, self.fonts.clone());
        let style = Self::make_style(size, color, weight);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// (width, height) of the laid-out text.
    pub fn measure(&self, text: &str, size: f32, weight: Weight) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }
        let p = self.layout(text, size, skia::Color::from_argb(0, 0, 0, 0), weight);
        // width of the longest line
        (p.longest_line(), p.height())
    }

    /// Draw with the top-left corner of the text box at (x, y).
    pub fn draw_top_left(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, size: f32, color: skia::Color, weight: Weight) {
        let p = self.layout(text, size, color, weight);
        p.paint(canvas, (x, y));
    }

    /// Draw centered horizontally on `cx`, with the top of the text box at `y`.
    pub fn draw_centered(&self, canvas: &skia::Canvas, text: &str, cx: f32, y: f32, size: f32, color: skia::Color, weight: Weight) {
        let p = self.layout(text, size, color, weight);
        p.paint(canvas, (cx - p.longest_line() * 0.5, y));
    }

    /// Draw right-aligned on `right`, vertically centered on `cy`.
    pub fn draw_right_middle(&self, canvas: &skia::Canvas, text: &str, right: f32, cy: f32, size: f32, color: skia::Color, weight: Weight) {
        let p = self.layout(text, size, color, weight);
        p.paint(canvas, (right - p.longest_line(), cy - p.height() * 0.5));
    }

    /// Draw rotated 90° counter-clockwise, centered on (cx, cy).
    pub fn draw_vertical(&self, canvas: &skia::Canvas, text: &str, cx: f32, cy: f32, size: f32, color: skia::Color, weight: Weight) {
        let p = self.layout(text, size, color, weight);
        canvas.save();
        canvas.translate((cx, cy));
        canvas.rotate(-90.0, None);
        p.paint(canvas, (-p.longest_line() * 0.5, -p.height() * 0.5));
        canvas.restore();
    }
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}
