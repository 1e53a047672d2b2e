// File: crates/chart-core/src/chart.rs
// Summary: Chart struct and headless PNG rendering pipeline using Skia CPU raster surfaces.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use skia_safe as skia;
use tracing::debug;

use crate::geometry::PlotArea;
use crate::grid::{format_tick, nice_ticks, tick_step, GridStyle};
use crate::plugin::Overlay;
use crate::series::Series;
use crate::text::{TextShaper, Weight};
use crate::theme::Theme;
use crate::types::{Insets, DPI, HEIGHT_IN, POINTS_PER_INCH, WIDTH_IN};
use crate::view::ViewState;
use crate::Axis;

// Font sizes and spacing, in points.
const TITLE_SIZE: f32 = 14.0;
const LABEL_SIZE: f32 = 12.0;
const TICK_SIZE: f32 = 10.0;
const LEGEND_SIZE: f32 = 10.0;
const TICK_LEN: f32 = 3.5;
const GAP: f32 = 3.5;
const PAD: f32 = 7.2;
const MAX_X_TICKS: usize = 10;
const MAX_Y_TICKS: usize = 8;

pub struct RenderOptions {
    pub width_in: f32,
    pub height_in: f32,
    pub dpi: f32,
    pub theme: Theme,
    /// Title, axis labels, tick labels and legend. Off for pixel-exact tests.
    pub draw_labels: bool,
    /// Size insets from measured text so nothing is clipped; otherwise use `insets`.
    pub fit_layout: bool,
    pub insets: Insets,
}

impl RenderOptions {
    /// Figure size in points.
    pub fn size_pt(&self) -> (f32, f32) {
        (self.width_in * POINTS_PER_INCH, self.height_in * POINTS_PER_INCH)
    }

    /// Output image size in pixels.
    pub fn pixel_size(&self) -> (i32, i32) {
        ((self.width_in * self.dpi).round() as i32, (self.height_in * self.dpi).round() as i32)
    }

    fn scale(&self) -> f32 {
        self.dpi / POINTS_PER_INCH
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width_in: WIDTH_IN,
            height_in: HEIGHT_IN,
            dpi: DPI,
            theme: Theme::light(),
            draw_labels: true,
            fit_layout: true,
            insets: Insets::default(),
        }
    }
}

pub struct Chart {
    pub title: Option<String>,
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    /// `None` disables gridlines.
    pub grid: Option<GridStyle>,
    pub legend: bool,
}

/// Resolved positions for one render.
struct Layout {
    area: PlotArea,
    x_ticks: Vec<f64>,
    x_step: f64,
    y_ticks: Vec<f64>,
    y_step: f64,
}

impl Chart {
    pub fn new() -> Self {
        Self {
            title: None,
            series: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
            grid: Some(GridStyle::default()),
            legend: true,
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Append the series an overlay derives from the chart as it is now.
    pub fn add_overlay(&mut self, overlay: &dyn Overlay) {
        let extra = overlay.compute(self);
        debug!(overlay = overlay.id(), series = extra.len(), "applied overlay");
        self.series.extend(extra);
    }

    /// Fit both axes to the data, padded by `margin` (fraction of each span).
    pub fn autoscale_axes(&mut self, margin: f64) {
        ViewState::from_chart(self, margin).apply_to_chart(self);
    }

    /// Plot rectangle (in points) the chart would use with `opts`.
    pub fn plot_area(&self, opts: &RenderOptions) -> PlotArea {
        let text = TextShaper::new();
        self.layout(opts, &text).area
    }

    /// Render the chart to PNG-encoded bytes.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let image = self.rasterize(opts)?;
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the chart to a PNG at `output_png_path`.
    ///
    /// The file is written to a temporary sibling and renamed into place, so a
    /// failure never leaves a partial image behind.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<Path>,
    ) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes(opts)?;
        write_atomic(path, &bytes).with_context(|| format!("writing {}", path.display()))
    }

    // The raster surface lives only for the duration of this call.
    fn rasterize(&self, opts: &RenderOptions) -> Result<skia::Image> {
        let (w, h) = opts.pixel_size();
        anyhow::ensure!(w > 0 && h > 0, "invalid surface size {w}x{h}");
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow!("failed to create {w}x{h} raster surface"))?;
        self.draw(surface.canvas(), opts);
        Ok(surface.image_snapshot())
    }

    fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &opts.theme;
        canvas.clear(theme.background);
        canvas.save();
        canvas.scale((opts.scale(), opts.scale()));

        let text = TextShaper::new();
        let layout = self.layout(opts, &text);
        let area = layout.area;

        if let Some(grid) = &self.grid {
            draw_grid(canvas, &area, &self.x_axis, &self.y_axis, &layout, grid, theme);
        }

        canvas.save();
        canvas.clip_rect(area.to_rect(), skia::ClipOp::Intersect, true);
        for s in &self.series {
            draw_line_series(canvas, &area, &self.x_axis, &self.y_axis, s, theme);
        }
        canvas.restore();

        draw_frame(canvas, &area, &self.x_axis, &self.y_axis, &layout, theme);

        if opts.draw_labels {
            self.draw_labels(canvas, &text, &layout, opts);
            if self.legend {
                let entries: Vec<&Series> = self.series.iter().filter(|s| s.label.is_some()).collect();
                draw_legend(canvas, &text, &area, &entries, theme);
            }
        }
        canvas.restore();
    }

    fn layout(&self, opts: &RenderOptions, text: &TextShaper) -> Layout {
        let x_ticks = nice_ticks(self.x_axis.min, self.x_axis.max, MAX_X_TICKS);
        let x_step = tick_step(self.x_axis.min, self.x_axis.max, MAX_X_TICKS);
        let y_ticks = nice_ticks(self.y_axis.min, self.y_axis.max, MAX_Y_TICKS);
        let y_step = tick_step(self.y_axis.min, self.y_axis.max, MAX_Y_TICKS);

        let insets = if opts.draw_labels && opts.fit_layout {
            self.fit_insets(text, &x_ticks, x_step, &y_ticks, y_step)
        } else {
            opts.insets
        };
        debug!(?insets, "plot insets");

        let (w, h) = opts.size_pt();
        Layout { area: PlotArea::from_insets(w, h, &insets), x_ticks, x_step, y_ticks, y_step }
    }

    fn fit_insets(&self, text: &TextShaper, x_ticks: &[f64], x_step: f64, y_ticks: &[f64], y_step: f64) -> Insets {
        let (_, tick_h) = text.measure("0", TICK_SIZE, Weight::Normal);
        let y_tick_w = y_ticks
            .iter()
            .map(|&v| text.measure(&format_tick(v, y_step), TICK_SIZE, Weight::Normal).0)
            .fold(0.0f32, f32::max);
        let x_tick_w = x_ticks
            .iter()
            .map(|&v| text.measure(&format_tick(v, x_step), TICK_SIZE, Weight::Normal).0)
            .fold(0.0f32, f32::max);
        let (_, x_label_h) = text.measure(&self.x_axis.label, LABEL_SIZE, Weight::Bold);
        let (_, y_label_h) = text.measure(&self.y_axis.label, LABEL_SIZE, Weight::Bold);
        let title_h = self
            .title
            .as_deref()
            .map(|t| text.measure(t, TITLE_SIZE, Weight::Bold).1)
            .unwrap_or(0.0);

        let left = PAD + gap_after(y_label_h) + y_tick_w + GAP + TICK_LEN;
        let bottom = PAD + gap_after(x_label_h) + tick_h + GAP + TICK_LEN;
        let top = PAD + if title_h > 0.0 { title_h + 2.0 * GAP } else { tick_h * 0.5 };
        let right = PAD + x_tick_w * 0.5;
        Insets::new(left, right, top, bottom)
    }

    fn draw_labels(&self, canvas: &skia::Canvas, text: &TextShaper, layout: &Layout, opts: &RenderOptions) {
        let theme = &opts.theme;
        let area = &layout.area;

        for &v in &layout.x_ticks {
            let x = area.x_to_pt(&self.x_axis, v);
            let label = format_tick(v, layout.x_step);
            text.draw_centered(canvas, &label, x, area.bottom + TICK_LEN + GAP, TICK_SIZE, theme.tick, Weight::Normal);
        }
        for &v in &layout.y_ticks {
            let y = area.y_to_pt(&self.y_axis, v);
            let label = format_tick(v, layout.y_step);
            text.draw_right_middle(canvas, &label, area.left - TICK_LEN - GAP, y, TICK_SIZE, theme.tick, Weight::Normal);
        }

        let (_, tick_h) = text.measure("0", TICK_SIZE, Weight::Normal);
        if !self.x_axis.label.is_empty() {
            let top = area.bottom + TICK_LEN + GAP + tick_h + GAP;
            let cx = (area.left + area.right) * 0.5;
            text.draw_centered(canvas, &self.x_axis.label, cx, top, LABEL_SIZE, theme.axis_label, Weight::Bold);
        }
        if !self.y_axis.label.is_empty() {
            let (_, label_h) = text.measure(&self.y_axis.label, LABEL_SIZE, Weight::Bold);
            let cy = (area.top + area.bottom) * 0.5;
            text.draw_vertical(canvas, &self.y_axis.label, PAD + label_h * 0.5, cy, LABEL_SIZE, theme.axis_label, Weight::Bold);
        }
        if let Some(title) = &self.title {
            let cx = (area.left + area.right) * 0.5;
            text.draw_centered(canvas, title, cx, PAD, TITLE_SIZE, theme.axis_label, Weight::Bold);
        }
    }
}

impl Default for Chart {
    fn default() -> Self { Self::new() }
}

fn gap_after(extent: f32) -> f32 {
    if extent > 0.0 { extent + GAP } else { 0.0 }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    with_new_dirs(dir, || {
        let mut tmp = tempfile::Builder::new()
            .prefix(".chart-")
            .suffix(".png.tmp")
            .tempfile_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        // Drop the temp file (deleting it) before reporting a failed rename.
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    })
}

/// Create the missing ancestors of `dir`, run `f`, and remove the directories
/// created here again if `f` fails. Pre-existing directories are never touched.
fn with_new_dirs<T>(dir: &Path, f: impl FnOnce() -> Result<T>) -> Result<T> {
    // Deepest first, which is also the removal order.
    let created: Vec<PathBuf> = dir
        .ancestors()
        .take_while(|p| !p.as_os_str().is_empty() && !p.exists())
        .map(Path::to_path_buf)
        .collect();
    std::fs::create_dir_all(dir)?;
    let out = f();
    if out.is_err() {
        for d in &created {
            let _ = std::fs::remove_dir(d);
        }
    }
    out
}

// ---- helpers ----------------------------------------------------------------

fn stroke_paint(color: skia::Color, width: f32, dash: Option<[f32; 2]>) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    match dash {
        Some([on, off]) => {
            paint.set_stroke_cap(skia::paint::Cap::Butt);
            paint.set_path_effect(skia::PathEffect::dash(&[on, off], 0.0));
        }
        None => {
            paint.set_stroke_cap(skia::paint::Cap::Round);
            paint.set_stroke_join(skia::paint::Join::Round);
        }
    }
    paint
}

fn draw_grid(
    canvas: &skia::Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    layout: &Layout,
    grid: &GridStyle,
    theme: &Theme,
) {
    let alpha = (grid.alpha * theme.grid.a() as f32).round() as u8;
    let paint = stroke_paint(theme.grid.with_a(alpha), grid.width, grid.dash);

    // verticals
    for &v in &layout.x_ticks {
        let x = area.x_to_pt(x_axis, v);
        canvas.draw_line((x, area.top), (x, area.bottom), &paint);
    }
    // horizontals
    for &v in &layout.y_ticks {
        let y = area.y_to_pt(y_axis, v);
        canvas.draw_line((area.left, y), (area.right, y), &paint);
    }
}

fn draw_frame(
    canvas: &skia::Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    layout: &Layout,
    theme: &Theme,
) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_style(skia::paint::Style::Stroke);
    axis_paint.set_stroke_width(0.8);
    canvas.draw_rect(area.to_rect(), &axis_paint);

    axis_paint.set_color(theme.tick);
    for &v in &layout.x_ticks {
        let x = area.x_to_pt(x_axis, v);
        canvas.draw_line((x, area.bottom), (x, area.bottom + TICK_LEN), &axis_paint);
    }
    for &v in &layout.y_ticks {
        let y = area.y_to_pt(y_axis, v);
        canvas.draw_line((area.left - TICK_LEN, y), (area.left, y), &axis_paint);
    }
}

fn draw_line_series(
    canvas: &skia::Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    series: &Series,
    theme: &Theme,
) {
    let points: Vec<skia::Point> = series
        .data_xy
        .iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|&(x, y)| skia::Point::new(area.x_to_pt(x_axis, x), area.y_to_pt(y_axis, y)))
        .collect();
    if points.is_empty() {
        return;
    }

    let color = series.resolved_color(theme);
    if points.len() >= 2 {
        let stroke = stroke_paint(color, series.stroke.width, series.stroke.dash);
        canvas.draw_points(skia::canvas::PointMode::Polygon, &points, &stroke);
    }

    if let Some(marker) = series.marker {
        let mut fill = skia::Paint::default();
        fill.set_anti_alias(true);
        fill.set_style(skia::paint::Style::Fill);
        fill.set_color(color);
        for p in &points {
            canvas.draw_circle(*p, marker.size * 0.5, &fill);
        }
    }
}

fn draw_legend(canvas: &skia::Canvas, text: &TextShaper, area: &PlotArea, entries: &[&Series], theme: &Theme) {
    if entries.is_empty() {
        return;
    }
    let pad = 4.0;
    let sample_len = 20.0;
    let gap = 6.0;
    let sizes: Vec<(f32, f32)> = entries
        .iter()
        .map(|s| text.measure(s.label.as_deref().unwrap_or_default(), LEGEND_SIZE, Weight::Normal))
        .collect();
    let label_w = sizes.iter().map(|s| s.0).fold(0.0f32, f32::max);
    let row_h = sizes.iter().map(|s| s.1).fold(LEGEND_SIZE * 1.2, f32::max);

    let w = pad * 2.0 + sample_len + gap + label_w;
    let h = pad * 2.0 + row_h * entries.len() as f32;
    let right = area.right - 6.0;
    let top = area.top + 6.0;
    let rect = skia::Rect::from_ltrb(right - w, top, right, top + h);

    let mut fill = skia::Paint::default();
    fill.set_anti_alias(true);
    fill.set_color(theme.legend_fill);
    canvas.draw_round_rect(rect, 2.0, 2.0, &fill);
    let mut border = stroke_paint(theme.legend_border, 0.8, None);
    border.set_stroke_join(skia::paint::Join::Miter);
    canvas.draw_round_rect(rect, 2.0, 2.0, &border);

    for (i, (s, &(_, label_h))) in entries.iter().zip(&sizes).enumerate() {
        let cy = top + pad + row_h * (i as f32 + 0.5);
        let x0 = rect.left + pad;
        let color = s.resolved_color(theme);
        let paint = stroke_paint(color, s.stroke.width, s.stroke.dash);
        canvas.draw_line((x0, cy), (x0 + sample_len, cy), &paint);
        if let Some(marker) = s.marker {
            let mut dot = skia::Paint::default();
            dot.set_anti_alias(true);
            dot.set_color(color);
            canvas.draw_circle((x0 + sample_len * 0.5, cy), marker.size * 0.5, &dot);
        }
        let label = s.label.as_deref().unwrap_or_default();
        text.draw_top_left(canvas, label, x0 + sample_len + gap, cy - label_h * 0.5, LEGEND_SIZE, theme.axis_label, Weight::Normal);
    }
}
