//! Vector PDF export.
//!
//! Renders a figure onto a single PDF page sized to the figure's
//! dimensions. The page background is left unpainted when the figure
//! is transparent, and the text face is the Times-Roman builtin.
//!
//! The backend has no transparency groups, so alpha is emulated by
//! blending fill colors toward white.

use crate::error::{PlotError, Result};
use crate::plots::figure::{BoundingBox, Figure, Legend, LegendLocation, PlotElement};
use crate::plots::heatmap::HeatmapPlot;
use crate::plots::scatter::{MarkerGeometry, MarkerStyle, ScatterPlot};
use glam::{Vec3, Vec4};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Pt, Rgb,
    TextMatrix,
};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const PT_PER_IN: f64 = 72.0;
const MM_PER_PT: f64 = 25.4 / 72.0;

// Margins (points) reserved for tick labels when the axis is kept.
const AXIS_MARGIN_LEFT: f64 = 40.0;
const AXIS_MARGIN_BOTTOM: f64 = 28.0;
const AXIS_MARGIN_TOP: f64 = 8.0;
const AXIS_MARGIN_RIGHT: f64 = 8.0;

const COLORBAR_GAP: f64 = 8.0;
const COLORBAR_WIDTH: f64 = 12.0;
const COLORBAR_SLICES: usize = 64;

/// PDF export configuration.
#[derive(Debug, Clone)]
pub struct PdfExportSettings {
    /// Document metadata title.
    pub doc_title: String,
    /// Fractional autoscale margin around scatter data.
    pub data_margin: f64,
}

impl Default for PdfExportSettings {
    fn default() -> Self {
        Self {
            doc_title: "sciplot figure".to_string(),
            data_margin: 0.05,
        }
    }
}

/// Vector PDF exporter.
pub struct PdfExporter {
    settings: PdfExportSettings,
}

impl PdfExporter {
    pub fn new() -> Self {
        Self {
            settings: PdfExportSettings::default(),
        }
    }

    pub fn with_settings(settings: PdfExportSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PdfExportSettings {
        &self.settings
    }

    /// Write `<dir>/<stem>.pdf`, creating the directory tree as needed
    /// and silently overwriting an existing file.
    pub fn save<P: AsRef<Path>>(&self, figure: &Figure, dir: P, stem: &str) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{stem}.pdf"));
        self.export_pdf(figure, &path)?;
        Ok(path)
    }

    /// Render the figure into a PDF file at `path`.
    pub fn export_pdf(&self, figure: &Figure, path: &Path) -> Result<()> {
        let page_w = figure.width_in * PT_PER_IN;
        let page_h = figure.height_in * PT_PER_IN;

        let (doc, page_idx, layer_idx) =
            PdfDocument::new(&self.settings.doc_title, mm(page_w), mm(page_h), "figure");
        let font = doc
            .add_builtin_font(BuiltinFont::TimesRoman)
            .map_err(backend)?;
        let layer = doc.get_page(page_idx).get_layer(layer_idx);

        if !figure.transparent {
            layer.set_fill_color(rgb((1.0, 1.0, 1.0)));
            layer.add_shape(polygon_shape(
                &[(0.0, 0.0), (page_w, 0.0), (page_w, page_h), (0.0, page_h)],
                true,
                false,
            ));
        }

        let pad = figure.pad_inches * PT_PER_IN;
        let content = Rect {
            x: pad,
            y: pad,
            w: (page_w - 2.0 * pad).max(1.0),
            h: (page_h - 2.0 * pad).max(1.0),
        };

        let clusters: Vec<&ScatterPlot> = figure
            .plots()
            .filter_map(|p| match p {
                PlotElement::Scatter(s) if s.visible => Some(s),
                _ => None,
            })
            .collect();
        if !clusters.is_empty() {
            self.draw_clusters(&layer, &font, &clusters, figure, content);
        }

        for element in figure.plots() {
            if let PlotElement::Heatmap(hm) = element {
                if hm.visible {
                    self.draw_heatmap(&layer, &font, hm, figure, content);
                }
            }
        }

        for legend in figure.legends() {
            self.draw_legend(&layer, &font, legend, content);
        }

        let file = fs::File::create(path)?;
        doc.save(&mut BufWriter::new(file)).map_err(backend)?;
        log::debug!(target: "sciplot", "pdf export completed path={}", path.display());
        Ok(())
    }

    fn draw_clusters(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        clusters: &[&ScatterPlot],
        figure: &Figure,
        content: Rect,
    ) {
        let mut bounds: Option<BoundingBox> = None;
        for cluster in clusters {
            if let Some(b) = BoundingBox::from_xy(&cluster.x_data, &cluster.y_data) {
                bounds = Some(match bounds {
                    None => b,
                    Some(existing) => existing.union(&b),
                });
            }
        }
        let bounds = bounds
            .unwrap_or(BoundingBox {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 1.0,
                max_y: 1.0,
            })
            .with_margin(self.settings.data_margin);

        let plot_rect = if figure.show_axis {
            content.inset(
                AXIS_MARGIN_LEFT,
                AXIS_MARGIN_BOTTOM,
                AXIS_MARGIN_RIGHT,
                AXIS_MARGIN_TOP,
            )
        } else {
            content
        };
        let mapper = Mapper {
            bounds,
            rect: plot_rect,
        };

        for cluster in clusters {
            let fill = blend(cluster.color, cluster.alpha);
            let radius = cluster.marker_radius();
            for (&x, &y) in cluster.x_data.iter().zip(cluster.y_data.iter()) {
                if !x.is_finite() || !y.is_finite() {
                    continue;
                }
                let (cx, cy) = mapper.map(x, y);
                draw_marker(
                    layer,
                    cluster.marker_style,
                    cx,
                    cy,
                    radius,
                    fill,
                    cluster.edge_width,
                );
            }
        }

        if figure.show_axis {
            self.draw_frame_and_ticks(layer, font, &mapper, figure.axis_font_size);
        }
    }

    fn draw_frame_and_ticks(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        mapper: &Mapper,
        font_size: f64,
    ) {
        let rect = mapper.rect;
        layer.set_outline_color(rgb((0.0, 0.0, 0.0)));
        layer.set_outline_thickness(0.8);
        layer.add_shape(polygon_shape(
            &[
                (rect.x, rect.y),
                (rect.right(), rect.y),
                (rect.right(), rect.top()),
                (rect.x, rect.top()),
            ],
            false,
            true,
        ));

        for v in nice_ticks(mapper.bounds.min_x, mapper.bounds.max_x, 6) {
            let (x, _) = mapper.map(v, mapper.bounds.min_y);
            layer.add_shape(segment_shape((x, rect.y), (x, rect.y - 4.0)));
            let label = fmt_tick(v);
            let tw = text_width(&label, font_size);
            draw_text(
                layer,
                font,
                font_size,
                x - tw * 0.5,
                rect.y - 6.0 - font_size,
                &label,
            );
        }
        for v in nice_ticks(mapper.bounds.min_y, mapper.bounds.max_y, 6) {
            let (_, y) = mapper.map(mapper.bounds.min_x, v);
            layer.add_shape(segment_shape((rect.x, y), (rect.x - 4.0, y)));
            let label = fmt_tick(v);
            let tw = text_width(&label, font_size);
            draw_text(
                layer,
                font,
                font_size,
                rect.x - 6.0 - tw,
                y - font_size * 0.35,
                &label,
            );
        }
    }

    fn draw_heatmap(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        hm: &HeatmapPlot,
        figure: &Figure,
        content: Rect,
    ) {
        if hm.is_empty() {
            return;
        }
        let rows = hm.rows();
        let cols = hm.cols();
        let axis_fs = hm.axis_font_size;

        let x_labels: Vec<String> = match &hm.x_labels {
            Some(labels) => labels.clone(),
            None => (0..cols).map(|j| j.to_string()).collect(),
        };
        let y_labels: Vec<String> = match &hm.y_labels {
            Some(labels) => labels.clone(),
            None => (0..rows).map(|i| i.to_string()).collect(),
        };

        // Reserve room for tick labels and the colorbar before laying
        // out the cell grid.
        let mut rect = content;
        if figure.show_axis {
            let y_label_w = y_labels
                .iter()
                .map(|l| text_width(l, axis_fs))
                .fold(0.0, f64::max);
            let x_label_w = x_labels
                .iter()
                .map(|l| text_width(l, axis_fs))
                .fold(0.0, f64::max);
            let left = y_label_w + 10.0;
            let bottom = x_label_w * std::f64::consts::FRAC_1_SQRT_2 + axis_fs + 10.0;
            rect = rect.inset(left, bottom, 4.0, 4.0);
        }
        let grid_rect = if hm.color_bar {
            let label_w = 8.0 + 4.0 * axis_fs * 0.5 + 6.0;
            let reserve = COLORBAR_GAP
                + COLORBAR_WIDTH
                + label_w
                + if hm.color_bar_label.is_empty() {
                    0.0
                } else {
                    axis_fs * 1.4
                };
            Rect {
                x: rect.x,
                y: rect.y,
                w: (rect.w - reserve).max(1.0),
                h: rect.h,
            }
        } else {
            rect
        };

        let (lo, hi) = hm.resolved_limits();
        let denom = (hi - lo).max(f64::EPSILON);
        let cell_w = grid_rect.w / cols as f64;
        let cell_h = grid_rect.h / rows as f64;

        // (1) color-mapped cell grid, top row first
        for (i, row) in hm.data.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                let t = ((v - lo) / denom) as f32;
                let color = hm.colormap.map_value(t);
                let x = grid_rect.x + j as f64 * cell_w;
                let y = grid_rect.y + (rows - 1 - i) as f64 * cell_h;
                layer.set_fill_color(rgb(vec3_rgb(color)));
                layer.add_shape(polygon_shape(
                    &[
                        (x, y),
                        (x + cell_w, y),
                        (x + cell_w, y + cell_h),
                        (x, y + cell_h),
                    ],
                    true,
                    false,
                ));
            }
        }

        // (2) colorbar
        if hm.color_bar {
            self.draw_colorbar(layer, font, hm, grid_rect, lo, hi);
        }

        // (3) per-cell value text
        layer.set_fill_color(rgb((0.0, 0.0, 0.0)));
        for (i, row) in hm.data.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                let label = hm.format_value(v);
                let tw = text_width(&label, hm.value_font_size);
                let cx = grid_rect.x + (j as f64 + 0.5) * cell_w;
                let cy = grid_rect.y + (rows as f64 - i as f64 - 0.5) * cell_h;
                draw_text(
                    layer,
                    font,
                    hm.value_font_size,
                    cx - tw * 0.5,
                    cy - hm.value_font_size * 0.35,
                    &label,
                );
            }
        }

        // (4) spines
        if hm.spines {
            layer.set_outline_color(rgb((0.0, 0.0, 0.0)));
            layer.set_outline_thickness(if hm.grid { hm.grid_line_width } else { 0.8 });
            layer.add_shape(polygon_shape(
                &[
                    (grid_rect.x, grid_rect.y),
                    (grid_rect.right(), grid_rect.y),
                    (grid_rect.right(), grid_rect.top()),
                    (grid_rect.x, grid_rect.top()),
                ],
                false,
                true,
            ));
        }

        // (5) tick marks
        if hm.ticks && figure.show_axis {
            layer.set_outline_color(rgb((0.0, 0.0, 0.0)));
            layer.set_outline_thickness(0.8);
            for j in 0..cols {
                let x = grid_rect.x + (j as f64 + 0.5) * cell_w;
                layer.add_shape(segment_shape((x, grid_rect.y), (x, grid_rect.y - 3.5)));
            }
            for i in 0..rows {
                let y = grid_rect.y + (rows as f64 - i as f64 - 0.5) * cell_h;
                layer.add_shape(segment_shape((grid_rect.x, y), (grid_rect.x - 3.5, y)));
            }
        }

        // (6) minor gridlines between cells, borders included
        if hm.grid {
            layer.set_outline_color(rgb(vec4_rgb(hm.grid_color)));
            layer.set_outline_thickness(hm.grid_line_width);
            for j in 0..=cols {
                let x = grid_rect.x + j as f64 * cell_w;
                layer.add_shape(segment_shape((x, grid_rect.y), (x, grid_rect.top())));
            }
            for i in 0..=rows {
                let y = grid_rect.y + i as f64 * cell_h;
                layer.add_shape(segment_shape((grid_rect.x, y), (grid_rect.right(), y)));
            }
        }

        // (7) tick labels; without an axis the figure stays bare
        if figure.show_axis {
            layer.set_fill_color(rgb((0.0, 0.0, 0.0)));
            for (j, label) in x_labels.iter().enumerate() {
                let cx = grid_rect.x + (j as f64 + 0.5) * cell_w;
                let anchor_y = grid_rect.y - 6.0;
                // Rotated 45 degrees, anchored at the right end so the
                // text slants up toward its tick.
                let tw = text_width(label, axis_fs);
                let dx = tw * std::f64::consts::FRAC_1_SQRT_2;
                draw_text_rotated(
                    layer,
                    font,
                    axis_fs,
                    cx - dx,
                    anchor_y - dx,
                    45.0,
                    label,
                );
            }
            for (i, label) in y_labels.iter().enumerate() {
                let tw = text_width(label, axis_fs);
                let cy = grid_rect.y + (rows as f64 - i as f64 - 0.5) * cell_h;
                draw_text(
                    layer,
                    font,
                    axis_fs,
                    grid_rect.x - 6.0 - tw,
                    cy - axis_fs * 0.35,
                    label,
                );
            }
        }
    }

    fn draw_colorbar(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        hm: &HeatmapPlot,
        grid_rect: Rect,
        lo: f64,
        hi: f64,
    ) {
        let bar = Rect {
            x: grid_rect.right() + COLORBAR_GAP,
            y: grid_rect.y,
            w: COLORBAR_WIDTH,
            h: grid_rect.h,
        };

        let slice_h = bar.h / COLORBAR_SLICES as f64;
        for k in 0..COLORBAR_SLICES {
            let t = (k as f32 + 0.5) / COLORBAR_SLICES as f32;
            let color = hm.colormap.map_value(t);
            let y = bar.y + k as f64 * slice_h;
            layer.set_fill_color(rgb(vec3_rgb(color)));
            layer.add_shape(polygon_shape(
                &[
                    (bar.x, y),
                    (bar.right(), y),
                    (bar.right(), y + slice_h),
                    (bar.x, y + slice_h),
                ],
                true,
                false,
            ));
        }

        // Frame width matches the gridline width, as on the cell grid.
        layer.set_outline_color(rgb((0.0, 0.0, 0.0)));
        layer.set_outline_thickness(hm.grid_line_width);
        layer.add_shape(polygon_shape(
            &[
                (bar.x, bar.y),
                (bar.right(), bar.y),
                (bar.right(), bar.top()),
                (bar.x, bar.top()),
            ],
            false,
            true,
        ));

        let fs = hm.axis_font_size;
        layer.set_fill_color(rgb((0.0, 0.0, 0.0)));
        let hi_label = fmt_tick(hi);
        let lo_label = fmt_tick(lo);
        draw_text(layer, font, fs, bar.right() + 4.0, bar.top() - fs * 0.7, &hi_label);
        draw_text(layer, font, fs, bar.right() + 4.0, bar.y, &lo_label);

        if !hm.color_bar_label.is_empty() {
            let label_x = bar.right()
                + 8.0
                + text_width(&hi_label, fs).max(text_width(&lo_label, fs));
            let tw = text_width(&hm.color_bar_label, fs);
            // Rotated -90 so the label reads downward along the bar.
            draw_text_rotated(
                layer,
                font,
                fs,
                label_x,
                bar.y + bar.h * 0.5 + tw * 0.5,
                -90.0,
                &hm.color_bar_label,
            );
        }
    }

    fn draw_legend(
        &self,
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        legend: &Legend,
        content: Rect,
    ) {
        if legend.entries.is_empty() {
            return;
        }
        let style = &legend.style;
        let fs = style.font_size;
        let entry_h = fs * 1.2 + style.label_spacing * fs;
        let pad = style.border_pad * fs;
        let handle_w = (style.handle_length * fs).max(2.0);
        let gap = style.handle_text_pad * fs;
        let text_w = legend
            .entries
            .iter()
            .map(|e| text_width(&e.label, fs))
            .fold(0.0, f64::max);

        let box_w = pad * 2.0 + handle_w + gap + text_w;
        let box_h = pad * 2.0 + legend.entries.len() as f64 * entry_h;
        let inset = 6.0;
        let (bx, by) = match style.location {
            LegendLocation::LowerRight => (content.right() - inset - box_w, content.y + inset),
            LegendLocation::LowerLeft => (content.x + inset, content.y + inset),
            LegendLocation::UpperRight => (
                content.right() - inset - box_w,
                content.top() - inset - box_h,
            ),
            LegendLocation::UpperLeft => (content.x + inset, content.top() - inset - box_h),
        };

        // Frame; the fill emulates the frame alpha over a light page.
        let frame_fill = blend(Vec4::new(1.0, 1.0, 1.0, 1.0), style.frame_alpha);
        layer.set_fill_color(rgb(frame_fill));
        layer.set_outline_color(rgb((0.6, 0.6, 0.6)));
        layer.set_outline_thickness(0.8);
        layer.add_shape(polygon_shape(
            &[
                (bx, by),
                (bx + box_w, by),
                (bx + box_w, by + box_h),
                (bx, by + box_h),
            ],
            true,
            true,
        ));

        for (i, entry) in legend.entries.iter().enumerate() {
            let cy = by + box_h - pad - (i as f64 + 0.5) * entry_h;
            let radius =
                ((entry.marker_size.max(0.0)).sqrt() * 0.5 * style.marker_scale).max(1.0);
            draw_marker(
                layer,
                entry.marker,
                bx + pad + handle_w * 0.5,
                cy,
                radius,
                blend(entry.color, entry.alpha),
                0.8,
            );
            layer.set_fill_color(rgb((0.0, 0.0, 0.0)));
            draw_text(
                layer,
                font,
                fs,
                bx + pad + handle_w + gap,
                cy - fs * 0.35,
                &entry.label,
            );
        }
    }
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Points-space rectangle, origin at the lower-left page corner.
#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Rect {
    fn right(&self) -> f64 {
        self.x + self.w
    }

    fn top(&self) -> f64 {
        self.y + self.h
    }

    fn inset(&self, left: f64, bottom: f64, right: f64, top: f64) -> Rect {
        Rect {
            x: self.x + left,
            y: self.y + bottom,
            w: (self.w - left - right).max(1.0),
            h: (self.h - bottom - top).max(1.0),
        }
    }
}

/// Linear map from data space into a page rectangle.
struct Mapper {
    bounds: BoundingBox,
    rect: Rect,
}

impl Mapper {
    fn map(&self, x: f64, y: f64) -> (f64, f64) {
        let dx = self.bounds.width().max(f64::EPSILON);
        let dy = self.bounds.height().max(f64::EPSILON);
        (
            self.rect.x + (x - self.bounds.min_x) / dx * self.rect.w,
            self.rect.y + (y - self.bounds.min_y) / dy * self.rect.h,
        )
    }
}

fn draw_marker(
    layer: &PdfLayerReference,
    style: MarkerStyle,
    cx: f64,
    cy: f64,
    radius: f64,
    fill: (f64, f64, f64),
    stroke_width: f64,
) {
    match style.geometry(radius) {
        MarkerGeometry::Polygon(points) => {
            let translated: Vec<(f64, f64)> =
                points.iter().map(|&(x, y)| (cx + x, cy + y)).collect();
            layer.set_fill_color(rgb(fill));
            layer.add_shape(polygon_shape(&translated, true, false));
        }
        MarkerGeometry::Segments(segments) => {
            layer.set_outline_color(rgb(fill));
            layer.set_outline_thickness(stroke_width.max(0.3));
            for [a, b] in segments {
                layer.add_shape(segment_shape((cx + a.0, cy + a.1), (cx + b.0, cy + b.1)));
            }
        }
    }
}

fn polygon_shape(points: &[(f64, f64)], fill: bool, stroke: bool) -> Line {
    Line {
        points: points.iter().map(|&(x, y)| (point(x, y), false)).collect(),
        is_closed: true,
        has_fill: fill,
        has_stroke: stroke,
        is_clipping_path: false,
    }
}

fn segment_shape(a: (f64, f64), b: (f64, f64)) -> Line {
    Line {
        points: vec![(point(a.0, a.1), false), (point(b.0, b.1), false)],
        is_closed: false,
        has_fill: false,
        has_stroke: true,
        is_clipping_path: false,
    }
}

fn draw_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    size: f64,
    x: f64,
    y: f64,
    text: &str,
) {
    layer.begin_text_section();
    layer.set_font(font, size);
    layer.set_text_cursor(mm(x), mm(y));
    layer.write_text(text, font);
    layer.end_text_section();
}

fn draw_text_rotated(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    size: f64,
    x: f64,
    y: f64,
    degrees: f64,
    text: &str,
) {
    layer.begin_text_section();
    layer.set_font(font, size);
    layer.set_text_matrix(TextMatrix::TranslateRotate(Pt(x), Pt(y), degrees));
    layer.write_text(text, font);
    layer.end_text_section();
}

fn mm(pt: f64) -> Mm {
    Mm(pt * MM_PER_PT)
}

fn point(x_pt: f64, y_pt: f64) -> Point {
    Point::new(mm(x_pt), mm(y_pt))
}

fn rgb(c: (f64, f64, f64)) -> Color {
    Color::Rgb(Rgb::new(c.0, c.1, c.2, None))
}

fn vec3_rgb(c: Vec3) -> (f64, f64, f64) {
    (c.x as f64, c.y as f64, c.z as f64)
}

fn vec4_rgb(c: Vec4) -> (f64, f64, f64) {
    (c.x as f64, c.y as f64, c.z as f64)
}

/// Blend a color toward white by its alpha value.
fn blend(color: Vec4, alpha: f64) -> (f64, f64, f64) {
    let a = alpha.clamp(0.0, 1.0);
    (
        color.x as f64 * a + (1.0 - a),
        color.y as f64 * a + (1.0 - a),
        color.z as f64 * a + (1.0 - a),
    )
}

fn backend<E: std::fmt::Display>(err: E) -> PlotError {
    PlotError::Backend(err.to_string())
}

/// Width estimate for the builtin face, in points.
fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * 0.5
}

/// Round a step to a "nice" number: 1, 2, or 5 times a power of ten.
fn nice_step(x: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    let exp = x.log10().floor();
    let base = 10f64.powf(exp);
    let mant = x / base;
    let nice = if mant < 2.0 {
        2.0
    } else if mant < 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Nice tick positions covering [min, max].
fn nice_ticks(min: f64, max: f64, desired: usize) -> Vec<f64> {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return vec![min];
    }
    let step = nice_step(span / desired.max(1) as f64);
    let mut ticks = Vec::new();
    let mut v = (min / step).ceil() * step;
    while v <= max + step * 1e-9 {
        ticks.push(v);
        v += step;
    }
    ticks
}

fn fmt_tick(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e12 {
        format!("{}", v as i64)
    } else {
        let s = format!("{v:.4}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_step_rounding() {
        assert!((nice_step(0.13) - 0.2).abs() < 1e-12);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(7.0), 10.0);
        assert_eq!(nice_step(0.0), 1.0);
    }

    #[test]
    fn test_nice_ticks_cover_span() {
        let ticks = nice_ticks(0.0, 10.0, 6);
        assert!(ticks.len() >= 4);
        assert!(ticks.first().unwrap() >= &0.0);
        assert!(ticks.last().unwrap() <= &10.0);
    }

    #[test]
    fn test_nice_ticks_degenerate_span() {
        assert_eq!(nice_ticks(2.0, 2.0, 6), vec![2.0]);
    }

    #[test]
    fn test_tick_formatting() {
        assert_eq!(fmt_tick(3.0), "3");
        assert_eq!(fmt_tick(-1.0), "-1");
        assert_eq!(fmt_tick(0.25), "0.25");
    }

    #[test]
    fn test_alpha_blend_toward_white() {
        let c = Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(blend(c, 1.0), (0.0, 0.0, 0.0));
        assert_eq!(blend(c, 0.0), (1.0, 1.0, 1.0));
        let (r, g, b) = blend(c, 0.5);
        assert!((r - 0.5).abs() < 1e-12 && (g - 0.5).abs() < 1e-12 && (b - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_mapper_is_linear_in_rect() {
        let mapper = Mapper {
            bounds: BoundingBox {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 10.0,
                max_y: 5.0,
            },
            rect: Rect {
                x: 100.0,
                y: 50.0,
                w: 200.0,
                h: 100.0,
            },
        };
        assert_eq!(mapper.map(0.0, 0.0), (100.0, 50.0));
        assert_eq!(mapper.map(10.0, 5.0), (300.0, 150.0));
        assert_eq!(mapper.map(5.0, 2.5), (200.0, 100.0));
    }
}
