//! Annotated heatmap: a color-mapped matrix with optional per-cell
//! value text, gridlines, spines, tick labels, and a colorbar.

use crate::error::{PlotError, Result};
use crate::export::pdf::PdfExporter;
use crate::plots::figure::Figure;
use glam::{Vec3, Vec4};
use std::path::{Path, PathBuf};

/// Sequential and diverging color maps for scalar data.
///
/// Each map takes a normalized value in [0, 1] and is approximated by
/// linear interpolation between a handful of anchor colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMap {
    /// Sequential yellow-green, the default for heatmaps.
    YlGn,
    Viridis,
    Plasma,
    Inferno,
    Magma,
    Gray,
    Hot,
    Cool,
    Jet,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::YlGn
    }
}

impl ColorMap {
    /// Map a normalized value [0,1] to a color
    pub fn map_value(&self, t: f32) -> Vec3 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };

        match self {
            ColorMap::YlGn => lerp_stops(
                t,
                &[
                    (1.000, 1.000, 0.898),
                    (0.851, 0.941, 0.639),
                    (0.478, 0.776, 0.474),
                    (0.137, 0.518, 0.263),
                    (0.000, 0.271, 0.161),
                ],
            ),
            ColorMap::Viridis => lerp_stops(
                t,
                &[
                    (0.267, 0.005, 0.329),
                    (0.229, 0.322, 0.546),
                    (0.128, 0.567, 0.551),
                    (0.369, 0.789, 0.383),
                    (0.993, 0.906, 0.144),
                ],
            ),
            ColorMap::Plasma => lerp_stops(
                t,
                &[
                    (0.050, 0.030, 0.528),
                    (0.494, 0.012, 0.658),
                    (0.798, 0.280, 0.470),
                    (0.973, 0.586, 0.252),
                    (0.940, 0.975, 0.131),
                ],
            ),
            ColorMap::Inferno => lerp_stops(
                t,
                &[
                    (0.001, 0.000, 0.014),
                    (0.342, 0.062, 0.429),
                    (0.735, 0.216, 0.330),
                    (0.978, 0.557, 0.034),
                    (0.988, 0.998, 0.645),
                ],
            ),
            ColorMap::Magma => lerp_stops(
                t,
                &[
                    (0.001, 0.000, 0.014),
                    (0.316, 0.072, 0.485),
                    (0.716, 0.215, 0.475),
                    (0.987, 0.536, 0.382),
                    (0.987, 0.991, 0.750),
                ],
            ),
            ColorMap::Gray => Vec3::splat(t),
            ColorMap::Hot => lerp_stops(
                t,
                &[
                    (0.0, 0.0, 0.0),
                    (1.0, 0.0, 0.0),
                    (1.0, 1.0, 0.0),
                    (1.0, 1.0, 1.0),
                ],
            ),
            ColorMap::Cool => lerp_stops(t, &[(0.0, 1.0, 1.0), (1.0, 0.0, 1.0)]),
            ColorMap::Jet => lerp_stops(
                t,
                &[
                    (0.0, 0.0, 0.5),
                    (0.0, 0.0, 1.0),
                    (0.0, 1.0, 1.0),
                    (1.0, 1.0, 0.0),
                    (1.0, 0.0, 0.0),
                    (0.5, 0.0, 0.0),
                ],
            ),
        }
    }
}

/// Interpolate between evenly spaced anchor colors.
fn lerp_stops(t: f32, stops: &[(f32, f32, f32)]) -> Vec3 {
    let last = stops.len() - 1;
    let pos = t * last as f32;
    let i = (pos.floor() as usize).min(last.saturating_sub(1));
    let frac = pos - i as f32;
    let (r0, g0, b0) = stops[i];
    let (r1, g1, b1) = stops[i + 1];
    Vec3::new(
        r0 + (r1 - r0) * frac,
        g0 + (g1 - g0) * frac,
        b0 + (b1 - b0) * frac,
    )
}

/// Heatmap renderer over a rectangular numeric matrix.
#[derive(Debug, Clone)]
pub struct HeatmapPlot {
    /// Matrix rows, top row first.
    pub data: Vec<Vec<f64>>,
    rows: usize,
    cols: usize,

    pub colormap: ColorMap,
    /// Lower color-scale bound; auto-scaled to the data minimum when unset.
    pub vmin: Option<f64>,
    /// Upper color-scale bound; auto-scaled to the data maximum when unset.
    pub vmax: Option<f64>,
    /// Decimal places of the per-cell value text.
    pub precision: usize,

    pub show_axis: bool,
    pub spines: bool,
    pub ticks: bool,
    pub x_labels: Option<Vec<String>>,
    pub y_labels: Option<Vec<String>>,

    pub color_bar: bool,
    pub color_bar_label: String,

    pub grid: bool,
    pub grid_color: Vec4,
    /// Gridline width in printer's points.
    pub grid_line_width: f64,

    /// Figure size in inches.
    pub figsize: (f64, f64),
    pub axis_font_size: f64,
    pub value_font_size: f64,

    pub label: Option<String>,
    pub visible: bool,
}

impl HeatmapPlot {
    /// Create a heatmap from matrix rows. All rows must have the same
    /// length; the matrix itself may be empty.
    pub fn new(data: Vec<Vec<f64>>) -> Result<Self> {
        let rows = data.len();
        let cols = data.first().map_or(0, |r| r.len());
        if data.iter().any(|r| r.len() != cols) {
            return Err(PlotError::invalid(
                "heatmap rows must all have the same length.",
            ));
        }

        Ok(Self {
            data,
            rows,
            cols,
            colormap: ColorMap::default(),
            vmin: None,
            vmax: None,
            precision: 2,
            show_axis: false,
            spines: false,
            ticks: true,
            x_labels: None,
            y_labels: None,
            color_bar: false,
            color_bar_label: String::new(),
            grid: false,
            grid_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            grid_line_width: 2.0,
            figsize: (6.0, 4.0),
            axis_font_size: 10.0,
            value_font_size: 10.0,
            label: None,
            visible: true,
        })
    }

    pub fn with_colormap(mut self, colormap: ColorMap) -> Self {
        self.colormap = colormap;
        self
    }

    /// Fix the color-scale bounds instead of auto-scaling to the data.
    pub fn with_limits(mut self, vmin: Option<f64>, vmax: Option<f64>) -> Self {
        self.vmin = vmin;
        self.vmax = vmax;
        self
    }

    /// Decimal places of the per-cell value text.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Keep the axis with tick labels instead of hiding it.
    pub fn with_axis(mut self, show: bool) -> Self {
        self.show_axis = show;
        self
    }

    pub fn with_spines(mut self, spines: bool) -> Self {
        self.spines = spines;
        self
    }

    pub fn with_ticks(mut self, ticks: bool) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn with_x_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.x_labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_y_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.y_labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_color_bar<S: Into<String>>(mut self, label: S) -> Self {
        self.color_bar = true;
        self.color_bar_label = label.into();
        self
    }

    /// Overlay gridlines between cells.
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    pub fn with_grid_style(mut self, color: Vec4, line_width: f64) -> Self {
        self.grid_color = color;
        self.grid_line_width = line_width.max(0.0);
        self
    }

    pub fn with_figsize(mut self, width_in: f64, height_in: f64) -> Self {
        self.figsize = (width_in.max(0.1), height_in.max(0.1));
        self
    }

    pub fn with_axis_font_size(mut self, size: f64) -> Self {
        self.axis_font_size = size.max(1.0);
        self
    }

    pub fn with_value_font_size(mut self, size: f64) -> Self {
        self.value_font_size = size.max(1.0);
        self
    }

    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// The color-scale bounds actually used for rendering: the
    /// supplied vmin/vmax, with unset bounds auto-scaled to the finite
    /// data range. A matrix without finite values scales to [0, 1].
    pub fn resolved_limits(&self) -> (f64, f64) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for row in &self.data {
            for &v in row {
                if v.is_finite() {
                    lo = lo.min(v);
                    hi = hi.max(v);
                }
            }
        }
        if !lo.is_finite() || !hi.is_finite() {
            lo = 0.0;
            hi = 1.0;
        }
        (self.vmin.unwrap_or(lo), self.vmax.unwrap_or(hi))
    }

    /// Extra output padding in inches: proportional to the gridline
    /// width when the grid overlay is on, so border cells are not
    /// clipped; zero otherwise.
    pub fn pad_inches(&self) -> f64 {
        if self.grid {
            self.grid_line_width / 144.0
        } else {
            0.0
        }
    }

    /// Cell value formatted for the text overlay.
    pub fn format_value(&self, value: f64) -> String {
        format!("{:.*}", self.precision, value)
    }

    /// Color of a cell value under the resolved scale.
    pub fn cell_color(&self, value: f64) -> Vec3 {
        let (lo, hi) = self.resolved_limits();
        let denom = (hi - lo).max(f64::EPSILON);
        self.colormap.map_value(((value - lo) / denom) as f32)
    }

    fn validate(&self) -> Result<()> {
        if let Some(labels) = &self.x_labels {
            if labels.len() != self.cols {
                return Err(PlotError::invalid(
                    "The length of x_labels does not match data.",
                ));
            }
        }
        if let Some(labels) = &self.y_labels {
            if labels.len() != self.rows {
                return Err(PlotError::invalid(
                    "The length of y_labels does not match data.",
                ));
            }
        }
        Ok(())
    }

    /// Build the figure canvas for this heatmap.
    pub fn build_figure(&self) -> Result<Figure> {
        self.validate()?;
        let mut figure = Figure::new()
            .with_size(self.figsize.0, self.figsize.1)
            .with_axis(self.show_axis)
            .with_axis_font_size(self.axis_font_size)
            .with_pad_inches(self.pad_inches());
        figure.add_heatmap(self.clone());
        Ok(figure)
    }

    /// Render and write `<dir>/<stem>.pdf`, creating directories as
    /// needed and overwriting any existing file.
    pub fn save<P: AsRef<Path>>(&self, dir: P, stem: &str) -> Result<PathBuf> {
        let figure = self.build_figure()?;
        PdfExporter::new().save(&figure, dir, stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_matrix_rejected() {
        let err = HeatmapPlot::new(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, PlotError::InvalidArgument(_)));
    }

    #[test]
    fn test_limits_default_to_data_range() {
        let hm = HeatmapPlot::new(vec![vec![0.8, 2.4], vec![2.4, 0.0]]).unwrap();
        assert_eq!(hm.resolved_limits(), (0.0, 2.4));
    }

    #[test]
    fn test_supplied_limits_win_over_data() {
        let hm = HeatmapPlot::new(vec![vec![0.8, 2.4], vec![2.4, 0.0]])
            .unwrap()
            .with_limits(Some(-1.0), Some(5.0));
        assert_eq!(hm.resolved_limits(), (-1.0, 5.0));
    }

    #[test]
    fn test_partial_limits_mix_with_data_range() {
        let hm = HeatmapPlot::new(vec![vec![0.8, 2.4], vec![2.4, 0.0]])
            .unwrap()
            .with_limits(Some(0.5), None);
        assert_eq!(hm.resolved_limits(), (0.5, 2.4));
    }

    #[test]
    fn test_non_finite_matrix_falls_back() {
        let hm = HeatmapPlot::new(vec![vec![f64::NAN, f64::INFINITY]]).unwrap();
        assert_eq!(hm.resolved_limits(), (0.0, 1.0));
    }

    #[test]
    fn test_pad_inches_follows_grid() {
        let hm = HeatmapPlot::new(vec![vec![1.0]]).unwrap();
        assert_eq!(hm.pad_inches(), 0.0);

        let gridded = HeatmapPlot::new(vec![vec![1.0]]).unwrap().with_grid(true);
        assert!((gridded.pad_inches() - 2.0 / 144.0).abs() < 1e-12);

        let wide = HeatmapPlot::new(vec![vec![1.0]])
            .unwrap()
            .with_grid(true)
            .with_grid_style(glam::Vec4::ONE, 3.0);
        assert!((wide.pad_inches() - 3.0 / 144.0).abs() < 1e-12);
    }

    #[test]
    fn test_value_formatting() {
        let hm = HeatmapPlot::new(vec![vec![0.8]]).unwrap();
        assert_eq!(hm.format_value(0.8), "0.80");
        let hm = hm.with_precision(1);
        assert_eq!(hm.format_value(2.44), "2.4");
    }

    #[test]
    fn test_label_count_validation() {
        let hm = HeatmapPlot::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]])
            .unwrap()
            .with_axis(true)
            .with_x_labels(["a"]);
        assert!(matches!(
            hm.build_figure(),
            Err(PlotError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_ylgn_endpoints() {
        let low = ColorMap::YlGn.map_value(0.0);
        let high = ColorMap::YlGn.map_value(1.0);
        // Light yellow at the bottom of the scale, dark green at the top.
        assert!(low.x > 0.9 && low.y > 0.9);
        assert!(high.y > high.x && high.y < 0.5);
    }

    #[test]
    fn test_colormap_clamps_and_handles_nan() {
        let m = ColorMap::Viridis;
        assert_eq!(m.map_value(-1.0), m.map_value(0.0));
        assert_eq!(m.map_value(2.0), m.map_value(1.0));
        assert_eq!(m.map_value(f32::NAN), m.map_value(0.0));
    }

    #[test]
    fn test_cell_color_uses_resolved_scale() {
        let hm = HeatmapPlot::new(vec![vec![0.0, 10.0]])
            .unwrap()
            .with_colormap(ColorMap::Gray);
        let lo = hm.cell_color(0.0);
        let hi = hm.cell_color(10.0);
        assert!(lo.x < 0.01);
        assert!(hi.x > 0.99);
    }
}
