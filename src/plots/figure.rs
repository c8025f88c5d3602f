//! Figure canvas: plot elements plus legend overlays.
//!
//! The figure is an explicit value owned by the caller. A render call
//! builds one, hands it to the exporter, and drops it; there is no
//! process-wide "current figure" state.

use crate::plots::heatmap::HeatmapPlot;
use crate::plots::scatter::{MarkerStyle, ScatterPlot};
use glam::Vec4;

/// Axis-aligned bounds of plotted data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Bounds of a point set; `None` when no finite point exists.
    pub fn from_xy(x_data: &[f64], y_data: &[f64]) -> Option<Self> {
        let mut bounds: Option<BoundingBox> = None;
        for (&x, &y) in x_data.iter().zip(y_data.iter()) {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            bounds = Some(match bounds {
                None => BoundingBox {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                },
                Some(b) => BoundingBox {
                    min_x: b.min_x.min(x),
                    min_y: b.min_y.min(y),
                    max_x: b.max_x.max(x),
                    max_y: b.max_y.max(y),
                },
            });
        }
        bounds
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grow the box by a fraction of its extent on every side.
    /// Degenerate extents grow by one unit so the box stays usable.
    pub fn with_margin(&self, frac: f64) -> BoundingBox {
        let dx = (self.max_x - self.min_x).max(f64::EPSILON);
        let dy = (self.max_y - self.min_y).max(f64::EPSILON);
        let mx = if dx <= f64::EPSILON { 0.5 } else { dx * frac };
        let my = if dy <= f64::EPSILON { 0.5 } else { dy * frac };
        BoundingBox {
            min_x: self.min_x - mx,
            min_y: self.min_y - my,
            max_x: self.max_x + mx,
            max_y: self.max_y + my,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A plot element on the canvas.
#[derive(Debug, Clone)]
pub enum PlotElement {
    Scatter(ScatterPlot),
    Heatmap(HeatmapPlot),
}

impl PlotElement {
    pub fn is_visible(&self) -> bool {
        match self {
            PlotElement::Scatter(plot) => plot.visible,
            PlotElement::Heatmap(plot) => plot.visible,
        }
    }

    pub fn label(&self) -> Option<String> {
        match self {
            PlotElement::Scatter(plot) => plot.label.clone(),
            PlotElement::Heatmap(plot) => plot.label.clone(),
        }
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        match self {
            PlotElement::Scatter(plot) => BoundingBox::from_xy(&plot.x_data, &plot.y_data),
            PlotElement::Heatmap(plot) => {
                if plot.is_empty() {
                    None
                } else {
                    Some(BoundingBox {
                        min_x: 0.0,
                        min_y: 0.0,
                        max_x: plot.cols() as f64,
                        max_y: plot.rows() as f64,
                    })
                }
            }
        }
    }
}

/// Corner placement of a legend overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendLocation {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

/// One legend row: a marker handle paired with its name.
#[derive(Debug, Clone)]
pub struct LegendEntry {
    pub label: String,
    pub color: Vec4,
    pub marker: MarkerStyle,
    /// Marker area of the originating cluster, in points squared.
    pub marker_size: f64,
    /// Alpha of the originating cluster; legend handles match it.
    pub alpha: f64,
}

/// Legend cosmetics; spacing values are in font-size units, matching
/// the conventions of publication figure tooling.
#[derive(Debug, Clone)]
pub struct LegendStyle {
    pub location: LegendLocation,
    pub font_size: f64,
    pub label_spacing: f64,
    pub handle_text_pad: f64,
    pub handle_length: f64,
    pub border_pad: f64,
    pub marker_scale: f64,
    pub fancybox: bool,
    pub frame_alpha: f64,
}

impl Default for LegendStyle {
    fn default() -> Self {
        Self {
            location: LegendLocation::LowerRight,
            font_size: 15.0,
            label_spacing: 0.0,
            handle_text_pad: 0.2,
            handle_length: 0.4,
            border_pad: 0.2,
            marker_scale: 1.0,
            fancybox: true,
            frame_alpha: 0.5,
        }
    }
}

impl LegendStyle {
    pub fn with_location(mut self, location: LegendLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size.max(1.0);
        self
    }
}

/// A legend overlay. Figures may carry several, each placed
/// independently; adding one never replaces another.
#[derive(Debug, Clone)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
    pub style: LegendStyle,
}

/// A figure that contains plot elements and legend overlays.
#[derive(Debug, Clone)]
pub struct Figure {
    plots: Vec<PlotElement>,
    legends: Vec<Legend>,

    /// Page size in inches.
    pub width_in: f64,
    pub height_in: f64,
    pub show_axis: bool,
    pub axis_font_size: f64,
    /// Extra margin around the content, in inches.
    pub pad_inches: f64,
    /// Transparent page background (no background rectangle).
    pub transparent: bool,
}

impl Figure {
    /// Create a new empty figure
    pub fn new() -> Self {
        Self {
            plots: Vec::new(),
            legends: Vec::new(),
            width_in: 6.0,
            height_in: 4.0,
            show_axis: false,
            axis_font_size: 10.0,
            pad_inches: 0.0,
            transparent: true,
        }
    }

    /// Set the page size in inches.
    pub fn with_size(mut self, width_in: f64, height_in: f64) -> Self {
        self.width_in = width_in.max(0.1);
        self.height_in = height_in.max(0.1);
        self
    }

    pub fn with_axis(mut self, show: bool) -> Self {
        self.show_axis = show;
        self
    }

    pub fn with_axis_font_size(mut self, size: f64) -> Self {
        self.axis_font_size = size.max(1.0);
        self
    }

    pub fn with_pad_inches(mut self, pad: f64) -> Self {
        self.pad_inches = pad.max(0.0);
        self
    }

    /// Add a scatter cluster to the figure
    pub fn add_scatter_plot(&mut self, plot: ScatterPlot) -> usize {
        self.plots.push(PlotElement::Scatter(plot));
        self.plots.len() - 1
    }

    /// Add a heatmap to the figure
    pub fn add_heatmap(&mut self, plot: HeatmapPlot) -> usize {
        self.plots.push(PlotElement::Heatmap(plot));
        self.plots.len() - 1
    }

    /// Add a legend overlay alongside any existing ones.
    pub fn add_legend(&mut self, legend: Legend) {
        self.legends.push(legend);
    }

    /// Get the number of plot elements
    pub fn len(&self) -> usize {
        self.plots.len()
    }

    /// Check if the figure has no plot elements
    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    /// Iterate over all plot elements in this figure
    pub fn plots(&self) -> impl Iterator<Item = &PlotElement> {
        self.plots.iter()
    }

    pub fn legends(&self) -> &[Legend] {
        &self.legends
    }

    /// Combined bounds of all visible elements.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let mut combined: Option<BoundingBox> = None;
        for plot in &self.plots {
            if !plot.is_visible() {
                continue;
            }
            if let Some(b) = plot.bounds() {
                combined = Some(match combined {
                    None => b,
                    Some(existing) => existing.union(&b),
                });
            }
        }
        combined
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plots::scatter::ScatterPlot;

    #[test]
    fn test_figure_creation() {
        let figure = Figure::new();

        assert_eq!(figure.len(), 0);
        assert!(figure.is_empty());
        assert!(figure.transparent);
        assert_eq!(figure.pad_inches, 0.0);
        assert_eq!((figure.width_in, figure.height_in), (6.0, 4.0));
    }

    #[test]
    fn test_bounds_union_across_clusters() {
        let mut figure = Figure::new();
        figure.add_scatter_plot(ScatterPlot::new(vec![-1.0, 0.0], vec![-2.0, 0.0]).unwrap());
        figure.add_scatter_plot(ScatterPlot::new(vec![2.0, 4.0], vec![1.0, 5.0]).unwrap());

        let bounds = figure.bounds().unwrap();
        assert_eq!(bounds.min_x, -1.0);
        assert_eq!(bounds.max_x, 4.0);
        assert_eq!(bounds.min_y, -2.0);
        assert_eq!(bounds.max_y, 5.0);
    }

    #[test]
    fn test_hidden_clusters_ignored_in_bounds() {
        let mut figure = Figure::new();
        let mut hidden = ScatterPlot::new(vec![100.0], vec![100.0]).unwrap();
        hidden.set_visible(false);
        figure.add_scatter_plot(hidden);
        figure.add_scatter_plot(ScatterPlot::new(vec![0.0, 1.0], vec![0.0, 1.0]).unwrap());

        let bounds = figure.bounds().unwrap();
        assert_eq!(bounds.max_x, 1.0);
    }

    #[test]
    fn test_non_finite_points_skipped_in_bounds() {
        let b = BoundingBox::from_xy(&[0.0, f64::NAN, 2.0], &[1.0, 5.0, f64::INFINITY]);
        let b = b.unwrap();
        assert_eq!((b.min_x, b.max_x), (0.0, 0.0));
        assert_eq!((b.min_y, b.max_y), (1.0, 1.0));
    }

    #[test]
    fn test_margin_on_degenerate_extent() {
        let b = BoundingBox::from_xy(&[1.0], &[1.0]).unwrap().with_margin(0.05);
        assert!(b.width() > 0.0);
        assert!(b.height() > 0.0);
    }

    #[test]
    fn test_legends_accumulate() {
        let mut figure = Figure::new();
        figure.add_legend(Legend {
            entries: vec![],
            style: LegendStyle::default(),
        });
        figure.add_legend(Legend {
            entries: vec![],
            style: LegendStyle::default().with_location(LegendLocation::UpperLeft),
        });
        assert_eq!(figure.legends().len(), 2);
    }
}
