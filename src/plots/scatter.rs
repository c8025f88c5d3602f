//! Scatter cluster: one set of points sharing a color and marker.
//!
//! A grouped figure is assembled from several clusters, one per
//! partition of the input data.

use crate::error::{PlotError, Result};
use glam::Vec4;

/// A single styled point cluster.
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    /// Raw data points (x, y coordinates)
    pub x_data: Vec<f64>,
    pub y_data: Vec<f64>,

    /// Visual styling
    pub color: Vec4,
    /// Marker area in printer's points squared.
    pub marker_size: f64,
    pub marker_style: MarkerStyle,
    /// Alpha blending value in [0, 1].
    pub alpha: f64,
    /// Stroke width for marker edges and stroke-only markers.
    pub edge_width: f64,

    /// Metadata
    pub label: Option<String>,
    pub visible: bool,
}

impl ScatterPlot {
    /// Create a new cluster. An empty cluster is allowed: a grouped
    /// figure draws one cluster per label combination, including
    /// combinations with no points, so legend entries stay aligned
    /// with the declared label counts.
    pub fn new(x_data: Vec<f64>, y_data: Vec<f64>) -> Result<Self> {
        if x_data.len() != y_data.len() {
            return Err(PlotError::invalid(format!(
                "Data length mismatch: x_data has {} points, y_data has {} points",
                x_data.len(),
                y_data.len()
            )));
        }

        Ok(Self {
            x_data,
            y_data,
            color: Vec4::new(0.2, 0.2, 0.2, 1.0),
            marker_size: 10.0,
            marker_style: MarkerStyle::default(),
            alpha: 0.8,
            edge_width: 0.5,
            label: None,
            visible: true,
        })
    }

    /// Create a cluster with custom styling
    pub fn with_style(mut self, color: Vec4, marker_size: f64, marker_style: MarkerStyle) -> Self {
        self.color = color;
        self.marker_size = marker_size.max(0.1);
        self.marker_style = marker_style;
        self
    }

    /// Set the cluster label for legends
    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_edge_width(mut self, width: f64) -> Self {
        self.edge_width = width.max(0.0);
        self
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Get the number of data points
    pub fn len(&self) -> usize {
        self.x_data.len()
    }

    /// Check if the cluster has no data
    pub fn is_empty(&self) -> bool {
        self.x_data.is_empty()
    }

    /// Marker radius in printer's points, derived from the area-style
    /// size parameter.
    pub fn marker_radius(&self) -> f64 {
        (self.marker_size.max(0.0)).sqrt() * 0.5
    }
}

/// Marker styles for scatter clusters. The cycle used by grouped
/// figures covers all fourteen variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    Circle,
    Cross,
    Square,
    Star,
    TriangleUp,
    TriUp,
    Diamond,
    Plus,
    TriangleDown,
    TriangleLeft,
    TriangleRight,
    Octagon,
    TriDown,
    Hexagon,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self::Circle
    }
}

/// Drawable outline of a marker, centered on the data point.
#[derive(Debug, Clone)]
pub enum MarkerGeometry {
    /// Closed filled polygon.
    Polygon(Vec<(f64, f64)>),
    /// Stroke-only line segments (cross, plus, tripod markers).
    Segments(Vec<[(f64, f64); 2]>),
}

impl MarkerStyle {
    /// Whether the marker is drawn as a filled shape.
    pub fn is_filled(&self) -> bool {
        !matches!(
            self,
            MarkerStyle::Cross | MarkerStyle::Plus | MarkerStyle::TriUp | MarkerStyle::TriDown
        )
    }

    /// Outline of the marker at the given radius, centered on (0, 0).
    pub fn geometry(&self, radius: f64) -> MarkerGeometry {
        let r = radius.max(0.1);
        match self {
            MarkerStyle::Circle => MarkerGeometry::Polygon(regular_polygon(r, 16, 0.0)),
            MarkerStyle::Square => {
                // Side chosen so the square covers roughly the same
                // area as the circle of the same radius.
                let h = r * 0.886;
                MarkerGeometry::Polygon(vec![(-h, -h), (h, -h), (h, h), (-h, h)])
            }
            MarkerStyle::Diamond => {
                // Thin diamond, width 0.6 of the height.
                MarkerGeometry::Polygon(vec![(0.0, r), (0.6 * r, 0.0), (0.0, -r), (-0.6 * r, 0.0)])
            }
            MarkerStyle::TriangleUp => MarkerGeometry::Polygon(triangle(r, 90.0)),
            MarkerStyle::TriangleDown => MarkerGeometry::Polygon(triangle(r, -90.0)),
            MarkerStyle::TriangleLeft => MarkerGeometry::Polygon(triangle(r, 180.0)),
            MarkerStyle::TriangleRight => MarkerGeometry::Polygon(triangle(r, 0.0)),
            MarkerStyle::Hexagon => MarkerGeometry::Polygon(regular_polygon(r, 6, 90.0)),
            MarkerStyle::Octagon => MarkerGeometry::Polygon(regular_polygon(r, 8, 22.5)),
            MarkerStyle::Star => MarkerGeometry::Polygon(star(r, 5, 0.4)),
            MarkerStyle::Plus => {
                MarkerGeometry::Segments(vec![[(-r, 0.0), (r, 0.0)], [(0.0, -r), (0.0, r)]])
            }
            MarkerStyle::Cross => {
                let d = r * std::f64::consts::FRAC_1_SQRT_2;
                MarkerGeometry::Segments(vec![[(-d, -d), (d, d)], [(-d, d), (d, -d)]])
            }
            MarkerStyle::TriUp => MarkerGeometry::Segments(tripod(r, 90.0)),
            MarkerStyle::TriDown => MarkerGeometry::Segments(tripod(r, -90.0)),
        }
    }
}

fn regular_polygon(radius: f64, sides: usize, phase_deg: f64) -> Vec<(f64, f64)> {
    let phase = phase_deg.to_radians();
    (0..sides)
        .map(|i| {
            let a = phase + (i as f64) * std::f64::consts::TAU / (sides as f64);
            (radius * a.cos(), radius * a.sin())
        })
        .collect()
}

fn triangle(radius: f64, apex_deg: f64) -> Vec<(f64, f64)> {
    regular_polygon(radius, 3, apex_deg)
}

fn star(radius: f64, points: usize, inner_frac: f64) -> Vec<(f64, f64)> {
    let inner = radius * inner_frac;
    (0..points * 2)
        .map(|i| {
            let a =
                std::f64::consts::FRAC_PI_2 + (i as f64) * std::f64::consts::PI / (points as f64);
            let r = if i % 2 == 0 { radius } else { inner };
            (r * a.cos(), r * a.sin())
        })
        .collect()
}

/// Three spokes from the center, first one at `apex_deg`.
fn tripod(radius: f64, apex_deg: f64) -> Vec<[(f64, f64); 2]> {
    triangle(radius, apex_deg)
        .into_iter()
        .map(|p| [(0.0, 0.0), p])
        .collect()
}
