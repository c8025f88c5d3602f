//! Fixed palette and marker cycle used by grouped scatter figures.
//!
//! Labels index into the tables modulo their length, so any int64
//! label value maps to a stable color and marker.

use crate::error::{PlotError, Result};
use crate::plots::scatter::MarkerStyle;
use glam::Vec4;

/// Default color table: fourteen print-safe hex colors.
pub const DEFAULT_PALETTE: [&str; 14] = [
    "#377EB8", "#4DAF4A", "#984EA3", "#E93F3F", "#FF7F00", "#FFD92F", "#A65628", "#F781BF",
    "#C2BD2C", "#999999", "#66C2A5", "#8DA0CB", "#96A331", "#DDB375",
];

/// Default marker table, same length as the palette.
pub const DEFAULT_MARKERS: [MarkerStyle; 14] = [
    MarkerStyle::Circle,
    MarkerStyle::Cross,
    MarkerStyle::Square,
    MarkerStyle::Star,
    MarkerStyle::TriangleUp,
    MarkerStyle::TriUp,
    MarkerStyle::Diamond,
    MarkerStyle::Plus,
    MarkerStyle::TriangleDown,
    MarkerStyle::TriangleLeft,
    MarkerStyle::TriangleRight,
    MarkerStyle::Octagon,
    MarkerStyle::TriDown,
    MarkerStyle::Hexagon,
];

/// Parse a hex color like "#RRGGBB" into normalized RGBA.
pub fn hex_color(s: &str) -> Option<Vec4> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()? as f32 / 255.0;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()? as f32 / 255.0;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()? as f32 / 255.0;
    Some(Vec4::new(r, g, b, 1.0))
}

/// Ordered color lookup table.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Vec4>,
}

impl Palette {
    pub fn new(colors: Vec<Vec4>) -> Result<Self> {
        if colors.is_empty() {
            return Err(PlotError::invalid("palette must not be empty."));
        }
        Ok(Self { colors })
    }

    /// Build a palette from hex color codes.
    pub fn from_hex(codes: &[&str]) -> Result<Self> {
        let mut colors = Vec::with_capacity(codes.len());
        for code in codes {
            let color = hex_color(code)
                .ok_or_else(|| PlotError::invalid(format!("invalid hex color: {code}")))?;
            colors.push(color);
        }
        Self::new(colors)
    }

    /// Color for an int64 label, indexed modulo the table length.
    pub fn color_for(&self, label: i64) -> Vec4 {
        let idx = label.rem_euclid(self.colors.len() as i64) as usize;
        self.colors[idx]
    }

    pub fn first(&self) -> Vec4 {
        self.colors[0]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        // The defaults are known-valid hex codes.
        Self {
            colors: DEFAULT_PALETTE.iter().filter_map(|c| hex_color(c)).collect(),
        }
    }
}

/// Ordered marker lookup table.
#[derive(Debug, Clone)]
pub struct MarkerCycle {
    markers: Vec<MarkerStyle>,
}

impl MarkerCycle {
    pub fn new(markers: Vec<MarkerStyle>) -> Result<Self> {
        if markers.is_empty() {
            return Err(PlotError::invalid("marker cycle must not be empty."));
        }
        Ok(Self { markers })
    }

    /// Marker for an int64 label, indexed modulo the table length.
    pub fn marker_for(&self, label: i64) -> MarkerStyle {
        let idx = label.rem_euclid(self.markers.len() as i64) as usize;
        self.markers[idx]
    }

    pub fn first(&self) -> MarkerStyle {
        self.markers[0]
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl Default for MarkerCycle {
    fn default() -> Self {
        Self {
            markers: DEFAULT_MARKERS.to_vec(),
        }
    }
}
