//! Plot element types, the grouped scatter renderer, and the figure
//! canvas.

pub mod figure;
pub mod grouped;
pub mod heatmap;
pub mod scatter;

pub use figure::{
    BoundingBox, Figure, Legend, LegendEntry, LegendLocation, LegendStyle, PlotElement,
};
pub use grouped::{GroupedScatter, LabelArray, Partition};
pub use heatmap::{ColorMap, HeatmapPlot};
pub use scatter::{MarkerGeometry, MarkerStyle, ScatterPlot};
