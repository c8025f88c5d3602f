//! Publication-style scatter and annotated heatmap figures.
//!
//! Two renderers wrap a vector PDF backend to produce camera-ready
//! figures: [`GroupedScatter`] partitions a point set by optional
//! integer group and series labels and draws one styled cluster per
//! partition with up to two legends, and [`HeatmapPlot`] renders a
//! numeric matrix as a color-mapped grid with optional value text,
//! gridlines, tick labels, and a colorbar.
//!
//! Both write `<save_path>/<save_name>.pdf` with a transparent
//! background and a tight bounding box, creating directories as
//! needed and overwriting silently.
//!
//! ```no_run
//! use sciplot::GroupedScatter;
//!
//! # fn main() -> sciplot::Result<()> {
//! let x = vec![0.1, 0.2, 1.1, 1.3];
//! let y = vec![0.3, 0.1, 1.2, 1.0];
//! GroupedScatter::new(x, y)?
//!     .with_group(vec![0i64, 0, 1, 1])
//!     .with_group_names(["control", "treated"])
//!     .save("./figures", "clusters")?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod export;
pub mod plots;
pub mod styling;

pub use error::{PlotError, Result};
pub use export::{PdfExportSettings, PdfExporter};
pub use plots::{
    BoundingBox, ColorMap, Figure, GroupedScatter, HeatmapPlot, LabelArray, Legend, LegendEntry,
    LegendLocation, LegendStyle, MarkerStyle, Partition, PlotElement, ScatterPlot,
};
pub use styling::{MarkerCycle, Palette};
