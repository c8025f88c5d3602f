//! Figure exporters.

pub mod pdf;

pub use pdf::{PdfExportSettings, PdfExporter};
