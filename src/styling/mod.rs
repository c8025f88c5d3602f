//! Styling tables shared by the renderers.

pub mod palette;

pub use palette::{hex_color, MarkerCycle, Palette, DEFAULT_MARKERS, DEFAULT_PALETTE};
