//! Raster types and drawing tools.
//!
//! This module contains:
//! - `flood_fill`, `FillRequest`, `FillReport` - the bucket fill engine
//! - `Canvas` - a drawing surface with undo/redo, eyedropper and PNG export
//! - Color helpers (hex parsing, hue slider, channel distance)

mod canvas;
mod color;
mod fill;
mod history;

pub use canvas::*;
pub use color::*;
pub use fill::*;
pub use history::*;
