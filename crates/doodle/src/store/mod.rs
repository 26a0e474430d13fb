//! Storage collaborators.
//!
//! This module contains the seams the scorer and generator are injected with:
//! - `RasterStore` - uploaded doodle bytes (`MemoryRasterStore`, `FsRasterStore`)
//! - `DocumentStore` - attempts, user progress and daily words
//!   (`MemoryDocumentStore`, `JsonFileStore`)

mod documents;
mod json_file;
mod memory;
mod raster;

pub use documents::*;
pub use json_file::*;
pub use memory::*;
pub use raster::*;
