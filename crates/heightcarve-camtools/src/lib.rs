//! # HeightCarve CAM Tools
//!
//! This crate turns grayscale height maps into carving programs for CNC
//! routers. Darker pixels are carved deeper.
//!
//! ## Pipeline
//!
//! - **Pixel Sampler**: depth fraction of one pixel, transparent pixels are never carved
//! - **Depth Grid Builder**: averages the raster into cells the size of the tool
//! - **Path Consolidator**: merges cells into straight runs, bridging smooth depth steps
//! - **G-Code Emitter**: splits each run into depth-limited passes and wraps the program
//!
//! [`HeightMapCarver`] chains the four stages for one image.
//!
//! ## Supporting Infrastructure
//!
//! - **Image Source**: raster acquisition and grayscale preview
//! - **Errors**: structured error types for parameters, rasters, and decoding

pub mod carver;
pub mod depth_grid;
pub mod error;
pub mod gcode_emitter;
pub mod image_source;
pub mod path_consolidator;
pub mod pixel_sampler;

// Re-export commonly used items
pub use carver::HeightMapCarver;
pub use depth_grid::DepthGridBuilder;
pub use error::{CamToolError, CamToolResult};
pub use gcode_emitter::{plan_passes, GCodeEmitter, Pass};
pub use image_source::{grayscale_preview, ImageSource, RasterImage};
pub use path_consolidator::{bridgeable, same_run, Continuity, PathConsolidator};
pub use pixel_sampler::{average_blackness, blackness};
