//! # HeightCarve Core
//!
//! Core types and parameters for HeightCarve.
//! Provides the data model shared by the carving pipeline stages:
//! depth grids, cutting segments, carving parameters, and unit systems.

pub mod data;
pub mod error;
pub mod params;
pub mod units;

pub use data::{DepthGrid, Point3, Segment};
pub use error::{ParameterError, RasterError};
pub use params::{CarvingParameters, ConsolidationMode};
pub use units::MeasurementSystem;
