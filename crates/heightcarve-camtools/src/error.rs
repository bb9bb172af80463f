//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for pipeline parameter
//! validation, raster acquisition, and program generation.

use heightcarve_core::{ParameterError, RasterError};
use std::io;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// Invalid parameters were provided to a CAM tool.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A segment cannot be turned into passes.
    #[error("Invalid segment: {0}")]
    InvalidSegment(String),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// The raster buffer does not match its declared dimensions.
    #[error("Raster error: {0}")]
    Raster(#[from] RasterError),

    /// Image decoding failed.
    #[error("Image processing error: {0}")]
    ImageError(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;
