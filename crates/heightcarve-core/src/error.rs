//! Error handling for HeightCarve
//!
//! Provides the error types the pipeline crates wrap:
//! - Parameter errors (carving parameter validation)
//! - Raster errors (malformed image buffers handed to the pipeline)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Parameter error type
///
/// Raised when a [`crate::CarvingParameters`] value cannot drive the pipeline,
/// e.g. a zero pass depth that would never reach the target Z.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Value must be strictly positive and finite
    #[error("Parameter '{name}' must be positive, got {value}")]
    NotPositive {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// Value must be zero or positive and finite
    #[error("Parameter '{name}' must not be negative, got {value}")]
    Negative {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// Value is NaN or infinite
    #[error("Parameter '{name}' must be finite, got {value}")]
    NotFinite {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: f64,
    },
}

impl ParameterError {
    /// Name of the offending parameter
    pub fn name(&self) -> &str {
        match self {
            Self::NotPositive { name, .. }
            | Self::Negative { name, .. }
            | Self::NotFinite { name, .. } => name,
        }
    }
}

/// Raster error type
///
/// Represents an RGBA buffer whose shape does not match its declared size.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// Buffer length is not `4 * width * height`
    #[error("Pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSizeMismatch {
        /// Declared width in pixels.
        width: usize,
        /// Declared height in pixels.
        height: usize,
        /// Expected byte count.
        expected: usize,
        /// Actual byte count.
        actual: usize,
    },
}
