//! Depth Grid Builder
//!
//! Quantizes a height map into square cells the size of the cutting tool.
//! Each cell holds the average blackness of the raster pixels it covers.

use crate::image_source::ImageSource;
use crate::pixel_sampler::average_blackness;
use heightcarve_core::{CarvingParameters, DepthGrid};

/// Builds a [`DepthGrid`] from an [`ImageSource`]
pub struct DepthGridBuilder<'a> {
    params: &'a CarvingParameters,
}

impl<'a> DepthGridBuilder<'a> {
    /// Create a new builder for the given parameters
    pub fn new(params: &'a CarvingParameters) -> Self {
        Self { params }
    }

    /// Sample the raster into tool-sized cells.
    ///
    /// Returns the empty sentinel when either image dimension is shorter than
    /// one tool diameter. The last row and column may cover a partial cell.
    pub fn build<S: ImageSource + ?Sized>(&self, source: &S) -> DepthGrid {
        let p = self.params;
        let (width_px, height_px) = (source.width(), source.height());

        if width_px as f64 * p.pixel_to_inch < p.bit_diameter
            || height_px as f64 * p.pixel_to_inch < p.bit_diameter
        {
            tracing::debug!(
                width_px,
                height_px,
                bit_diameter = p.bit_diameter,
                "Image smaller than one tool diameter, nothing to carve"
            );
            return DepthGrid::empty(p.bit_diameter);
        }

        let delta = p.cell_span_px();
        // Integral cells end one pixel short so neighbours never share a pixel
        let reach = if delta.fract() > 0.0 { delta } else { delta - 1.0 };

        let row_starts = cell_starts(delta, height_px);
        let col_starts = cell_starts(delta, width_px);

        let mut values = Vec::with_capacity(row_starts.len() * col_starts.len());
        for &row in &row_starts {
            for &col in &col_starts {
                values.push(average_blackness(source, row, col, row + reach, col + reach));
            }
        }

        tracing::debug!(
            width = col_starts.len(),
            height = row_starts.len(),
            cell_span_px = delta,
            "Built depth grid"
        );

        DepthGrid::new(col_starts.len(), row_starts.len(), p.bit_diameter, values)
    }
}

/// Pixel offsets at which successive cells start along one axis
fn cell_starts(delta: f64, extent: usize) -> Vec<f64> {
    let mut starts = Vec::new();
    let mut pos = 0.0;
    while pos < extent as f64 {
        starts.push(pos);
        pos += delta;
    }
    starts
}
