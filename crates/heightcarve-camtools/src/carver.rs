//! Height Map Carver
//!
//! Runs the whole pipeline for one raster: sample into a depth grid,
//! consolidate the grid into segments, emit the multi-pass program.
//! Each call owns its intermediate grid and segments, so independent images
//! can be carved concurrently.

use crate::depth_grid::DepthGridBuilder;
use crate::error::CamToolResult;
use crate::gcode_emitter::GCodeEmitter;
use crate::image_source::{ImageSource, RasterImage};
use crate::path_consolidator::PathConsolidator;
use heightcarve_core::{CarvingParameters, DepthGrid, Segment};
use std::path::Path;

/// Converts height map images into carving programs
#[derive(Debug, Clone)]
pub struct HeightMapCarver {
    params: CarvingParameters,
}

impl HeightMapCarver {
    /// Create a new carver with the given parameters
    pub fn new(params: CarvingParameters) -> Self {
        Self { params }
    }

    /// Sample a raster into a depth grid
    pub fn depth_grid<S: ImageSource + ?Sized>(&self, source: &S) -> CamToolResult<DepthGrid> {
        self.params.validate()?;
        Ok(DepthGridBuilder::new(&self.params).build(source))
    }

    /// Consolidate a depth grid into cutting segments
    pub fn segments(&self, grid: &DepthGrid) -> Vec<Segment> {
        PathConsolidator::new(&self.params).consolidate(grid)
    }

    /// Generate the carving program for a raster.
    ///
    /// Returns an empty string when there is nothing to carve: the image is
    /// smaller than the tool, or every cell is at the surface.
    pub fn generate<S: ImageSource + ?Sized>(&self, source: &S) -> CamToolResult<String> {
        let grid = self.depth_grid(source)?;
        if grid.is_empty() || grid.is_blank() {
            tracing::debug!(
                grid_width = grid.width,
                grid_height = grid.height,
                "Nothing to carve"
            );
            return Ok(String::new());
        }

        let segments = self.segments(&grid);
        let gcode = GCodeEmitter::new(&self.params).emit(&segments)?;

        tracing::debug!(
            grid_width = grid.width,
            grid_height = grid.height,
            segments = segments.len(),
            lines = gcode.lines().count(),
            "Generated carving program"
        );
        Ok(gcode)
    }

    /// Decode an image file and generate its carving program
    pub fn generate_from_file<P: AsRef<Path>>(&self, path: P) -> CamToolResult<String> {
        let raster = RasterImage::open(path)?;
        self.generate(&raster)
    }
}

impl Default for HeightMapCarver {
    fn default() -> Self {
        Self::new(CarvingParameters::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CamToolError;
    use heightcarve_core::ConsolidationMode;

    fn black_raster(width: usize, height: usize) -> RasterImage {
        RasterImage::new(width, height, [0u8, 0, 0, 255].repeat(width * height)).unwrap()
    }

    #[test]
    fn test_generate_black_square() {
        let carver = HeightMapCarver::default();
        let gcode = carver.generate(&black_raster(2, 2)).unwrap();

        assert!(gcode.starts_with("G20 (inches)\n"));
        assert_eq!(gcode.matches("(Cutting one pass)").count(), 2);
        // Depth 1 with a 0.5 bit length takes two passes per row
        assert_eq!(gcode.matches("(start XY)").count(), 4);
        assert!(gcode.ends_with("M2 (Program end)\n"));
    }

    #[test]
    fn test_generate_too_small_is_empty() {
        let carver = HeightMapCarver::new(CarvingParameters {
            bit_diameter: 4.0,
            ..Default::default()
        });
        assert_eq!(carver.generate(&black_raster(3, 3)).unwrap(), "");
    }

    #[test]
    fn test_both_directions_doubles_strokes() {
        let carver = HeightMapCarver::new(CarvingParameters {
            consolidation_mode: ConsolidationMode::Both,
            ..Default::default()
        });
        let grid = carver.depth_grid(&black_raster(3, 3)).unwrap();
        assert_eq!(carver.segments(&grid).len(), 6);
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        let carver = HeightMapCarver::new(CarvingParameters {
            pixel_to_inch: 0.0,
            ..Default::default()
        });
        assert!(matches!(
            carver.generate(&black_raster(2, 2)),
            Err(CamToolError::Parameter(_))
        ));
    }
}
