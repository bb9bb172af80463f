//! Data models shared by the carving pipeline
//!
//! This module provides:
//! - [`Point3`]: a machine-space coordinate
//! - [`DepthGrid`]: the tool-diameter quantized depth map, flattened row-major
//! - [`Segment`]: a straight cutting move with independent start/end depths

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in machine space. `z <= 0` is below the stock surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
    /// Z-axis position
    pub z: f64,
}

impl Point3 {
    /// Create a new point
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5}, {:.5})", self.x, self.y, self.z)
    }
}

/// A straight cutting move from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Where the cut begins
    pub start: Point3,
    /// Where the cut ends
    pub end: Point3,
}

impl Segment {
    /// Create a new segment
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// True when start and end coincide (a single plunge)
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    /// Deepest excursion below the surface over both endpoints
    pub fn max_depth(&self) -> f64 {
        self.start.z.abs().max(self.end.z.abs())
    }

    /// Whether any part of the segment goes below the surface
    pub fn is_carving(&self) -> bool {
        self.start.z < 0.0 || self.end.z < 0.0
    }

    /// 3D length of the move
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Quantized depth map, one cell per tool-diameter square of the raster.
///
/// `values[row * width + col]` is the average depth fraction (0..=1) of the
/// raster region covered by cell `(row, col)`. Row 0 is the top of the image.
/// A grid with a zero dimension means the image was smaller than the tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthGrid {
    /// Number of cells per row
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Edge length of one cell in real units
    pub cell_size: f64,
    /// Row-major depth fractions
    pub values: Vec<f64>,
}

impl DepthGrid {
    /// Create a grid from row-major values
    pub fn new(width: usize, height: usize, cell_size: f64, values: Vec<f64>) -> Self {
        debug_assert_eq!(
            values.len(),
            width * height,
            "depth grid of {width}x{height} needs {} values",
            width * height
        );
        Self {
            width,
            height,
            cell_size,
            values,
        }
    }

    /// The "nothing to carve" sentinel
    pub fn empty(cell_size: f64) -> Self {
        Self {
            width: 0,
            height: 0,
            cell_size,
            values: Vec::new(),
        }
    }

    /// True for the sentinel produced when the image is smaller than the tool
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Flattened index of cell `(row, col)`
    pub fn index(&self, row: usize, col: usize) -> usize {
        col + row * self.width
    }

    /// Depth fraction at a flattened index
    pub fn value(&self, index: usize) -> f64 {
        self.values[index]
    }

    /// Row of a flattened index
    pub fn row_of(&self, index: usize) -> usize {
        index / self.width
    }

    /// Column of a flattened index
    pub fn col_of(&self, index: usize) -> usize {
        index % self.width
    }

    /// X of the cell center
    pub fn real_x(&self, index: usize) -> f64 {
        self.col_of(index) as f64 * self.cell_size + self.cell_size / 2.0
    }

    /// Y of the cell center. Row 0 is the top of the image but machine Y
    /// grows upward, so rows are flipped.
    pub fn real_y(&self, index: usize) -> f64 {
        (self.height - 1 - self.row_of(index)) as f64 * self.cell_size + self.cell_size / 2.0
    }

    /// True when every cell is uncarved
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }
}
