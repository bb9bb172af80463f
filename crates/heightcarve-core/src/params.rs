//! Carving parameters
//!
//! One snapshot of these values drives a whole pipeline run. Lengths share a
//! single unit (inches by default, see [`MeasurementSystem`]).

use crate::error::ParameterError;
use crate::units::MeasurementSystem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which scans the path consolidator runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConsolidationMode {
    /// Horizontal strokes only
    #[default]
    LeftToRight,
    /// Horizontal strokes followed by vertical strokes
    Both,
}

impl ConsolidationMode {
    /// Whether the column-major scan runs after the row-major one
    pub fn includes_up_to_down(self) -> bool {
        matches!(self, Self::Both)
    }
}

impl fmt::Display for ConsolidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeftToRight => write!(f, "left-to-right"),
            Self::Both => write!(f, "both"),
        }
    }
}

impl FromStr for ConsolidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left-to-right" | "left_to_right" | "simple" => Ok(Self::LeftToRight),
            "both" | "complex" => Ok(Self::Both),
            _ => Err(format!("Unknown consolidation mode: {}", s)),
        }
    }
}

/// Parameters for turning a height map into a carving program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarvingParameters {
    /// Real length covered by one raster pixel
    pub pixel_to_inch: f64,
    /// Tool diameter; sets the grid cell size
    pub bit_diameter: f64,
    /// Usable cutting length of the tool, the deepest step of one pass
    pub bit_length: f64,
    /// Depth reached by a fully black pixel
    pub max_carving_depth: f64,
    /// Largest depth-fraction step still carved as a continuous slope
    pub margin_edge: f64,
    /// Retract height between cuts
    pub safe_z: f64,
    /// Cutting feed rate
    pub feedrate: f64,
    /// Single-direction or two-direction consolidation
    pub consolidation_mode: ConsolidationMode,
    /// Units declared in the program preamble
    pub units: MeasurementSystem,
}

impl Default for CarvingParameters {
    fn default() -> Self {
        Self {
            pixel_to_inch: 1.0,
            bit_diameter: 1.0,
            bit_length: 0.5,
            max_carving_depth: 1.0,
            margin_edge: 0.0,
            safe_z: 3.0,
            feedrate: 120.0,
            consolidation_mode: ConsolidationMode::LeftToRight,
            units: MeasurementSystem::Imperial,
        }
    }
}

impl CarvingParameters {
    /// Raster pixels spanned by one grid cell edge
    pub fn cell_span_px(&self) -> f64 {
        self.bit_diameter / self.pixel_to_inch
    }

    /// Machine Z for a depth fraction
    pub fn real_z(&self, depth: f64) -> f64 {
        -(depth * self.max_carving_depth)
    }

    /// Check every value the pipeline divides by, loops on, or prints
    pub fn validate(&self) -> Result<(), ParameterError> {
        positive("pixel_to_inch", self.pixel_to_inch)?;
        positive("bit_diameter", self.bit_diameter)?;
        positive("bit_length", self.bit_length)?;
        positive("feedrate", self.feedrate)?;
        non_negative("max_carving_depth", self.max_carving_depth)?;
        non_negative("margin_edge", self.margin_edge)?;
        finite("safe_z", self.safe_z)?;
        Ok(())
    }
}

fn finite(name: &str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NotFinite {
            name: name.to_string(),
            value,
        })
    }
}

fn positive(name: &str, value: f64) -> Result<(), ParameterError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ParameterError::NotPositive {
            name: name.to_string(),
            value,
        })
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), ParameterError> {
    finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ParameterError::Negative {
            name: name.to_string(),
            value,
        })
    }
}
