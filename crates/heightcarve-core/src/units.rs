//! Unit system selection
//!
//! The pipeline math is unit-agnostic: `pixel_to_inch`, `bit_diameter` and the
//! depth parameters only need to share one length unit. The selected system
//! decides which units word opens the emitted program.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Imperial system (inches)
    #[default]
    Imperial,
    /// Metric system (mm)
    Metric,
}

impl MeasurementSystem {
    /// Units declaration line for the program preamble
    pub fn units_command(self) -> &'static str {
        match self {
            Self::Imperial => "G20 (inches)",
            Self::Metric => "G21 (millimeters)",
        }
    }

    /// Short unit label ("in" or "mm")
    pub fn label(self) -> &'static str {
        match self {
            Self::Imperial => "in",
            Self::Metric => "mm",
        }
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Imperial => write!(f, "Imperial"),
            Self::Metric => write!(f, "Metric"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}
