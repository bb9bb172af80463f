//! G-Code Emitter
//!
//! Turns cutting segments into a motion program. A segment deeper than the
//! tool's usable cutting length is carved in several passes, each going at
//! most `bit_length` deeper than the previous one, until both endpoints have
//! reached their target depth.

use crate::error::{CamToolError, CamToolResult};
use heightcarve_core::{CarvingParameters, Segment};
use serde::{Deserialize, Serialize};

/// One depth-limited traversal of a segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pass {
    /// 1-based pass number
    pub number: u32,
    /// Z at the segment start for this pass
    pub start_z: f64,
    /// Z at the segment end for this pass
    pub end_z: f64,
}

/// Split a segment into passes no deeper than `bit_length` each.
///
/// Pass `k` may reach `-k * bit_length`. An endpoint shallower than that
/// floor is cut at its true depth and counts as reached; the sequence ends
/// once both endpoints have been reached, so the last pass always carries
/// the exact target depths.
pub fn plan_passes(segment: &Segment, bit_length: f64) -> CamToolResult<Vec<Pass>> {
    if !(bit_length.is_finite() && bit_length > 0.0) {
        return Err(CamToolError::InvalidParameters(format!(
            "bit length must be positive, got {}",
            bit_length
        )));
    }
    if !(segment.start.z.is_finite() && segment.end.z.is_finite()) {
        return Err(CamToolError::InvalidSegment(format!(
            "depths must be finite, got {} and {}",
            segment.start.z, segment.end.z
        )));
    }

    let mut passes = Vec::new();
    let mut start_reached = false;
    let mut end_reached = false;
    let mut number = 0u32;

    while !(start_reached && end_reached) {
        number += 1;
        let floor = -f64::from(number) * bit_length;

        let start_z = if floor <= segment.start.z {
            start_reached = true;
            segment.start.z
        } else {
            floor
        };
        let end_z = if floor <= segment.end.z {
            end_reached = true;
            segment.end.z
        } else {
            floor
        };

        passes.push(Pass {
            number,
            start_z,
            end_z,
        });
    }

    Ok(passes)
}

/// Writes the motion program for a list of segments
pub struct GCodeEmitter<'a> {
    params: &'a CarvingParameters,
}

impl<'a> GCodeEmitter<'a> {
    /// Create a new emitter for the given parameters
    pub fn new(params: &'a CarvingParameters) -> Self {
        Self { params }
    }

    /// Generate the full program. No segments produce an empty string.
    pub fn emit(&self, segments: &[Segment]) -> CamToolResult<String> {
        if segments.is_empty() {
            return Ok(String::new());
        }
        self.params.validate()?;

        let mut gcode = String::new();
        self.write_preamble(&mut gcode);

        let mut total_passes = 0usize;
        for segment in segments {
            total_passes += self.write_segment(&mut gcode, segment)?;
        }

        self.write_postamble(&mut gcode);

        tracing::debug!(
            segments = segments.len(),
            passes = total_passes,
            cut_length = segments.iter().map(Segment::length).sum::<f64>(),
            deepest = segments.iter().map(Segment::max_depth).fold(0.0, f64::max),
            bytes = gcode.len(),
            "Emitted carving program"
        );
        Ok(gcode)
    }

    fn write_preamble(&self, gcode: &mut String) {
        let p = self.params;
        gcode.push_str(p.units.units_command());
        gcode.push('\n');
        gcode.push_str("G17 (XY plane)\n");
        gcode.push_str("G90 (absolute)\n");
        gcode.push_str(&format!("G0 Z{}\n", coord(p.safe_z)));
        gcode.push_str("M3 (Spindle on clockwise)\n");
    }

    fn write_segment(&self, gcode: &mut String, segment: &Segment) -> CamToolResult<usize> {
        let p = self.params;
        let passes = plan_passes(segment, p.bit_length)?;

        let (start_x, start_y) = (coord(segment.start.x), coord(segment.start.y));
        let (end_x, end_y) = (coord(segment.end.x), coord(segment.end.y));
        let feedrate = coord(p.feedrate);
        let safe_z = coord(p.safe_z);

        gcode.push_str("(Cutting one pass)\n");
        for pass in &passes {
            gcode.push_str(&format!("G0 X{} Y{} (start XY)\n", start_x, start_y));
            gcode.push_str(&format!(
                "G1 Z{} F{} (start Z)\n",
                coord(pass.start_z),
                feedrate
            ));
            gcode.push_str(&format!(
                "G1 X{} Y{} Z{} (end)\n",
                end_x,
                end_y,
                coord(pass.end_z)
            ));
            gcode.push_str(&format!("G0 Z{}\n", safe_z));
        }
        gcode.push_str("(End cutting one pass)\n");

        Ok(passes.len())
    }

    fn write_postamble(&self, gcode: &mut String) {
        gcode.push_str("M5 (Spindle off)\n");
        gcode.push_str("(Go to the initial position)\n");
        gcode.push_str(&format!("G0 Z{}\n", coord(self.params.safe_z)));
        gcode.push_str("G0 X0 Y0\n");
        gcode.push_str("M2 (Program end)\n");
    }
}

/// Fixed 5-decimal coordinate; negative zero prints as `0.00000`
fn coord(value: f64) -> String {
    format!("{:.5}", value + 0.0)
}
