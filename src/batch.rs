//! Carving jobs
//!
//! A job carves one image file with a fixed set of parameters and decides
//! where the program (and optional preview) ends up. Jobs share nothing, so
//! the binary runs one per blocking worker.

use anyhow::Context;
use heightcarve_camtools::{grayscale_preview, HeightMapCarver, RasterImage};
use heightcarve_core::CarvingParameters;
use heightcarve_settings::OutputSettings;
use std::path::{Path, PathBuf};

/// One image to carve
#[derive(Debug, Clone)]
pub struct CarveJob {
    /// Height map image
    pub image: PathBuf,
    /// Carving parameters
    pub params: CarvingParameters,
    /// Output naming
    pub output: OutputSettings,
    /// Also write `<stem>.preview.png`
    pub preview: bool,
    /// Return the program instead of writing it to a file
    pub to_stdout: bool,
}

/// What a finished job produced
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// The image has nothing to carve
    NothingGenerated,
    /// Program written to disk
    Written { path: PathBuf, lines: usize },
    /// Program text for standard output
    Program(String),
}

impl CarveJob {
    /// Decode, carve and write the result
    pub fn run(&self) -> anyhow::Result<JobOutcome> {
        let raster = RasterImage::open(&self.image)
            .with_context(|| format!("Failed to read image {}", self.image.display()))?;

        if self.preview {
            let path = self.preview_path();
            create_parent_dir(&path)?;
            grayscale_preview(&raster)
                .save(&path)
                .with_context(|| format!("Failed to write preview {}", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote preview");
        }

        let gcode = HeightMapCarver::new(self.params.clone())
            .generate(&raster)
            .with_context(|| format!("Failed to carve {}", self.image.display()))?;

        if gcode.is_empty() {
            return Ok(JobOutcome::NothingGenerated);
        }
        if self.to_stdout {
            return Ok(JobOutcome::Program(gcode));
        }

        let path = self.output.program_path(&self.image);
        create_parent_dir(&path)?;
        std::fs::write(&path, &gcode)
            .with_context(|| format!("Failed to write program {}", path.display()))?;

        Ok(JobOutcome::Written {
            path,
            lines: gcode.lines().count(),
        })
    }

    /// Where the preview image goes: next to the program
    pub fn preview_path(&self) -> PathBuf {
        let program = self.output.program_path(&self.image);
        let stem = stem_of(&self.image);
        program.with_file_name(format!("{stem}.preview.png"))
    }
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}
