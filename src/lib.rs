//! # HeightCarve
//!
//! Turns grayscale height map images into multi-pass CNC carving programs.
//! Dark pixels are carved deep, light pixels shallow, transparent pixels not
//! at all.
//!
//! ## Architecture
//!
//! HeightCarve is organized as a workspace with multiple crates:
//!
//! 1. **heightcarve-core** - Data model, carving parameters, units, errors
//! 2. **heightcarve-camtools** - Sampling, path consolidation, G-code emission
//! 3. **heightcarve-settings** - JSON/TOML configuration files
//! 4. **heightcarve** - Command line binary that integrates all crates

pub mod batch;

pub use heightcarve_camtools::{
    grayscale_preview, CamToolError, DepthGridBuilder, GCodeEmitter, HeightMapCarver,
    ImageSource, Pass, PathConsolidator, RasterImage,
};
pub use heightcarve_core::{
    CarvingParameters, ConsolidationMode, DepthGrid, MeasurementSystem, Point3, Segment,
};
pub use heightcarve_settings::{Config, OutputSettings, SettingsError};

pub use batch::{CarveJob, JobOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable multi-line output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr, keeping stdout free for programs
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with(LogFormat::Pretty)
}

/// Initialize logging with an explicit output format
pub fn init_logging_with(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok());

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .with_thread_names(true)
                .with_line_number(true)
                .pretty();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_names(true)
                .json();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}

/// Filter from `RUST_LOG` directives, INFO when unset or unparsable
fn log_filter(directives: Option<String>) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::EnvFilter;

    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
