use anyhow::Context;
use clap::Parser;
use heightcarve::batch::{CarveJob, JobOutcome};
use heightcarve::{init_logging_with, Config, ConsolidationMode, LogFormat, MeasurementSystem};
use std::path::PathBuf;

/// Turn height map images into multi-pass carving G-code.
///
/// Black pixels are carved to the maximum depth, white pixels stay at the
/// surface and transparent pixels are skipped.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Height map images to carve.
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Configuration file (.json or .toml); defaults to the user config.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Size of one image pixel in machine units.
    #[arg(long, value_name = "UNITS")]
    pixel_to_inch: Option<f64>,

    /// Diameter of the cutting tool.
    #[arg(long, value_name = "UNITS")]
    bit_diameter: Option<f64>,

    /// Maximum depth removed in a single pass.
    #[arg(long, value_name = "UNITS")]
    bit_length: Option<f64>,

    /// Depth of a fully black pixel.
    #[arg(long, value_name = "UNITS")]
    max_depth: Option<f64>,

    /// Largest depth step (0..1) smoothed by a sloped cut instead of a lift.
    #[arg(long, value_name = "FRACTION")]
    margin_edge: Option<f64>,

    /// Safe travel height above the stock.
    #[arg(long, value_name = "UNITS")]
    safe_z: Option<f64>,

    /// Cutting feed rate.
    #[arg(long, value_name = "RATE")]
    feedrate: Option<f64>,

    /// Stroke directions: "left-to-right", or "both" to add vertical strokes.
    #[arg(long, value_name = "MODE")]
    mode: Option<ConsolidationMode>,

    /// Program units: "imperial" (G20) or "metric" (G21).
    #[arg(long, value_name = "SYSTEM")]
    units: Option<MeasurementSystem>,

    /// Directory for generated programs.
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Also write a grayscale preview of what gets carved.
    #[arg(long)]
    preview: bool,

    /// Print programs to standard output instead of writing files.
    #[arg(long)]
    stdout: bool,

    /// Log as JSON lines.
    #[arg(long)]
    log_json: bool,
}

impl Args {
    /// Settings file values with command line overrides applied
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::load_or_default().context("Failed to load user config")?,
        };

        let carving = &mut config.carving;
        let overrides = [
            (&mut carving.pixel_to_inch, self.pixel_to_inch),
            (&mut carving.bit_diameter, self.bit_diameter),
            (&mut carving.bit_length, self.bit_length),
            (&mut carving.max_carving_depth, self.max_depth),
            (&mut carving.margin_edge, self.margin_edge),
            (&mut carving.safe_z, self.safe_z),
            (&mut carving.feedrate, self.feedrate),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(mode) = self.mode {
            carving.consolidation_mode = mode;
        }
        if let Some(units) = self.units {
            carving.units = units;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = Some(dir.clone());
        }

        config.validate().context("Invalid carving parameters")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging_with(if args.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    })?;

    let config = args.resolve_config()?;
    tracing::info!(
        version = heightcarve::VERSION,
        build_date = heightcarve::BUILD_DATE,
        images = args.images.len(),
        mode = %config.carving.consolidation_mode,
        units = config.carving.units.label(),
        "Starting HeightCarve"
    );

    let handles: Vec<_> = args
        .images
        .iter()
        .map(|image| {
            let job = CarveJob {
                image: image.clone(),
                params: config.carving.clone(),
                output: config.output.clone(),
                preview: args.preview,
                to_stdout: args.stdout,
            };
            tokio::task::spawn_blocking(move || job.run())
        })
        .collect();

    let mut failures = 0usize;
    for (image, handle) in args.images.iter().zip(handles) {
        match handle.await.context("Carving task panicked")? {
            Ok(JobOutcome::NothingGenerated) => {
                tracing::warn!(image = %image.display(), "Nothing generated");
            }
            Ok(JobOutcome::Written { path, lines }) => {
                tracing::info!(image = %image.display(), program = %path.display(), lines, "Wrote program");
            }
            Ok(JobOutcome::Program(gcode)) => {
                print!("{gcode}");
            }
            Err(e) => {
                failures += 1;
                tracing::error!(image = %image.display(), "{:#}", e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} images failed", failures, args.images.len());
    }
    Ok(())
}
