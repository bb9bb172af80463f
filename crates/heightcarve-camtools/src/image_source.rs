//! Raster acquisition
//!
//! The pipeline reads pixels through [`ImageSource`]: a width, a height and a
//! row-major RGBA byte buffer. Sources are expected to be grayscale already
//! (red = green = blue); only the red and alpha channels are sampled.
//! [`RasterImage`] is the `image`-crate backed implementation used by the CLI.

use crate::error::CamToolResult;
use heightcarve_core::RasterError;
use image::{DynamicImage, GrayImage, Luma, RgbaImage};
use std::path::Path;

/// Supplier of an RGBA pixel buffer
pub trait ImageSource {
    /// Width in pixels
    fn width(&self) -> usize;
    /// Height in pixels
    fn height(&self) -> usize;
    /// Row-major RGBA bytes, `4 * width * height` long
    fn pixels(&self) -> &[u8];
}

/// An owned grayscale RGBA raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Wrap an RGBA buffer, checking it matches the declared size
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, RasterError> {
        let expected = width * height * 4;
        if pixels.len() != expected {
            return Err(RasterError::BufferSizeMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Convert a decoded image to grayscale, keeping its alpha channel
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let gray = img.to_luma_alpha8();
        let width = gray.width() as usize;
        let height = gray.height() as usize;
        let pixels = gray
            .pixels()
            .flat_map(|p| {
                let [luma, alpha] = p.0;
                [luma, luma, luma, alpha]
            })
            .collect();

        Self {
            width,
            height,
            pixels,
        }
    }

    /// Decode an image file (PNG, JPEG, ...) into a grayscale raster
    pub fn open<P: AsRef<Path>>(path: P) -> CamToolResult<Self> {
        let img = image::open(path.as_ref())?;
        tracing::debug!(
            path = %path.as_ref().display(),
            width = img.width(),
            height = img.height(),
            "Decoded height map"
        );
        Ok(Self::from_dynamic(img))
    }
}

impl ImageSource for RasterImage {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl ImageSource for RgbaImage {
    fn width(&self) -> usize {
        self.dimensions().0 as usize
    }

    fn height(&self) -> usize {
        self.dimensions().1 as usize
    }

    fn pixels(&self) -> &[u8] {
        self.as_raw()
    }
}

/// Render what the carver will see: opaque pixels keep their red channel,
/// anything transparent is shown white (uncarved).
pub fn grayscale_preview<S: ImageSource + ?Sized>(source: &S) -> GrayImage {
    let width = source.width();
    let pixels = source.pixels();

    GrayImage::from_fn(source.width() as u32, source.height() as u32, |x, y| {
        let px = (y as usize * width + x as usize) * 4;
        match pixels.get(px..px + 4) {
            Some(&[red, _, _, 255]) => Luma([red]),
            _ => Luma([255]),
        }
    })
}
