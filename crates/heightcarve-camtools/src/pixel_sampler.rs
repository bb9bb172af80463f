//! Pixel Sampler
//!
//! Turns raster pixels into depth fractions. A fully black opaque pixel is
//! carved to the maximum depth (1.0), white is left at the surface (0.0).
//! Transparent pixels and positions past the end of the buffer are never
//! carved.

use crate::image_source::ImageSource;

/// Depth fraction (0..=1) of the pixel at `(row, col)`
pub fn blackness<S: ImageSource + ?Sized>(source: &S, row: usize, col: usize) -> f64 {
    let px = (row * source.width() + col) * 4;
    match source.pixels().get(px..px + 4) {
        Some(&[red, _, _, 255]) => 1.0 - f64::from(red) / 255.0,
        _ => 0.0,
    }
}

/// Mean blackness over the inclusive region `[row_start, row_end] x [col_start, col_end]`.
///
/// Bounds may be fractional and given in either order. Samples are taken at
/// `start, start + 1, ...` up to and including `end`, truncated to whole
/// pixels and clipped to the raster. The region must contain at least one
/// sample.
pub fn average_blackness<S: ImageSource + ?Sized>(
    source: &S,
    row_start: f64,
    col_start: f64,
    row_end: f64,
    col_end: f64,
) -> f64 {
    let (row_start, row_end) = ordered(row_start, row_end);
    let (col_start, col_end) = ordered(col_start, col_end);

    let mut sum = 0.0;
    let mut count = 0usize;
    for row in sample_positions(row_start, row_end, source.height()) {
        for col in sample_positions(col_start, col_end, source.width()) {
            sum += blackness(source, row, col);
            count += 1;
        }
    }

    debug_assert!(
        count > 0,
        "empty sampling region rows {row_start}..={row_end}, cols {col_start}..={col_end}"
    );
    sum / count as f64
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}

fn sample_positions(start: f64, end: f64, limit: usize) -> impl Iterator<Item = usize> {
    (0u32..)
        .map(move |step| start + f64::from(step))
        .take_while(move |&pos| pos < limit as f64 && pos <= end)
        .map(|pos| pos as usize)
}
