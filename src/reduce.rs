//! Frame reduction.
//!
//! Collapses a decoded frame to one pixel per row — the column that the frame
//! contributes to the barcode. Pure: no shared state, no allocation beyond the
//! output vector, same input gives same output.

use image::{Rgb, RgbImage};

use crate::error::FilmstripeError;

/// Reduce a decoded frame to one averaged pixel per row.
///
/// Each output pixel is the component-wise mean of its row, using integer
/// truncation per channel. Truncation (not rounding) is deliberate: a row of
/// identical pixels reduces to exactly that colour, with no drift.
///
/// # Errors
///
/// Returns [`FilmstripeError::EmptyRow`] if the frame has zero width. This
/// cannot occur for a validly decoded frame; the guard is defensive.
pub fn frame_column(frame: &RgbImage) -> Result<Vec<Rgb<u8>>, FilmstripeError> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;

    if width == 0 {
        return Err(FilmstripeError::EmptyRow);
    }

    // RgbImage stores tightly-packed RGB8, so each row is a contiguous
    // width * 3 byte run of the raw buffer.
    let mut column = Vec::with_capacity(height);
    for row in frame.as_raw().chunks_exact(width * 3) {
        let mut sums = [0_u64; 3];
        for pixel in row.chunks_exact(3) {
            sums[0] += u64::from(pixel[0]);
            sums[1] += u64::from(pixel[1]);
            sums[2] += u64::from(pixel[2]);
        }

        column.push(Rgb([
            (sums[0] / width as u64) as u8,
            (sums[1] / width as u64) as u8,
            (sums[2] / width as u64) as u8,
        ]));
    }

    Ok(column)
}
