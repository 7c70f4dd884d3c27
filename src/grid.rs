//! The shared output grid.
//!
//! [`PixelGrid`] is the barcode being assembled: `height` rows by `columns`
//! columns of RGB pixels, one column per scheduled sample. Storage is
//! column-major so that a column is one contiguous slice and the dispatcher
//! can hand disjoint column ranges to workers via `split_at_mut` — the borrow
//! checker then enforces the write-disjointness that the grid's contract
//! promises, with no cell-level locking. Visibility of worker writes is
//! guaranteed by the dispatcher's join barrier; the grid is only read after
//! it.

use image::{Rgb, RgbImage};

use crate::error::FilmstripeError;

/// The barcode output buffer: `height` × `columns` RGB pixels.
///
/// Created pre-sized and zero-filled before workers start. Each column is
/// written at most once over the life of a run. After the run the grid is
/// consumed by [`into_image`](PixelGrid::into_image) and never mutated again.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct PixelGrid {
    height: usize,
    columns: usize,
    /// Column-major storage: column `c` occupies `data[c * height..(c + 1) * height]`.
    data: Vec<Rgb<u8>>,
}

impl PixelGrid {
    /// Create a zero-filled (black) grid.
    pub fn new(height: usize, columns: usize) -> Self {
        Self {
            height,
            columns,
            data: vec![Rgb([0, 0, 0]); height * columns],
        }
    }

    /// Number of rows — the source video's pixel height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns — the run's sample count.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// One column as a contiguous pixel slice, top row first.
    ///
    /// # Panics
    ///
    /// Panics if `index >= columns()`.
    pub fn column(&self, index: usize) -> &[Rgb<u8>] {
        &self.data[index * self.height..(index + 1) * self.height]
    }

    /// Write one complete column.
    ///
    /// # Errors
    ///
    /// Returns [`FilmstripeError::FrameSizeMismatch`] if `pixels` does not
    /// have exactly `height()` entries.
    ///
    /// # Panics
    ///
    /// Panics if `index >= columns()`.
    pub fn write_column(
        &mut self,
        index: usize,
        pixels: &[Rgb<u8>],
    ) -> Result<(), FilmstripeError> {
        if pixels.len() != self.height {
            return Err(FilmstripeError::FrameSizeMismatch {
                expected: self.height,
                actual: pixels.len(),
            });
        }

        self.data[index * self.height..(index + 1) * self.height].copy_from_slice(pixels);
        Ok(())
    }

    /// The whole grid as one mutable column-major slice.
    ///
    /// The dispatcher carves this into disjoint per-worker column ranges.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [Rgb<u8>] {
        &mut self.data
    }

    /// Consume the grid and transpose it into a row-major image,
    /// `columns()` wide and `height()` tall.
    pub fn into_image(self) -> RgbImage {
        let mut image = RgbImage::new(self.columns as u32, self.height as u32);
        if self.height == 0 {
            return image;
        }

        for (column_index, column) in self.data.chunks_exact(self.height).enumerate() {
            for (row_index, pixel) in column.iter().enumerate() {
                image.put_pixel(column_index as u32, row_index as u32, *pixel);
            }
        }

        image
    }
}
