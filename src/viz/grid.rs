//! Row-major RGB pixel grid.

use rayon::prelude::*;

use crate::error::{Result, VizError};
use crate::util::color::{Rgb, BACKGROUND};

/// Allocate a vector of `len` copies of `value`, reporting exhaustion as an
/// error instead of aborting.
pub(crate) fn try_filled_vec<T: Clone>(len: usize, value: T, what: &'static str) -> Result<Vec<T>> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(len)
        .map_err(|source| VizError::Allocation { what, source })?;
    vec.resize(len, value);
    Ok(vec)
}

/// Number of pixels in a `width x height` grid, if it fits in `usize`.
pub(crate) fn checked_area(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .ok_or(VizError::DimensionOverflow { width, height })
}

/// A rectangular RGB image stored row by row.
///
/// `pixels.len() == width * height` holds for every grid that can be
/// observed: dimensions and storage are only ever replaced together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelGrid {
    /// A grid filled with the background color.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, BACKGROUND)
    }

    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self> {
        let len = checked_area(width, height)?;
        let pixels = try_filled_vec(len, color, "pixel grid")?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self> {
        let expected = checked_area(width, height)?;
        if pixels.len() != expected {
            return Err(VizError::PixelCountMismatch {
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

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Set a pixel. Returns false if `(x, y)` is out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pixels[y * self.width + x] = color;
        true
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        self.pixels.chunks_exact(self.width.max(1))
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Rgb]> {
        self.pixels.chunks_exact_mut(self.width.max(1))
    }

    /// Rows as disjoint mutable slices for parallel filling.
    pub fn par_rows_mut(&mut self) -> rayon::slice::ChunksExactMut<'_, Rgb> {
        self.pixels.par_chunks_exact_mut(self.width.max(1))
    }

    /// Swap in a new grid, storage and dimensions at once.
    pub fn replace(&mut self, other: PixelGrid) {
        *self = other;
    }
}
