//! Pixel grid generators, one per [`Mode`].
//!
//! Every generator validates its parameters before allocating, and fills the
//! grid row by row in parallel. Rows are disjoint slices, so no two workers
//! ever write the same pixel.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::analysis::{add_counts, byte_counts, calculate_entropy, COUNT_CHUNK, MAX_ENTROPY};
use crate::config::{GenerationConfig, Mode, ProfileStyle};
use crate::error::{Result, VizError};
use crate::util::color::{
    byte_class_color, entropy_intensity, intensity_color, Rgb, BACKGROUND, FOREGROUND, PADDING,
};
use crate::viz::grid::{try_filled_vec, PixelGrid};

/// Side of the fixed bigram matrix.
const BIGRAM_SIDE: usize = 256;

/// Rows in the byte frequency histogram, one per byte value.
const HISTOGRAM_ROWS: usize = 256;

/// Generate the grid for the configured mode.
pub fn generate(bytes: &[u8], config: &GenerationConfig) -> Result<PixelGrid> {
    config.validate()?;

    let grid = match config.mode {
        Mode::Grayscale => generate_grayscale(bytes, config.width)?,
        Mode::Ascii => generate_ascii(bytes, config.width)?,
        Mode::Entropy => generate_entropy(bytes, config)?,
        Mode::EntropyHistogram => generate_entropy_histogram(bytes, config)?,
        Mode::Histogram => generate_histogram(bytes, config.width)?,
        Mode::Bigrams => generate_bigrams(bytes)?,
        Mode::Dotplot => generate_dotplot(bytes, config.max_dotplot_len)?,
    };

    debug!(
        mode = %config.mode,
        width = grid.width(),
        height = grid.height(),
        "Generated grid"
    );
    Ok(grid)
}

/// Width of the grid `generate` will produce for `len` input bytes.
pub fn grid_width(len: usize, config: &GenerationConfig) -> usize {
    match config.mode {
        Mode::Bigrams => BIGRAM_SIDE,
        Mode::Dotplot => len,
        _ => config.width,
    }
}

// =============================================================================
// Linear modes
// =============================================================================

/// Allocate a `width x ceil(len / width)` grid and color every pixel that maps
/// to an input index; the rest of the last row keeps the padding color.
fn generate_linear<F>(len: usize, width: usize, color_at: F) -> Result<PixelGrid>
where
    F: Fn(usize) -> Rgb + Sync,
{
    if width == 0 {
        return Err(VizError::ZeroWidth);
    }

    let height = len.div_ceil(width);
    let mut grid = PixelGrid::filled(width, height, PADDING)?;

    grid.par_rows_mut().enumerate().for_each(|(y, row)| {
        let start = y * width;
        let end = (start + width).min(len);
        for (pixel, idx) in row.iter_mut().zip(start..end) {
            *pixel = color_at(idx);
        }
    });

    Ok(grid)
}

/// Brightness of each pixel is the byte value.
pub fn generate_grayscale(bytes: &[u8], width: usize) -> Result<PixelGrid> {
    generate_linear(bytes.len(), width, |idx| Rgb::gray(bytes[idx]))
}

/// Color of each pixel is the printability class of the byte.
pub fn generate_ascii(bytes: &[u8], width: usize) -> Result<PixelGrid> {
    generate_linear(bytes.len(), width, |idx| byte_class_color(bytes[idx]))
}

/// Every pixel of a block shares the color of the block's entropy.
pub fn generate_entropy(bytes: &[u8], config: &GenerationConfig) -> Result<PixelGrid> {
    let block_size = checked_block_size(config)?;
    if config.width == 0 {
        return Err(VizError::ZeroWidth);
    }

    let block_count = bytes.len().div_ceil(block_size);
    let mut block_colors = try_filled_vec(block_count, BACKGROUND, "entropy block colors")?;
    block_colors
        .par_iter_mut()
        .zip(bytes.par_chunks(block_size))
        .for_each(|(color, block)| {
            let intensity = entropy_intensity(calculate_entropy(block));
            *color = intensity_color(intensity, config.entropy_color);
        });

    generate_linear(bytes.len(), config.width, |idx| {
        block_colors[idx / block_size]
    })
}

// =============================================================================
// Line modes
// =============================================================================

/// Draw a horizontal line of `length` pixels at the start of `row`.
#[inline]
fn draw_line(row: &mut [Rgb], length: usize, style: ProfileStyle) {
    let length = length.min(row.len());
    match style {
        ProfileStyle::Filled => row[..length].fill(FOREGROUND),
        ProfileStyle::Point => {
            if length > 0 {
                row[length - 1] = FOREGROUND;
            }
        }
    }
}

/// One row per block, line length proportional to the block's entropy.
pub fn generate_entropy_histogram(bytes: &[u8], config: &GenerationConfig) -> Result<PixelGrid> {
    let block_size = checked_block_size(config)?;
    let width = config.width;
    if width == 0 {
        return Err(VizError::ZeroWidth);
    }

    let height = bytes.len().div_ceil(block_size);
    let mut grid = PixelGrid::new(width, height)?;

    grid.par_rows_mut()
        .zip(bytes.par_chunks(block_size))
        .for_each(|(row, block)| {
            let entropy_percent = calculate_entropy(block) / MAX_ENTROPY;
            let line_width = (entropy_percent * width as f64) as usize;
            draw_line(row, line_width, config.profile_style);
        });

    Ok(grid)
}

/// Count byte values in parallel, one `u32` table per chunk.
fn par_byte_counts(bytes: &[u8]) -> [u64; 256] {
    bytes
        .par_chunks(COUNT_CHUNK)
        .map(|chunk| {
            let mut wide = [0u64; 256];
            add_counts(&mut wide, &byte_counts(chunk));
            wide
        })
        .reduce(
            || [0u64; 256],
            |mut acc, counts| {
                for (dst, src) in acc.iter_mut().zip(counts) {
                    *dst += src;
                }
                acc
            },
        )
}

/// One row per byte value, line length relative to the most frequent byte.
///
/// An empty input has no most frequent byte; the result is a blank grid.
pub fn generate_histogram(bytes: &[u8], width: usize) -> Result<PixelGrid> {
    if width == 0 {
        return Err(VizError::ZeroWidth);
    }

    let mut grid = PixelGrid::new(width, HISTOGRAM_ROWS)?;
    let occurrences = par_byte_counts(bytes);
    let most_frequent = occurrences.iter().copied().max().unwrap_or(0);

    if most_frequent == 0 {
        warn!("Input is empty, the histogram will be blank");
        return Ok(grid);
    }

    grid.par_rows_mut()
        .zip(occurrences[..].par_iter())
        .for_each(|(row, &count)| {
            let line_width =
                (u128::from(count) * width as u128 / u128::from(most_frequent)) as usize;
            draw_line(row, line_width, ProfileStyle::Filled);
        });

    Ok(grid)
}

// =============================================================================
// Matrix modes
// =============================================================================

/// Mark `(previous, current)` for every pair of adjacent bytes.
pub fn generate_bigrams(bytes: &[u8]) -> Result<PixelGrid> {
    let mut grid = PixelGrid::new(BIGRAM_SIDE, BIGRAM_SIDE)?;

    for pair in bytes.windows(2) {
        grid.set(usize::from(pair[0]), usize::from(pair[1]), FOREGROUND);
    }

    Ok(grid)
}

/// Mark `(x, y)` whenever the x-th and y-th bytes are equal.
///
/// The grid has `len²` pixels, so inputs above `max_len` are rejected before
/// anything is allocated.
pub fn generate_dotplot(bytes: &[u8], max_len: usize) -> Result<PixelGrid> {
    let len = bytes.len();
    if len > max_len {
        return Err(VizError::DotplotTooLarge {
            len,
            limit: max_len,
        });
    }

    let mut grid = PixelGrid::new(len, len)?;
    grid.par_rows_mut().enumerate().for_each(|(y, row)| {
        let current = bytes[y];
        for (pixel, &other) in row.iter_mut().zip(bytes) {
            if other == current {
                *pixel = FOREGROUND;
            }
        }
    });

    Ok(grid)
}

fn checked_block_size(config: &GenerationConfig) -> Result<usize> {
    if config.block_size <= 1 {
        return Err(VizError::BlockSizeTooSmall {
            block_size: config.block_size,
            mode: config.mode,
        });
    }
    Ok(config.block_size)
}
