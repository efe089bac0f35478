//! Error types for generation, transformation, reading and exporting.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::Mode;

/// Errors that can abort a visualization pipeline.
#[derive(Error, Debug)]
pub enum VizError {
    /// The output width must be at least one pixel.
    #[error("The output width must be greater than zero")]
    ZeroWidth,

    /// Entropy-based modes need blocks of at least two bytes.
    #[error("The block size ({block_size}) is too small for the current mode ({mode})")]
    BlockSizeTooSmall { block_size: usize, mode: Mode },

    /// The Hilbert curve needs `2^level` points per square side.
    #[error("Not enough width ({width}) for hilbert level {level} (expected at least {points})")]
    HilbertLevelTooLarge {
        level: u32,
        width: usize,
        points: usize,
    },

    /// Each Hilbert point must cover a whole number of pixels.
    #[error("Need to draw {points} hilbert points per side, but the width ({width}) is not divisible")]
    HilbertWidthNotDivisible { points: usize, width: usize },

    /// Dotplot grids grow with the square of the input length.
    #[error("Input of {len} bytes is too large for the dotplot mode (limit is {limit} bytes)")]
    DotplotTooLarge { len: usize, limit: usize },

    /// The requested grid dimensions overflow `usize`.
    #[error("Grid dimensions {width}x{height} are too large")]
    DimensionOverflow { width: usize, height: usize },

    /// A pixel buffer whose length does not match its dimensions.
    #[error("Expected {expected} pixels for the grid, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },

    /// A pixel or auxiliary buffer could not be allocated.
    #[error("Failed to allocate {what}: {source}")]
    Allocation {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },

    /// Input offsets that do not describe a valid window.
    #[error("Invalid input window: {0}")]
    InvalidWindow(String),

    /// Exporters refuse to encode empty images.
    #[error("Refusing to export an empty {width}x{height} image")]
    EmptyImage { width: usize, height: usize },

    /// The zoom factor must be at least one.
    #[error("The zoom factor must be greater than zero")]
    ZeroZoom,

    /// Failure while reading or writing a file.
    #[error("I/O error on {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failure on a stream without a path (stdin, stdout).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding failure.
    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),

    /// Malformed configuration file.
    #[error("Invalid configuration file {path}: {message}")]
    Config { path: PathBuf, message: String },
}

/// Type alias for Result with [`VizError`].
pub type Result<T> = std::result::Result<T, VizError>;

impl VizError {
    pub(crate) fn file(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }
}
