//! Pixel generation for every visualization mode.
//!
//! Generators turn a byte window into a [`PixelGrid`]:
//! - Linear modes (grayscale, ascii, entropy) with one pixel per byte or block
//! - Profile modes (entropy histogram, byte histogram) with one line per row
//! - Matrix modes (bigrams, dotplot) with fixed or input-derived dimensions

mod generators;
pub mod grid;

pub use generators::{
    generate, generate_ascii, generate_bigrams, generate_dotplot, generate_entropy,
    generate_entropy_histogram, generate_grayscale, generate_histogram, grid_width,
};
pub use grid::PixelGrid;
