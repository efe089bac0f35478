//! Bingraph - render binary files as images.
//!
//! The library turns a window of bytes into an RGB pixel grid using one of
//! several visualization modes:
//! - Per-byte modes (grayscale, printability classes)
//! - Shannon entropy per block, as pixels or as a profile
//! - Byte frequency histogram
//! - Bigram and dotplot matrices
//!
//! Grids can then be re-laid out (squares, zig-zag, Hilbert curve) and
//! exported as PNG or as ANSI-escaped text.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod hilbert;
pub mod io;
pub mod pipeline;
pub mod transform;
pub mod util;
pub mod viz;

pub use config::{GenerationConfig, Mode, Transform};
pub use error::{Result, VizError};
pub use pipeline::render;
pub use viz::PixelGrid;
