//! Utility functions shared across the crate.
//!
//! This module provides common utilities for:
//! - Colors and palettes
//! - Data formatting and parsing

pub mod color;
pub mod format;

pub use color::Rgb;
pub use format::{format_bytes, parse_hex_offset};
