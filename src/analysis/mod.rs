//! Analysis primitives shared by the generators.
//!
//! - Shannon entropy and byte frequency counting
//! - Byte printability classification

pub mod byte;
pub mod entropy;

pub use byte::ByteClass;
pub use entropy::{
    add_counts, byte_counts, byte_counts_wide, calculate_entropy, COUNT_CHUNK, MAX_ENTROPY,
};
