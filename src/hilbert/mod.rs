//! Hilbert curve walk used to re-order pixel grids.
//!
//! The curve keeps bytes that are close in the input close on screen, which
//! makes local structure easier to spot than in a plain row-major layout.

pub mod curve;

pub use curve::{points_per_side, walk, Cursor, Direction};
