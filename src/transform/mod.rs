//! Geometric transformations applied to a generated grid.
//!
//! Every transform works in place: on success the grid holds the new layout,
//! on error it is left exactly as it was.

mod hilbert;
mod squares;
mod zigzag;

use tracing::debug;

use crate::config::{GenerationConfig, Transform};
use crate::error::Result;
use crate::viz::grid::PixelGrid;

pub use hilbert::{check_level, hilbert};
pub use squares::squares;
pub use zigzag::zigzag;

/// Apply the transform selected in `config`.
pub fn apply(grid: &mut PixelGrid, config: &GenerationConfig) -> Result<()> {
    let before = (grid.width(), grid.height());

    match config.transform {
        Transform::None => return Ok(()),
        Transform::Squares { side } => squares(grid, side)?,
        Transform::Zigzag => zigzag(grid),
        Transform::Hilbert { level } => hilbert(grid, level)?,
    }

    debug!(
        transform = config.transform.name(),
        from = ?before,
        to = ?(grid.width(), grid.height()),
        "Applied transform"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::util::color::Rgb;

    fn numbered(width: usize, height: usize) -> PixelGrid {
        let pixels = (0..width * height).map(|i| Rgb::gray(i as u8)).collect();
        PixelGrid::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn test_none_keeps_grid() {
        let original = numbered(4, 4);
        let mut grid = original.clone();
        apply(&mut grid, &GenerationConfig::default()).unwrap();
        assert_eq!(grid, original);
    }

    #[test]
    fn test_dispatch() {
        let mut config = GenerationConfig::with_mode(Mode::Grayscale);

        config.transform = Transform::Zigzag;
        let mut grid = numbered(2, 2);
        apply(&mut grid, &config).unwrap();
        assert_eq!(grid.get(0, 1), Some(Rgb::gray(3)));

        config.transform = Transform::Hilbert { level: 1 };
        let mut grid = numbered(2, 2);
        apply(&mut grid, &config).unwrap();
        assert_eq!(grid.get(1, 1), Some(Rgb::gray(2)));

        config.transform = Transform::Squares { side: 2 };
        let mut grid = numbered(3, 1);
        apply(&mut grid, &config).unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 2));
    }

    #[test]
    fn test_failed_transform_keeps_grid() {
        let mut config = GenerationConfig::default();
        config.transform = Transform::Hilbert { level: 4 };
        let original = numbered(4, 4);
        let mut grid = original.clone();
        assert!(apply(&mut grid, &config).is_err());
        assert_eq!(grid, original);
    }
}
