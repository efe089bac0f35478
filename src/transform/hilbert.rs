//! Re-order a linear grid along stacked Hilbert curves.
//!
//! The destination is tiled by `width x width` squares stacked vertically,
//! one curve per square. Each curve point covers a block of
//! `width / 2^level` pixels per side. Source pixels are consumed in row-major
//! order; drawing stops as soon as the source runs out, even mid-square.

use std::ops::ControlFlow;

use tracing::debug;

use crate::error::{Result, VizError};
use crate::hilbert::{points_per_side, walk, Cursor, Direction};
use crate::util::color::Rgb;
use crate::viz::grid::PixelGrid;

/// Destination of the walk: copies the next source pixels into the block
/// under the cursor.
struct BlockPainter<'a> {
    source: &'a [Rgb],
    next: usize,
    output: &'a mut PixelGrid,
    block_side: usize,
}

impl BlockPainter<'_> {
    fn exhausted(&self) -> bool {
        self.next >= self.source.len()
    }

    fn draw(&mut self, at: Cursor) -> ControlFlow<()> {
        let base_x = at.x * self.block_side;
        let base_y = at.y * self.block_side;

        for y in 0..self.block_side {
            for x in 0..self.block_side {
                let Some(&pixel) = self.source.get(self.next) else {
                    return ControlFlow::Break(());
                };
                let placed = self.output.set(base_x + x, base_y + y, pixel);
                debug_assert!(placed, "hilbert block outside the canvas");
                self.next += 1;
            }
        }

        ControlFlow::Continue(())
    }
}

/// Check that a curve of `level` fits the width exactly. Returns the number
/// of points per side.
pub fn check_level(level: u32, width: usize) -> Result<usize> {
    let points = points_per_side(level).unwrap_or(usize::MAX);
    if points > width {
        return Err(VizError::HilbertLevelTooLarge {
            level,
            width,
            points,
        });
    }
    if width % points != 0 {
        return Err(VizError::HilbertWidthNotDivisible { points, width });
    }
    Ok(points)
}

/// Apply the Hilbert re-ordering with the given recursion level. Level 0
/// leaves the grid untouched.
///
/// The level is validated against the grid width before anything is
/// allocated; on error the grid is unchanged.
pub fn hilbert(grid: &mut PixelGrid, level: u32) -> Result<()> {
    if level == 0 {
        return Ok(());
    }

    let width = grid.width();
    let points = check_level(level, width)?;
    let block_side = width / points;

    let height = grid
        .height()
        .checked_next_multiple_of(width)
        .ok_or(VizError::DimensionOverflow {
            width,
            height: grid.height(),
        })?;

    debug!(level, points, block_side, height, "Hilbert layout");

    let mut output = PixelGrid::new(width, height)?;
    let mut painter = BlockPainter {
        source: grid.pixels(),
        next: 0,
        output: &mut output,
        block_side,
    };

    // One curve per square, each starting on the top-left block of its square
    // and ending on the bottom-left one.
    let mut square = 0;
    while !painter.exhausted() {
        let mut cursor = Cursor::new(0, square * points);
        if walk(level, Direction::Left, &mut cursor, &mut |at| painter.draw(at)).is_break() {
            break;
        }
        square += 1;
    }

    grid.replace(output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::color::BACKGROUND;

    fn numbered(width: usize, height: usize) -> PixelGrid {
        let pixels = (0..width * height).map(|i| Rgb::new(i as u8, (i >> 8) as u8, 1)).collect();
        PixelGrid::from_pixels(width, height, pixels).unwrap()
    }

    fn values(grid: &PixelGrid) -> Vec<u8> {
        grid.pixels().iter().map(|p| p.r).collect()
    }

    #[test]
    fn test_rejects_level_wider_than_grid() {
        let original = numbered(4, 4);
        let mut grid = original.clone();
        assert!(matches!(
            hilbert(&mut grid, 3),
            Err(VizError::HilbertLevelTooLarge { points: 8, .. })
        ));
        assert_eq!(grid, original);
    }

    #[test]
    fn test_rejects_indivisible_width() {
        let original = numbered(6, 2);
        let mut grid = original.clone();
        assert!(matches!(
            hilbert(&mut grid, 2),
            Err(VizError::HilbertWidthNotDivisible { points: 4, width: 6 })
        ));
        assert_eq!(grid, original);
    }

    #[test]
    fn test_huge_level_is_rejected() {
        let mut grid = numbered(4, 1);
        assert!(hilbert(&mut grid, 200).is_err());
    }

    #[test]
    fn test_level_one_single_pixel_blocks() {
        let mut grid = numbered(2, 2);
        hilbert(&mut grid, 1).unwrap();
        // Curve order (0,0) (1,0) (1,1) (0,1)
        assert_eq!(values(&grid), vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_level_two_layout() {
        let mut grid = numbered(4, 4);
        hilbert(&mut grid, 2).unwrap();
        assert_eq!(
            values(&grid),
            vec![
                0, 3, 4, 5, //
                1, 2, 7, 6, //
                14, 13, 8, 9, //
                15, 12, 11, 10,
            ]
        );
    }

    #[test]
    fn test_blocks_cover_several_pixels() {
        // Width 4 at level 1: each curve point is a 2x2 block
        let mut grid = numbered(4, 4);
        hilbert(&mut grid, 1).unwrap();
        assert_eq!(
            values(&grid),
            vec![
                0, 1, 4, 5, //
                2, 3, 6, 7, //
                12, 13, 8, 9, //
                14, 15, 10, 11,
            ]
        );
    }

    #[test]
    fn test_squares_stack_and_height_is_padded() {
        // 2x5 grid: three 2x2 squares, the last one partially filled
        let mut grid = numbered(2, 5);
        hilbert(&mut grid, 1).unwrap();

        assert_eq!((grid.width(), grid.height()), (2, 6));
        let v = values(&grid);
        assert_eq!(&v[..4], &[0, 1, 3, 2]);
        assert_eq!(&v[4..8], &[4, 5, 7, 6]);
        assert_eq!(&v[8..10], &[8, 9]);
        assert_eq!(&grid.pixels()[10..], &[BACKGROUND, BACKGROUND]);
    }

    #[test]
    fn test_every_source_pixel_is_placed_once() {
        let original = numbered(8, 13);
        let mut grid = original.clone();
        hilbert(&mut grid, 3).unwrap();

        assert_eq!((grid.width(), grid.height()), (8, 16));
        let mut placed: Vec<(u8, u8)> = grid
            .pixels()
            .iter()
            .filter(|p| p.b == 1)
            .map(|p| (p.g, p.r))
            .collect();
        placed.sort_unstable();
        let mut expected: Vec<(u8, u8)> = original.pixels().iter().map(|p| (p.g, p.r)).collect();
        expected.sort_unstable();
        assert_eq!(placed, expected);
    }

    #[test]
    fn test_level_zero_is_noop() {
        let original = numbered(3, 3);
        let mut grid = original.clone();
        hilbert(&mut grid, 0).unwrap();
        assert_eq!(grid, original);
    }
}
