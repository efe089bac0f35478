//! Group linear runs of pixels into `side x side` squares.

use crate::error::{Result, VizError};
use crate::viz::grid::{checked_area, PixelGrid};

/// Re-lay the grid so that every run of `side²` consecutive pixels forms a
/// square, squares being laid out left to right, top to bottom.
///
/// Width and height are padded up to the next multiple of `side`; padding
/// pixels are background. Sides below 2 leave the grid untouched.
pub fn squares(grid: &mut PixelGrid, side: usize) -> Result<()> {
    if side < 2 || grid.is_empty() {
        return Ok(());
    }

    let overflow = || VizError::DimensionOverflow {
        width: grid.width(),
        height: grid.height(),
    };
    let width = grid.width().checked_next_multiple_of(side).ok_or_else(overflow)?;
    let height = grid.height().checked_next_multiple_of(side).ok_or_else(overflow)?;
    let square_size = checked_area(side, side)?;

    let mut output = PixelGrid::new(width, height)?;

    // Number of squares in each row. Division is exact after padding.
    let squares_per_row = width / side;

    for (i, &pixel) in grid.pixels().iter().enumerate() {
        let square_num = i / square_size;
        let square_x = square_num % squares_per_row;
        let square_y = square_num / squares_per_row;

        let internal_num = i % square_size;
        let internal_x = internal_num % side;
        let internal_y = internal_num / side;

        let placed = output.set(
            side * square_x + internal_x,
            side * square_y + internal_y,
            pixel,
        );
        debug_assert!(placed, "square layout ran past the padded grid");
    }

    grid.replace(output);
    Ok(())
}
