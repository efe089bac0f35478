//! Reverse every odd row, so consecutive rows read as one continuous line.

use crate::viz::grid::PixelGrid;

pub fn zigzag(grid: &mut PixelGrid) {
    for row in grid.rows_mut().skip(1).step_by(2) {
        row.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::color::Rgb;

    fn numbered(width: usize, height: usize) -> PixelGrid {
        let pixels = (0..width * height).map(|i| Rgb::gray(i as u8)).collect();
        PixelGrid::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn test_odd_rows_reversed() {
        let mut grid = numbered(3, 3);
        zigzag(&mut grid);
        let values: Vec<u8> = grid.pixels().iter().map(|p| p.r).collect();
        assert_eq!(values, vec![0, 1, 2, 5, 4, 3, 6, 7, 8]);
    }

    #[test]
    fn test_twice_is_identity() {
        for (w, h) in [(1, 1), (4, 5), (7, 2), (3, 0)] {
            let original = numbered(w, h);
            let mut grid = original.clone();
            zigzag(&mut grid);
            zigzag(&mut grid);
            assert_eq!(grid, original);
        }
    }
}
