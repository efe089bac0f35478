//! Recursive Hilbert curve walk.
//!
//! The curve is built from "U" shapes. A level-1 curve visits four points
//! with three unit moves; a level-N curve visits four level-(N-1) curves with
//! rotated orientations, joined by the same three moves. The walk mutates a
//! [`Cursor`] in block coordinates and calls a plot function on every point.

use std::ops::ControlFlow;

/// Orientation of a "U" shape, named after the side it opens towards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The three moves that join the four points (or sub-curves) of a "U"
    /// with this orientation.
    ///
    /// ```text
    ///   Up         Left
    ///   o  o       o--o
    ///   |  |          |
    ///   o--o       o--o
    /// ```
    const fn moves(self) -> [Direction; 3] {
        match self {
            Self::Up => [Self::Down, Self::Right, Self::Up],
            Self::Down => [Self::Up, Self::Left, Self::Down],
            Self::Left => [Self::Right, Self::Down, Self::Left],
            Self::Right => [Self::Left, Self::Up, Self::Right],
        }
    }

    /// Orientations of the four sub-curves of a curve with this orientation.
    const fn children(self) -> [Direction; 4] {
        match self {
            Self::Up => [Self::Left, Self::Up, Self::Up, Self::Right],
            Self::Down => [Self::Right, Self::Down, Self::Down, Self::Left],
            Self::Left => [Self::Up, Self::Left, Self::Left, Self::Down],
            Self::Right => [Self::Down, Self::Right, Self::Right, Self::Up],
        }
    }
}

/// Current position of the walk, in blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub x: usize,
    pub y: usize,
}

impl Cursor {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Move one block. A curve started at its own corner never leaves its
    /// square, so moves towards zero never underflow.
    #[inline]
    fn step(&mut self, direction: Direction) {
        match direction {
            Direction::Up => {
                debug_assert!(self.y > 0, "hilbert walk moved above the canvas");
                self.y = self.y.saturating_sub(1);
            }
            Direction::Down => self.y += 1,
            Direction::Left => {
                debug_assert!(self.x > 0, "hilbert walk moved left of the canvas");
                self.x = self.x.saturating_sub(1);
            }
            Direction::Right => self.x += 1,
        }
    }
}

/// Number of points per side of a curve of the given level, if it fits in
/// `usize`.
pub fn points_per_side(level: u32) -> Option<usize> {
    1usize.checked_shl(level)
}

/// Walk a Hilbert curve of `level` (at least 1) with the given orientation,
/// starting at `cursor` and plotting every point in curve order.
///
/// `plot` may return `Break` to stop the walk early; the break is propagated
/// to the caller. On completion `cursor` holds the last plotted point.
pub fn walk<F>(level: u32, direction: Direction, cursor: &mut Cursor, plot: &mut F) -> ControlFlow<()>
where
    F: FnMut(Cursor) -> ControlFlow<()>,
{
    let [m1, m2, m3] = direction.moves();

    if level <= 1 {
        plot(*cursor)?;
        cursor.step(m1);
        plot(*cursor)?;
        cursor.step(m2);
        plot(*cursor)?;
        cursor.step(m3);
        plot(*cursor)
    } else {
        let [c1, c2, c3, c4] = direction.children();
        walk(level - 1, c1, cursor, plot)?;
        cursor.step(m1);
        walk(level - 1, c2, cursor, plot)?;
        cursor.step(m2);
        walk(level - 1, c3, cursor, plot)?;
        cursor.step(m3);
        walk(level - 1, c4, cursor, plot)
    }
}
