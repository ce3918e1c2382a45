//! Grid geometry: coordinates, bounds, distance, and the movement step.

use std::fmt;

/// A coordinate on the simulation grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column, `0 ..= grid.width`.
    pub x: i32,
    /// Row, `0 ..= grid.height`.
    pub y: i32,
}

impl Point {
    /// Construct a point from its components.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Rectangular grid bounds.
///
/// The valid coordinate range is **inclusive** on both ends:
/// `[0, width] x [0, height]`, i.e. `width + 1` addressable columns and
/// `height + 1` addressable rows. Every bounds check in the workspace goes
/// through [`Grid::contains`] so the convention cannot drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Largest valid x coordinate.
    pub width: i32,
    /// Largest valid y coordinate.
    pub height: i32,
}

impl Grid {
    /// Construct grid bounds from the largest valid coordinates.
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether `p` lies within the inclusive bounds.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x <= self.width && p.y >= 0 && p.y <= self.height
    }
}

/// Manhattan distance `|ax - bx| + |ay - by|`.
///
/// Used for attack range, monster vision, and nearest-target scans.
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// One movement step from `from` toward `to`.
///
/// Closes the x-gap first, one unit per call; y starts closing only once
/// x matches. Never diagonal, never more than one unit total. Returns
/// `from` unchanged when the points already coincide.
pub fn step_toward(from: Point, to: Point) -> Point {
    let mut next = from;
    if next.x < to.x {
        next.x += 1;
    } else if next.x > to.x {
        next.x -= 1;
    } else if next.y < to.y {
        next.y += 1;
    } else if next.y > to.y {
        next.y -= 1;
    }
    next
}
