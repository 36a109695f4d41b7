use std::fmt;

use crate::env::MapDimensions;

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chessboard distance: diagonal steps cost the same as straight ones.
    pub fn chebyshev(self, other: Position) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Returns this position shifted by `offset`.
    pub fn offset(self, offset: Position) -> Position {
        Position::new(self.x + offset.x, self.y + offset.y)
    }

    /// All positions within `radius` of `self` that lie inside `bounds`,
    /// nearest first.
    ///
    /// Ties at the same distance are ordered by row, then column, so the
    /// sequence is deterministic for a given center and radius. Only the
    /// part of the square that overlaps `bounds` is enumerated, so any
    /// radius is safe.
    pub fn closest_first(self, radius: u32, bounds: MapDimensions) -> Vec<Position> {
        let r = i64::from(radius);
        let clamp = |center: i32, extent: u32| {
            let lo = (i64::from(center) - r).max(0);
            let hi = (i64::from(center) + r)
                .min(i64::from(extent) - 1)
                .min(i64::from(i32::MAX));
            (lo, hi)
        };
        let (x_lo, x_hi) = clamp(self.x, bounds.width);
        let (y_lo, y_hi) = clamp(self.y, bounds.height);

        let mut points = Vec::new();
        for y in y_lo..=y_hi {
            for x in x_lo..=x_hi {
                // Both bounds lie in 0..=i32::MAX.
                points.push(Position::new(x as i32, y as i32));
            }
        }
        points.sort_by_key(|p| (self.chebyshev(*p), p.y, p.x));
        points
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
