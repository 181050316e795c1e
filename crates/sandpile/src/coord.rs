//! Cell coordinates and the von Neumann neighbourhood.

use std::fmt;

/// Offsets of the four orthogonal neighbours: east, west, south, north.
///
/// The order matches the reference topple sequence; it only affects which
/// neighbour enters the unstable set first.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// A cell position. `x` indexes columns (`0..width`), `y` rows (`0..height`).
///
/// Signed so that neighbour arithmetic at the border stays representable;
/// bounds are checked by the grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Coord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four orthogonal neighbours, in [`NEIGHBOR_OFFSETS`] order.
    /// Positions outside any grid are included; callers filter them.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        NEIGHBOR_OFFSETS
            .into_iter()
            .map(move |(dx, dy)| self.offset(dx, dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn coord_is_8_bytes() {
        assert_eq!(std::mem::size_of::<Coord>(), 8);
    }

    #[test]
    fn neighbors_are_orthogonal() {
        let n: Vec<Coord> = Coord::new(1, 1).neighbors().collect();
        assert_eq!(
            n,
            vec![
                Coord::new(2, 1),
                Coord::new(0, 1),
                Coord::new(1, 2),
                Coord::new(1, 0),
            ]
        );
    }

    #[test]
    fn neighbors_of_origin_include_negative_positions() {
        let n: Vec<Coord> = Coord::default().neighbors().collect();
        assert!(n.contains(&Coord::new(-1, 0)));
        assert!(n.contains(&Coord::new(0, -1)));
    }

    #[test]
    fn coord_display() {
        assert_eq!(format!("{}", Coord::new(3, -2)), "(3, -2)");
        assert_eq!(Coord::from((4, 5)), Coord::new(4, 5));
    }

    proptest! {
        #[test]
        fn prop_neighbors_are_at_manhattan_distance_one(
            x in -1000i32..1000,
            y in -1000i32..1000,
        ) {
            let c = Coord::new(x, y);
            for n in c.neighbors() {
                prop_assert_eq!((n.x - x).abs() + (n.y - y).abs(), 1);
            }
            let unique: std::collections::HashSet<Coord> = c.neighbors().collect();
            prop_assert_eq!(unique.len(), 4);
        }
    }
}
