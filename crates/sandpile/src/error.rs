//! Error types for sandpile operations.

use crate::coord::Coord;
use std::fmt;

/// Every variant is a rejected request; the grid is left unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SandpileError {
    /// A coordinate lies outside `[0, width) x [0, height)`.
    OutOfBounds {
        coord: Coord,
        width: usize,
        height: usize,
    },
    /// A grid dimension is non-positive or too large to address with `i32`.
    InvalidDimensions { width: i64, height: i64 },
    /// Adding `count` grains would overflow the cell's `u32` counter.
    CellOverflow { coord: Coord, count: u32 },
    /// Topple threshold must be greater than 1.
    InvalidCapacity { capacity: u32 },
}

impl fmt::Display for SandpileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                coord,
                width,
                height,
            } => {
                write!(f, "coordinate {coord} out of bounds for {width}x{height} grid")
            }
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
            Self::CellOverflow { coord, count } => {
                write!(f, "adding {count} grains overflows cell {coord}")
            }
            Self::InvalidCapacity { capacity } => {
                write!(f, "invalid capacity {capacity}: must be greater than 1")
            }
        }
    }
}

impl std::error::Error for SandpileError {}
