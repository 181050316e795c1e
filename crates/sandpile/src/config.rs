//! Sandpile construction parameters.

use crate::error::SandpileError;
use crate::topple::ToppleOrder;

/// Configuration for a [`SandpileGrid`](crate::SandpileGrid).
///
/// Validated at construction. Capacity and order are fixed for the life of
/// the grid; only the dimensions change, through `resize`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SandpileConfig {
    /// Topple threshold. A cell holding at least this many grains is unstable.
    ///
    /// Default: 4, one grain shed per orthogonal neighbour.
    pub capacity: u32,
    pub width: usize,
    pub height: usize,
    pub order: ToppleOrder,
}

impl Default for SandpileConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            order: ToppleOrder::default(),
        }
    }
}

impl SandpileConfig {
    pub const DEFAULT_CAPACITY: u32 = 4;
    pub const DEFAULT_WIDTH: usize = 101;
    pub const DEFAULT_HEIGHT: usize = 101;

    /// Coordinates are `i32`, so each axis must fit.
    pub const MAX_DIM: usize = i32::MAX as usize;

    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: ToppleOrder) -> Self {
        self.order = order;
        self
    }

    /// # Errors
    ///
    /// `InvalidCapacity` if `capacity <= 1`, otherwise whatever
    /// [`validate_dimensions`] reports.
    pub fn validate(&self) -> Result<(), SandpileError> {
        if self.capacity <= 1 {
            return Err(SandpileError::InvalidCapacity {
                capacity: self.capacity,
            });
        }
        validate_dimensions(self.width, self.height)?;
        Ok(())
    }
}

/// Checks that a `width x height` grid is addressable and returns its cell count.
///
/// # Errors
///
/// `InvalidDimensions` if either axis is 0 or above [`SandpileConfig::MAX_DIM`],
/// or the cell count overflows `usize`.
pub fn validate_dimensions(width: usize, height: usize) -> Result<usize, SandpileError> {
    let invalid = || SandpileError::InvalidDimensions {
        width: i64::try_from(width).unwrap_or(i64::MAX),
        height: i64::try_from(height).unwrap_or(i64::MAX),
    };
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    if width > SandpileConfig::MAX_DIM || height > SandpileConfig::MAX_DIM {
        return Err(invalid());
    }
    width.checked_mul(height).ok_or_else(invalid)
}
