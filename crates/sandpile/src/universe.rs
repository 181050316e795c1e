//! JS-facing handle owning one sandpile.
//!
//! The renderer holds a `Universe`, drives it with `tick`/`topple_one`, and
//! reads `cells_ptr` into a `Uint32Array` view over WASM memory. Timing and
//! colours stay on the JS side.

use crate::error::SandpileError;
use crate::{Coord, SandpileConfig, SandpileGrid};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Debug)]
pub struct Universe {
    grid: SandpileGrid,
}

/// JS numbers arrive signed; negative sizes are reported as given.
fn dimensions(width: i32, height: i32) -> Result<(usize, usize), SandpileError> {
    match (usize::try_from(width), usize::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(SandpileError::InvalidDimensions {
            width: i64::from(width),
            height: i64::from(height),
        }),
    }
}

impl Universe {
    /// Wraps an already constructed grid.
    #[must_use]
    pub fn from_grid(grid: SandpileGrid) -> Self {
        Self { grid }
    }

    #[must_use]
    pub fn grid(&self) -> &SandpileGrid {
        &self.grid
    }

    fn build(width: i32, height: i32, capacity: u32) -> Result<Self, SandpileError> {
        let (width, height) = dimensions(width, height)?;
        let config = SandpileConfig::new(width, height).with_capacity(capacity);
        Ok(Self::from_grid(SandpileGrid::new(config)?))
    }
}

#[wasm_bindgen]
impl Universe {
    /// # Errors
    ///
    /// Rejects non-positive dimensions and `capacity <= 1`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: i32, height: i32, capacity: u32) -> Result<Universe, JsError> {
        Ok(Self::build(width, height, capacity)?)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.grid.capacity()
    }

    /// # Errors
    ///
    /// `OutOfBounds` if `(x, y)` is outside the grid.
    pub fn add_grain(&mut self, x: i32, y: i32) -> Result<(), JsError> {
        Ok(self.grid.add_grain(Coord::new(x, y))?)
    }

    pub fn add_grain_center(&mut self) {
        self.grid.add_grain_center();
    }

    pub fn topple_one(&mut self) -> bool {
        self.grid.topple_one()
    }

    /// Runs the cascade to completion and returns the number of topples,
    /// saturating at `u32::MAX`.
    pub fn stabilize(&mut self) -> u32 {
        u32::try_from(self.grid.stabilize().topples).unwrap_or(u32::MAX)
    }

    /// One frame of the centre drip: add a grain, then topple at most once.
    /// Returns whether a topple happened.
    pub fn tick(&mut self) -> bool {
        self.grid.add_grain_center();
        self.grid.topple_one()
    }

    /// # Errors
    ///
    /// `InvalidDimensions` for non-positive sizes; state is kept.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), JsError> {
        let (width, height) = dimensions(width, height)?;
        Ok(self.grid.resize(width, height)?)
    }

    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.grid.is_stable()
    }

    /// Grain count at `(x, y)`; 0 outside the grid.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> u32 {
        self.grid.get(Coord::new(x, y)).unwrap_or(0)
    }

    /// Copy of all cells, row-major.
    #[must_use]
    pub fn cells(&self) -> Vec<u32> {
        self.grid.cells().to_vec()
    }

    /// Pointer to the row-major cell buffer. Invalidated by `resize`.
    #[must_use]
    pub fn cells_ptr(&self) -> *const u32 {
        self.grid.cells().as_ptr()
    }
}
