//! Abelian sandpile simulation engine.

pub mod config;
pub mod coord;
pub mod error;
pub mod topple;
pub mod universe;
pub mod unstable;


pub use config::SandpileConfig;
pub use coord::Coord;
pub use error::SandpileError;
pub use topple::{StabilizeReport, ToppleOrder, ToppleReport};
pub use universe::Universe;

use std::fmt;
use unstable::UnstableSet;

/// 2D grid of grain counts with its pending-topple worklist.
///
/// Cells are stored row-major (`y * width + x`). A cell is in the unstable set
/// exactly when its count is at least `capacity`; every public operation keeps
/// that true on return.
#[derive(Clone, Debug)]
pub struct SandpileGrid {
    width: usize,
    height: usize,
    capacity: u32,
    order: ToppleOrder,
    cells: Vec<u32>,
    unstable: UnstableSet,
    grains_added: u64,
    grains_lost: u64,
    topples: u64,
}

impl Default for SandpileGrid {
    fn default() -> Self {
        let cfg = SandpileConfig::default();
        Self::allocate(&cfg, cfg.width * cfg.height)
    }
}

impl SandpileGrid {
    /// # Errors
    ///
    /// Rejects the configuration if [`SandpileConfig::validate`] fails.
    pub fn new(config: SandpileConfig) -> Result<Self, SandpileError> {
        config.validate()?;
        let cell_count = config::validate_dimensions(config.width, config.height)?;
        if config.capacity < 4 {
            log::warn!(
                "capacity {} is below the neighbour count; topples create grains",
                config.capacity
            );
        }
        log::debug!(
            "new sandpile {}x{} capacity {}",
            config.width,
            config.height,
            config.capacity
        );
        Ok(Self::allocate(&config, cell_count))
    }

    /// Grid with the default capacity of 4.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` if either axis is 0 or too large.
    pub fn with_dimensions(width: usize, height: usize) -> Result<Self, SandpileError> {
        Self::new(SandpileConfig::new(width, height))
    }

    fn allocate(config: &SandpileConfig, cell_count: usize) -> Self {
        Self {
            width: config.width,
            height: config.height,
            capacity: config.capacity,
            order: config.order,
            cells: vec![0; cell_count],
            unstable: UnstableSet::with_cells(cell_count),
            grains_added: 0,
            grains_lost: 0,
            topples: 0,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[must_use]
    pub fn order(&self) -> ToppleOrder {
        self.order
    }

    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0
            && (coord.x as usize) < self.width
            && coord.y >= 0
            && (coord.y as usize) < self.height
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.in_bounds(coord)
            .then(|| coord.y as usize * self.width + coord.x as usize)
    }

    fn coord_of(&self, index: usize) -> Coord {
        Coord::new((index % self.width) as i32, (index / self.width) as i32)
    }

    fn out_of_bounds(&self, coord: Coord) -> SandpileError {
        SandpileError::OutOfBounds {
            coord,
            width: self.width,
            height: self.height,
        }
    }

    /// `(width / 2, height / 2)`, always in bounds.
    #[must_use]
    pub fn center(&self) -> Coord {
        Coord::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Grain count at `coord`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<u32> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// # Errors
    ///
    /// `OutOfBounds` if `(x, y)` is outside the grid.
    pub fn get_cell(&self, x: i32, y: i32) -> Result<u32, SandpileError> {
        let coord = Coord::new(x, y);
        self.get(coord).ok_or_else(|| self.out_of_bounds(coord))
    }

    /// Row-major view of every cell, reflecting any in-progress cascade.
    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// # Errors
    ///
    /// `OutOfBounds` if `coord` is outside the grid; nothing is changed.
    pub fn add_grain(&mut self, coord: Coord) -> Result<(), SandpileError> {
        self.add_grains(coord, 1)
    }

    /// Adds `count` grains to one cell without toppling.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if `coord` is outside the grid, `CellOverflow` if the
    /// cell cannot hold `count` more grains. Nothing is changed on error.
    pub fn add_grains(&mut self, coord: Coord, count: u32) -> Result<(), SandpileError> {
        let index = self.index(coord).ok_or_else(|| self.out_of_bounds(coord))?;
        if self.cells[index].checked_add(count).is_none() {
            return Err(SandpileError::CellOverflow { coord, count });
        }
        self.deposit(index, count);
        Ok(())
    }

    /// Drops one grain on [`center`](Self::center). A full cell (`u32::MAX`)
    /// ignores the grain.
    pub fn add_grain_center(&mut self) {
        let index = (self.height / 2) * self.width + self.width / 2;
        if self.cells[index] < u32::MAX {
            self.deposit(index, 1);
        }
    }

    /// Caller guarantees the cell has room for `count`.
    fn deposit(&mut self, index: usize, count: u32) {
        if count == 0 {
            return;
        }
        self.cells[index] += count;
        self.grains_added += u64::from(count);
        if self.cells[index] >= self.capacity {
            self.unstable.insert(index);
        }
    }

    /// Topples one pending cell, returning whether any work was done.
    pub fn topple_one(&mut self) -> bool {
        self.topple_step().is_some()
    }

    /// Topples the next pending cell chosen by the configured [`ToppleOrder`].
    ///
    /// The cell loses `capacity` grains and each in-bounds orthogonal neighbour
    /// gains one; grains aimed off the grid, or at a neighbour already holding
    /// `u32::MAX`, are lost. Returns `None` when the grid is already stable.
    pub fn topple_step(&mut self) -> Option<ToppleReport> {
        let index = self.unstable.pop(self.order)?;
        let coord = self.coord_of(index);

        self.cells[index] -= self.capacity;
        let remaining = self.cells[index];
        if remaining >= self.capacity {
            self.unstable.insert(index);
        }

        let mut lost = 0;
        for neighbor in coord.neighbors() {
            let Some(n) = self.index(neighbor) else {
                lost += 1;
                continue;
            };
            let Some(count) = self.cells[n].checked_add(1) else {
                lost += 1;
                continue;
            };
            self.cells[n] = count;
            if count >= self.capacity {
                self.unstable.insert(n);
            }
        }

        self.topples += 1;
        self.grains_lost += u64::from(lost);
        log::trace!("topple {coord}: {remaining} remaining, {lost} lost");
        Some(ToppleReport {
            coord,
            remaining,
            lost,
        })
    }

    /// Topples until no cell is at or above capacity.
    ///
    /// Always terminates for `capacity >= 4`. With capacity 2 or 3 every
    /// interior topple creates grains, and on all but the smallest grids the
    /// cascade grows without end, so this call never returns. Drive such grids
    /// with [`stabilize_bounded`](Self::stabilize_bounded) instead.
    pub fn stabilize(&mut self) -> StabilizeReport {
        self.stabilize_bounded(u64::MAX)
    }

    /// Topples at most `max_topples` cells. `stable` in the report tells
    /// whether the worklist drained.
    pub fn stabilize_bounded(&mut self, max_topples: u64) -> StabilizeReport {
        let mut report = StabilizeReport::default();
        while report.topples < max_topples {
            match self.topple_step() {
                Some(step) => report.record(&step),
                None => break,
            }
        }
        report.stable = self.is_stable();
        if report.topples > 0 {
            log::debug!(
                "stabilize: {} topples, {} grains lost, stable {}",
                report.topples,
                report.grains_lost,
                report.stable
            );
        }
        report
    }

    /// Discards all grains and pending topples and allocates an empty
    /// `width x height` grid. Capacity and order are kept.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` if either axis is 0 or too large; the current grid
    /// is kept.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), SandpileError> {
        let cell_count = config::validate_dimensions(width, height)?;
        let config = SandpileConfig {
            capacity: self.capacity,
            width,
            height,
            order: self.order,
        };
        *self = Self::allocate(&config, cell_count);
        log::debug!("resized sandpile to {width}x{height}");
        Ok(())
    }

    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.unstable.is_empty()
    }

    /// Whether `coord` is waiting to topple. `false` outside the grid.
    #[must_use]
    pub fn is_pending(&self, coord: Coord) -> bool {
        self.index(coord).is_some_and(|i| self.unstable.contains(i))
    }

    #[must_use]
    pub fn unstable_count(&self) -> usize {
        self.unstable.len()
    }

    /// Pending cells in the order they were marked.
    pub fn unstable_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.unstable.iter().map(|i| self.coord_of(i))
    }

    #[must_use]
    pub fn total_grains(&self) -> u64 {
        self.cells.iter().map(|&c| u64::from(c)).sum()
    }

    /// Grains added since construction or the last resize.
    #[must_use]
    pub fn grains_added(&self) -> u64 {
        self.grains_added
    }

    /// Grains that fell off the grid edge since construction or the last resize.
    #[must_use]
    pub fn grains_lost(&self) -> u64 {
        self.grains_lost
    }

    /// Topples performed since construction or the last resize.
    #[must_use]
    pub fn topples(&self) -> u64 {
        self.topples
    }
}

/// One row per line, one digit per cell; counts of 10 or more print as `#`.
impl fmt::Display for SandpileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &count in row {
                let ch = char::from_digit(count, 10).unwrap_or('#');
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
