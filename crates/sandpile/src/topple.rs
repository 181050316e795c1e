//! Topple scheduling policy and per-step results.

use crate::coord::Coord;

/// Which unstable cell is toppled next when several are pending.
///
/// The final stable configuration does not depend on this choice; only the
/// intermediate states a renderer sees do.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum ToppleOrder {
    /// Oldest pending cell first.
    #[default]
    Fifo,
    /// Most recently marked cell first.
    Lifo,
}

/// Outcome of a single topple.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ToppleReport {
    /// The cell that toppled.
    pub coord: Coord,
    /// Its grain count after shedding `capacity` grains.
    pub remaining: u32,
    /// Grains that fell off the grid edge during this topple.
    pub lost: u32,
}

/// Outcome of a [`stabilize`](crate::SandpileGrid::stabilize) run.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct StabilizeReport {
    pub topples: u64,
    pub grains_lost: u64,
    /// False only when a bounded run hit its topple budget first.
    pub stable: bool,
}

impl StabilizeReport {
    pub(crate) fn record(&mut self, step: &ToppleReport) {
        self.topples += 1;
        self.grains_lost += u64::from(step.lost);
    }
}
