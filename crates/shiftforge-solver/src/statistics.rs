//! Search statistics.

use std::time::Duration;

/// Counters for one solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Branching decisions taken.
    pub branches: u64,
    /// Dead ends hit during search, including the root.
    pub conflicts: u64,
    /// Values forced by propagation.
    pub propagations: u64,
    /// Deepest decision stack reached.
    pub max_depth: usize,
    /// Time spent solving.
    pub wall_time: Duration,
}

impl SearchStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns branches per second, or zero before any time has passed.
    pub fn branches_per_second(&self) -> u64 {
        let secs = self.wall_time.as_secs_f64();
        if secs > 0.0 {
            (self.branches as f64 / secs) as u64
        } else {
            0
        }
    }
}
