//! Per-solve search state visible to terminations.

use std::time::{Duration, Instant};

use crate::statistics::SearchStatistics;

/// State of a running search.
///
/// Created when a solve starts. Terminations read it to decide whether the
/// search should stop.
#[derive(Debug, Clone)]
pub struct SearchScope {
    start_time: Instant,
    statistics: SearchStatistics,
}

impl SearchScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            statistics: SearchStatistics::new(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn branch_count(&self) -> u64 {
        self.statistics.branches
    }

    pub fn conflict_count(&self) -> u64 {
        self.statistics.conflicts
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    pub fn increment_branch_count(&mut self) {
        self.statistics.branches += 1;
    }

    pub fn increment_conflict_count(&mut self) {
        self.statistics.conflicts += 1;
    }

    pub fn add_propagations(&mut self, count: u64) {
        self.statistics.propagations += count;
    }

    pub fn record_depth(&mut self, depth: usize) {
        self.statistics.max_depth = self.statistics.max_depth.max(depth);
    }

    /// Stops the clock and returns the final statistics.
    pub fn finish(mut self) -> SearchStatistics {
        self.statistics.wall_time = self.start_time.elapsed();
        self.statistics
    }
}

impl Default for SearchScope {
    fn default() -> Self {
        Self::new()
    }
}
