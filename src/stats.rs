//! Per-solve counters, reported through `tracing` rather than written to a
//! file — persistence format is a collaborator concern, not part of the
//! core's contract (see DESIGN.md).

use std::time::Duration;

use tracing::info;

#[derive(Debug, Clone, Default)]
pub(crate) struct Stats {
    pub(crate) sum_of_costs: usize,
    pub(crate) high_level_expansions: usize,
    pub(crate) wall_time: Duration,
}

impl Stats {
    pub(crate) fn report(&self) {
        info!(
            sum_of_costs = self.sum_of_costs,
            high_level_expansions = self.high_level_expansions,
            wall_time_us = self.wall_time.as_micros() as u64,
            "solve finished"
        );
    }
}
