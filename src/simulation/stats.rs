//! Simulation statistics collection

use super::types::Direction;

/// Aggregate wait-time and throughput statistics for one run
#[derive(Debug, Clone, Default)]
pub struct SimulationStats {
    pub cars_spawned: u64,
    pub cars_exited: u64,
    /// Sum of exit-time waits, for the average
    pub total_wait_ticks: u64,
    /// Longest wait any exited car accumulated
    pub max_wait_ticks: u32,
    /// Ticks each direction held at least one green light
    green_ticks: [u64; 4],
    /// Times the authorized direction changed
    pub switches: u64,
}

impl SimulationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_spawn(&mut self) {
        self.cars_spawned += 1;
    }

    pub fn record_exit(&mut self, wait_ticks: u32) {
        self.cars_exited += 1;
        self.total_wait_ticks += u64::from(wait_ticks);
        self.max_wait_ticks = self.max_wait_ticks.max(wait_ticks);
    }

    pub fn record_green(&mut self, direction: Direction) {
        self.green_ticks[direction.index()] += 1;
    }

    pub fn record_switch(&mut self) {
        self.switches += 1;
    }

    pub fn green_ticks(&self, direction: Direction) -> u64 {
        self.green_ticks[direction.index()]
    }

    /// Average wait of exited cars, in ticks
    pub fn average_wait(&self) -> f64 {
        if self.cars_exited == 0 {
            0.0
        } else {
            self.total_wait_ticks as f64 / self.cars_exited as f64
        }
    }
}
