//! Simulation configuration
//!
//! Out-of-range values are rejected here, at load time; the per-tick core
//! only ever sees validated parameters.

use anyhow::{bail, Result};

use super::types::{Direction, SENSE_WINDOW};

/// Per-direction traffic flow rates on a 0-100 scale.
///
/// Each rate is the percent chance per tick that one car appears at that
/// approach's entry. Flow only reaches the controller indirectly, through
/// the occupancy the lane sensors observe.
#[derive(Debug, Clone, Copy)]
pub struct FlowRates {
    pub east: u8,
    pub west: u8,
    pub north: u8,
    pub south: u8,
}

impl FlowRates {
    pub fn new(east: u8, west: u8, north: u8, south: u8) -> Self {
        Self {
            east,
            west,
            north,
            south,
        }
    }

    /// Uniform flow in every direction
    #[allow(dead_code)]
    pub fn uniform(rate: u8) -> Self {
        Self::new(rate, rate, rate, rate)
    }

    pub fn get(&self, direction: Direction) -> u8 {
        match direction {
            Direction::East => self.east,
            Direction::West => self.west,
            Direction::North => self.north,
            Direction::South => self.south,
        }
    }
}

impl Default for FlowRates {
    fn default() -> Self {
        Self::new(30, 30, 20, 20)
    }
}

/// Full simulation configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Side length of the square grid, in cells
    pub grid_size: i32,

    /// Lanes per approach direction; the reference layout uses 3
    /// (left / straight / right), giving 12 lights in total
    pub lanes_per_approach: i32,

    /// Spawn probabilities per direction
    pub flows: FlowRates,

    /// Optional RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size: 32,
            lanes_per_approach: 3,
            flows: FlowRates::default(),
            seed: None,
        }
    }
}

impl SimConfig {
    /// Check that the configuration describes a buildable world.
    ///
    /// The grid must leave room for every sensing window: each approach needs
    /// `SENSE_WINDOW` cells between its stop line and the grid edge.
    pub fn validate(&self) -> Result<()> {
        if self.lanes_per_approach < 1 {
            bail!(
                "lanes_per_approach must be at least 1, got {}",
                self.lanes_per_approach
            );
        }

        let minimum = 2 * (self.lanes_per_approach + SENSE_WINDOW);
        if self.grid_size < minimum {
            bail!(
                "grid_size {} too small for {} lanes and a {}-cell sensing window (need at least {})",
                self.grid_size,
                self.lanes_per_approach,
                SENSE_WINDOW,
                minimum
            );
        }

        for direction in Direction::ALL {
            let rate = self.flows.get(direction);
            if rate > 100 {
                bail!(
                    "flow rate for {} is {}, must be within 0-100",
                    direction,
                    rate
                );
            }
        }

        Ok(())
    }
}
