//! Probabilistic car spawning at the approach entries
//!
//! One roll per direction per tick against the configured flow rate. Lanes
//! are filled round-robin so multi-lane approaches load evenly, and a spawn
//! is suppressed when the chosen entry cell is still occupied.

use super::config::FlowRates;
use super::types::Direction;

/// A spawn the world should attempt this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnRequest {
    pub direction: Direction,
    pub lane: i32,
}

/// Plans spawns from configured flow rates; placement is the world's job
#[derive(Debug, Clone)]
pub struct Spawner {
    flows: FlowRates,
    lanes_per_approach: i32,
    /// Next lane to use per direction, advanced on every successful roll
    next_lane: [i32; 4],
}

impl Spawner {
    pub fn new(flows: FlowRates, lanes_per_approach: i32) -> Self {
        Self {
            flows,
            lanes_per_approach,
            next_lane: [0; 4],
        }
    }

    /// Roll each direction once and collect the spawns to attempt.
    ///
    /// `roll` returns true with the given percent probability; it is
    /// injected so the world's (possibly seeded) RNG stays in one place.
    pub fn plan(&mut self, mut roll: impl FnMut(u8) -> bool) -> Vec<SpawnRequest> {
        let mut requests = Vec::new();
        for direction in Direction::ALL {
            if roll(self.flows.get(direction)) {
                let slot = &mut self.next_lane[direction.index()];
                let lane = *slot;
                *slot = (*slot + 1) % self.lanes_per_approach;
                requests.push(SpawnRequest { direction, lane });
            }
        }
        requests
    }
}
