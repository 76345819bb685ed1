//! Central signal controller: the direction-switching algorithm
//!
//! Once per tick the controller takes the aggregated per-direction demand
//! and decides which direction holds the right of way. Priority order is
//! starvation override, then queue-drain-gated hysteresis switch, then hold
//! steady. This bounds worst-case wait by the starvation threshold while
//! favoring high-throughput directions under normal load.

use log::debug;

use super::light::TrafficLight;
use super::types::{
    Direction, STARVATION_DWELL_GUARD, SWITCH_MARGIN, THRESHOLD_BASE, THRESHOLD_MAX,
    THRESHOLD_STEP,
};

/// Aggregated demand per direction for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemandMap {
    counts: [u32; 4],
}

impl DemandMap {
    pub fn get(&self, direction: Direction) -> u32 {
        self.counts[direction.index()]
    }

    pub fn add(&mut self, direction: Direction, demand: u32) {
        self.counts[direction.index()] += demand;
    }

    /// Direction with the highest demand. Ties resolve to the earliest
    /// direction in the fixed priority order East > West > North > South.
    pub fn busiest(&self) -> Direction {
        let mut best = Direction::East;
        for direction in Direction::ALL {
            if self.get(direction) > self.get(best) {
                best = direction;
            }
        }
        best
    }
}

/// Sum each light's sensed demand into its direction's bucket.
///
/// An empty light set yields the all-zero map. The map is recomputed fresh
/// each tick and handed to the controller as a value, so stale cross-tick
/// aggregates cannot leak into a decision.
pub fn aggregate_demand(lights: &[TrafficLight]) -> DemandMap {
    let mut demand = DemandMap::default();
    for light in lights {
        demand.add(light.direction, light.demand);
    }
    demand
}

/// The decision the controller publishes each tick; lights actuate off it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalDecision {
    pub authorized: Direction,
    pub dwell_ticks: u32,
}

/// The decision authority over the intersection's right of way
#[derive(Debug, Clone)]
pub struct SignalController {
    /// The single direction currently allowed green
    pub authorized: Direction,
    /// Ticks since the authorized direction last changed
    pub dwell_ticks: u32,
    /// Waiting-time bound past which a lane forcibly seizes the green;
    /// adapted by the governor within [THRESHOLD_BASE, THRESHOLD_MAX]
    pub starvation_threshold: u32,
}

impl Default for SignalController {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalController {
    pub fn new() -> Self {
        Self {
            authorized: Direction::East,
            dwell_ticks: 0,
            starvation_threshold: THRESHOLD_BASE,
        }
    }

    /// The published decision for this tick
    pub fn decision(&self) -> SignalDecision {
        SignalDecision {
            authorized: self.authorized,
            dwell_ticks: self.dwell_ticks,
        }
    }

    /// Run the switching algorithm exactly once for this tick.
    ///
    /// `demand` is the freshly aggregated per-direction map; `lights` is
    /// read for waiting times and stop-line occupancy only.
    pub fn decide(&mut self, demand: &DemandMap, lights: &[TrafficLight]) {
        self.dwell_ticks += 1;
        let forced = self.starvation_override(lights);
        self.decay_threshold(lights);
        if !forced {
            self.hysteresis_switch(demand, lights);
        }
    }

    /// Anti-starvation guarantee: the first light whose waiting time has
    /// exceeded the threshold seizes the green for its direction, bypassing
    /// the hysteresis test. Returns true if a light forced the switch.
    fn starvation_override(&mut self, lights: &[TrafficLight]) -> bool {
        for light in lights {
            if light.waiting_time > self.starvation_threshold {
                self.authorized = light.direction;
                if self.dwell_ticks > STARVATION_DWELL_GUARD {
                    self.dwell_ticks = 0;
                    self.starvation_threshold =
                        (self.starvation_threshold + THRESHOLD_STEP).min(THRESHOLD_MAX);
                    debug!(
                        "starvation override: {} seized green (threshold now {})",
                        light.direction, self.starvation_threshold
                    );
                }
                return true;
            }
        }
        false
    }

    /// Governor decay: once no lane is within one step of triggering
    /// starvation, tighten the threshold back toward the baseline.
    fn decay_threshold(&mut self, lights: &[TrafficLight]) {
        if self.starvation_threshold > THRESHOLD_BASE
            && lights
                .iter()
                .all(|l| l.waiting_time < self.starvation_threshold - THRESHOLD_STEP)
        {
            self.starvation_threshold -= THRESHOLD_STEP;
            debug!("threshold decayed to {}", self.starvation_threshold);
        }
    }

    /// Hysteresis switch: hand green to the busiest direction only if it
    /// beats the current one by a strict margin and the current direction's
    /// queue is fully drained at the stop line.
    fn hysteresis_switch(&mut self, demand: &DemandMap, lights: &[TrafficLight]) {
        let busiest = demand.busiest();
        if busiest == self.authorized {
            return;
        }
        if demand.get(self.authorized) + SWITCH_MARGIN >= demand.get(busiest) {
            return;
        }
        let queue_drained = lights
            .iter()
            .filter(|l| l.direction == self.authorized)
            .all(|l| !l.car_waiting);
        if queue_drained {
            debug!(
                "demand switch: {} -> {} ({} vs {})",
                self.authorized,
                busiest,
                demand.get(self.authorized),
                demand.get(busiest)
            );
            self.authorized = busiest;
            self.dwell_ticks = 0;
        }
    }
}
