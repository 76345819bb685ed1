//! Adaptive signal-control simulation
//!
//! A discrete-tick model of one four-way signalized intersection: per-lane
//! demand sensing, a central controller with hysteresis switching and a
//! starvation-avoidance override, and the deterministic tick ordering that
//! ties them together. Runs headless from the console.

mod car;
mod config;
mod controller;
mod grid;
mod light;
mod spawner;
mod stats;
mod types;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use car::{CarStep, SimCar};
#[allow(unused_imports)]
pub use config::{FlowRates, SimConfig};
#[allow(unused_imports)]
pub use controller::{aggregate_demand, DemandMap, SignalController, SignalDecision};
#[allow(unused_imports)]
pub use grid::Grid;
#[allow(unused_imports)]
pub use light::TrafficLight;
#[allow(unused_imports)]
pub use spawner::{SpawnRequest, Spawner};
#[allow(unused_imports)]
pub use stats::SimulationStats;
#[allow(unused_imports)]
pub use types::{
    CarId, Cell, Direction, LightColor, LightId, SimId, Turn, DWELL_GRACE, SENSE_WINDOW,
    STARVATION_DWELL_GUARD, SWITCH_MARGIN, THRESHOLD_BASE, THRESHOLD_MAX, THRESHOLD_STEP,
};
pub use world::SimWorld;
