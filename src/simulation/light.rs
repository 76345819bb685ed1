//! Traffic lights: lane sensing and signal actuation
//!
//! Each light pairs a lane sensor (demand over a fixed window of approach
//! cells) with an actuator that applies the controller's published decision.

use super::controller::SignalDecision;
use super::grid::Grid;
use super::types::{Cell, Direction, LightColor, LightId, Turn, DWELL_GRACE, SENSE_WINDOW};

/// One traffic light, guarding one lane of one approach direction
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct TrafficLight {
    pub id: LightId,
    pub direction: Direction,
    /// Lane index within the approach, 0 = innermost
    pub lane: i32,
    /// Turn tag of the guarded lane, if it is a turning lane
    pub turn: Option<Turn>,
    /// Cell of the stop line this light guards
    pub stop: Cell,
    pub color: LightColor,
    /// Cars sensed in the approach window this tick; recomputed from
    /// scratch every tick, never accumulated
    pub demand: u32,
    /// Ticks a car has sat at the stop line since this light last held green
    pub waiting_time: u32,
    /// Whether the stop-line cell itself is occupied
    pub car_waiting: bool,
}

impl TrafficLight {
    pub fn new(id: LightId, direction: Direction, lane: i32, turn: Option<Turn>, stop: Cell) -> Self {
        Self {
            id,
            direction,
            lane,
            turn,
            stop,
            color: LightColor::Red,
            demand: 0,
            waiting_time: 0,
            car_waiting: false,
        }
    }

    /// Lane sensor pass: scan the `SENSE_WINDOW` cells from the stop line
    /// outward along the approach and refresh demand.
    ///
    /// A car at offset 0 (the stop line itself) additionally marks the lane
    /// as having a waiting car and advances its waiting time.
    pub fn sense(&mut self, grid: &Grid) {
        self.demand = 0;
        self.car_waiting = false;
        for offset in 0..SENSE_WINDOW {
            if grid.occupied(self.stop.back(self.direction, offset)) {
                self.demand += 1;
                if offset == 0 {
                    self.car_waiting = true;
                    self.waiting_time += 1;
                }
            }
        }
    }

    /// Actuator pass: apply the controller's decision for this tick.
    ///
    /// Green requires both the matching authorized direction and an elapsed
    /// dwell grace, so that a fresh switch keeps every light red for a few
    /// ticks and conflicting flows never overlap. Waiting time is held at
    /// zero for as long as the light is green.
    pub fn actuate(&mut self, decision: SignalDecision) {
        if self.direction == decision.authorized && decision.dwell_ticks > DWELL_GRACE {
            self.color = LightColor::Green;
            self.waiting_time = 0;
        } else {
            self.color = LightColor::Red;
        }
    }

    pub fn is_green(&self) -> bool {
        self.color == LightColor::Green
    }
}
