//! Car movement logic
//!
//! Cars travel one cell per tick straight along their direction's axis,
//! queueing behind occupied cells and holding at a red stop line.

use super::grid::Grid;
use super::types::{CarId, Cell, Direction};

/// Result of a car update indicating what happened this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarStep {
    /// Car advanced one cell
    Moved,
    /// Car stayed put (red light or blocked by the car ahead)
    Waited,
    /// Car stepped past the far edge and left the grid
    Exited,
}

/// A car in the simulation
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct SimCar {
    pub id: CarId,
    pub direction: Direction,
    /// Lane index within the approach, 0 = innermost
    pub lane: i32,
    pub pos: Cell,
    /// Total ticks spent not moving
    pub wait_time: u32,
}

impl SimCar {
    pub fn new(id: CarId, direction: Direction, lane: i32, pos: Cell) -> Self {
        Self {
            id,
            direction,
            lane,
            pos,
            wait_time: 0,
        }
    }

    /// Advance one cell if allowed. A car holds at its stop line while the
    /// lane's light is red; anywhere else (including inside the intersection
    /// box) only an occupied next cell stops it.
    pub fn advance(&mut self, grid: &mut Grid, light_is_green: bool) -> CarStep {
        let at_stop_line = self.pos == grid.stop_cell(self.direction, self.lane);
        if at_stop_line && !light_is_green {
            self.wait_time += 1;
            return CarStep::Waited;
        }

        let next = self.pos.step(self.direction);
        if !grid.in_bounds(next) {
            grid.remove(self.pos);
            return CarStep::Exited;
        }
        if grid.occupied(next) {
            self.wait_time += 1;
            return CarStep::Waited;
        }

        grid.advance(self.pos, next);
        self.pos = next;
        CarStep::Moved
    }
}
