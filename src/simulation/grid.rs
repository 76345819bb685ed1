//! Cell-occupancy grid and intersection layout geometry
//!
//! The grid stores at most one car per cell and answers the only spatial
//! query the control core needs: whether a cell is occupied. The layout
//! half computes where each lane runs, where its stop line sits and where
//! cars enter, for a single four-way intersection with right-hand traffic.

use std::collections::HashMap;

use super::types::{CarId, Cell, Direction, Turn};

/// Occupancy store plus the geometry of one four-way intersection.
///
/// The intersection box is the central `2L x 2L` square, where `L` is the
/// number of lanes per approach. Travel directions map onto lane rows and
/// columns as follows (x grows east, y grows south, `c` = grid_size / 2):
///
/// - eastbound lanes occupy rows `c .. c+L`, travelling +x
/// - westbound lanes occupy rows `c-L .. c`, travelling -x
/// - southbound lanes occupy columns `c-L .. c`, travelling +y
/// - northbound lanes occupy columns `c .. c+L`, travelling -y
///
/// Lane index 0 is always the innermost lane (closest to the center line).
#[derive(Debug, Clone)]
pub struct Grid {
    size: i32,
    lanes: i32,
    occupancy: HashMap<Cell, CarId>,
}

impl Grid {
    pub fn new(size: i32, lanes_per_approach: i32) -> Self {
        Self {
            size,
            lanes: lanes_per_approach,
            occupancy: HashMap::new(),
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn lanes_per_approach(&self) -> i32 {
        self.lanes
    }

    fn center(&self) -> i32 {
        self.size / 2
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.size && cell.y >= 0 && cell.y < self.size
    }

    /// Whether a cell is part of either road band
    pub fn is_road(&self, cell: Cell) -> bool {
        let c = self.center();
        let on_horizontal = cell.y >= c - self.lanes && cell.y < c + self.lanes;
        let on_vertical = cell.x >= c - self.lanes && cell.x < c + self.lanes;
        self.in_bounds(cell) && (on_horizontal || on_vertical)
    }

    /// The cell a lane's stop line occupies: the last approach cell before
    /// the intersection box
    pub fn stop_cell(&self, direction: Direction, lane: i32) -> Cell {
        let c = self.center();
        let l = self.lanes;
        match direction {
            Direction::East => Cell::new(c - l - 1, c + lane),
            Direction::West => Cell::new(c + l, c - 1 - lane),
            Direction::South => Cell::new(c - 1 - lane, c - l - 1),
            Direction::North => Cell::new(c + lane, c + l),
        }
    }

    /// The cell where cars enter a lane, at the grid edge
    pub fn entry_cell(&self, direction: Direction, lane: i32) -> Cell {
        let c = self.center();
        match direction {
            Direction::East => Cell::new(0, c + lane),
            Direction::West => Cell::new(self.size - 1, c - 1 - lane),
            Direction::South => Cell::new(c - 1 - lane, 0),
            Direction::North => Cell::new(c + lane, self.size - 1),
        }
    }

    /// Turn tag for a lane index: innermost turns left, outermost turns
    /// right, everything in between (and a lone lane) goes straight
    pub fn turn_tag(&self, lane: i32) -> Option<Turn> {
        if self.lanes == 1 {
            None
        } else if lane == 0 {
            Some(Turn::Left)
        } else if lane == self.lanes - 1 {
            Some(Turn::Right)
        } else {
            None
        }
    }

    /// Whether a cell holds a car. Out-of-bounds cells read as empty.
    pub fn occupied(&self, cell: Cell) -> bool {
        self.occupancy.contains_key(&cell)
    }

    /// Place a car on a free in-bounds cell. Returns false if the cell is
    /// taken or outside the grid.
    pub fn place(&mut self, cell: Cell, car: CarId) -> bool {
        if !self.in_bounds(cell) || self.occupied(cell) {
            return false;
        }
        self.occupancy.insert(cell, car);
        true
    }

    pub fn remove(&mut self, cell: Cell) -> Option<CarId> {
        self.occupancy.remove(&cell)
    }

    /// Move a car one cell. The destination may be out of bounds, which
    /// leaves the car off the grid (it has exited).
    pub fn advance(&mut self, from: Cell, to: Cell) {
        if let Some(car) = self.occupancy.remove(&from) {
            if self.in_bounds(to) {
                self.occupancy.insert(to, car);
            }
        }
    }
}
