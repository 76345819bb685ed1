//! Core types for the signal-control simulation
//!
//! Standalone types shared by the grid, lights, controller and cars.

use std::fmt;

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimId(pub usize);

/// A wrapper type for car IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CarId(pub SimId);

/// A wrapper type for traffic light IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightId(pub SimId);

/// Travel direction of a lane approaching the intersection.
///
/// Directions are mutually exclusive for green: the controller authorizes
/// exactly one of them per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    West,
    North,
    South,
}

impl Direction {
    /// All directions in fixed priority order.
    ///
    /// This order doubles as the deterministic tie-break for equal maximum
    /// demand: East > West > North > South.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::North,
        Direction::South,
    ];

    /// Dense index into per-direction arrays
    pub fn index(self) -> usize {
        match self {
            Direction::East => 0,
            Direction::West => 1,
            Direction::North => 2,
            Direction::South => 3,
        }
    }

    /// Unit travel vector in grid coordinates (x grows east, y grows south)
    pub fn unit(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::North => (0, -1),
            Direction::South => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::East => "east",
            Direction::West => "west",
            Direction::North => "north",
            Direction::South => "south",
        };
        write!(f, "{}", name)
    }
}

/// Turn tag of a lane. Tags label lanes only; every car drives straight
/// through the intersection (turning conflicts are out of scope).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

/// Color state of a traffic light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightColor {
    Red,
    Green,
}

/// A cell coordinate on the simulation grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step along `direction`'s travel axis
    pub fn step(&self, direction: Direction) -> Cell {
        let (dx, dy) = direction.unit();
        Cell::new(self.x + dx, self.y + dy)
    }

    /// The cell `offset` steps against `direction`'s travel axis, i.e.
    /// moving away from the intersection along the approach
    pub fn back(&self, direction: Direction, offset: i32) -> Cell {
        let (dx, dy) = direction.unit();
        Cell::new(self.x - dx * offset, self.y - dy * offset)
    }
}

/// Number of cells a lane sensor scans ahead of its stop line
pub const SENSE_WINDOW: i32 = 10;

/// Strict demand margin a rival direction must beat the authorized one by
/// before a hysteresis switch is considered
pub const SWITCH_MARGIN: u32 = 6;

/// Ticks after a switch during which every light stays red, interlocking
/// conflicting flows and preventing immediate flip-flop
pub const DWELL_GRACE: u32 = 7;

/// Step size for all starvation-threshold adjustments
pub const THRESHOLD_STEP: u32 = 16;

/// Baseline starvation threshold the governor decays back toward
pub const THRESHOLD_BASE: u32 = 60;

/// Hard cap on the starvation threshold
pub const THRESHOLD_MAX: u32 = 76;

/// Minimum dwell before a starvation override also resets the dwell counter
/// and escalates the threshold
pub const STARVATION_DWELL_GUARD: u32 = 8;
