//! Main simulation world that ties everything together
//!
//! Owns the grid, the lights, the controller and the cars, and drives one
//! discrete tick at a time. The per-tick pass order is fixed and explicit
//! (rather than depending on entity registration sequence), so every run
//! with the same seed is reproducible:
//!
//! 1. sense: every light refreshes demand from the grid
//! 2. decide: demand is aggregated and the controller picks a direction
//! 3. actuate: every light reads the fresh decision and sets its color
//! 4. move: every car advances or waits, in spawn order
//! 5. spawn: new cars appear at the approach entries
//! 6. account: green time and throughput are recorded
//!
//! The controller therefore always acts on this tick's freshly sensed
//! demand, and lights always actuate off this tick's decision.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::car::{CarStep, SimCar};
use super::config::SimConfig;
use super::controller::{aggregate_demand, SignalController};
use super::grid::Grid;
use super::light::TrafficLight;
use super::spawner::Spawner;
use super::stats::SimulationStats;
use super::types::{CarId, Cell, Direction, LightId, SimId};

/// The main simulation world
pub struct SimWorld {
    /// Cell occupancy and intersection geometry
    pub grid: Grid,

    /// All lights, in registration order: each direction's lanes in the
    /// fixed East, West, North, South sequence
    pub lights: Vec<TrafficLight>,

    /// The single decision authority
    pub controller: SignalController,

    /// All cars, in spawn order (which is also movement order)
    pub cars: Vec<SimCar>,

    /// Run statistics
    pub stats: SimulationStats,

    spawner: Spawner,

    /// Next ID to assign
    next_id: usize,

    /// Ticks elapsed
    pub tick_count: u64,

    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,
}

impl SimWorld {
    /// Build a world from a validated configuration
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate().context("Invalid simulation config")?;

        let grid = Grid::new(config.grid_size, config.lanes_per_approach);
        let mut next_id = 0;

        let mut lights = Vec::new();
        for direction in Direction::ALL {
            for lane in 0..config.lanes_per_approach {
                let id = LightId(SimId(next_id));
                next_id += 1;
                let stop = grid.stop_cell(direction, lane);
                let turn = grid.turn_tag(lane);
                lights.push(TrafficLight::new(id, direction, lane, turn, stop));
            }
        }

        Ok(Self {
            grid,
            lights,
            controller: SignalController::new(),
            cars: Vec::new(),
            stats: SimulationStats::new(),
            spawner: Spawner::new(config.flows, config.lanes_per_approach),
            next_id,
            tick_count: 0,
            rng: config.seed.map(StdRng::seed_from_u64),
        })
    }

    fn next_sim_id(&mut self) -> SimId {
        let id = SimId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The light guarding a given direction and lane
    pub fn light(&self, direction: Direction, lane: i32) -> &TrafficLight {
        &self.lights[self.light_index(direction, lane)]
    }

    fn light_index(&self, direction: Direction, lane: i32) -> usize {
        direction.index() * self.grid.lanes_per_approach() as usize + lane as usize
    }

    /// Place a new car on a specific cell of its lane.
    /// Returns None if the cell is already occupied.
    pub fn spawn_car_at(&mut self, direction: Direction, lane: i32, cell: Cell) -> Option<CarId> {
        if !self.grid.in_bounds(cell) || self.grid.occupied(cell) {
            return None;
        }
        let id = CarId(self.next_sim_id());
        self.grid.place(cell, id);
        self.cars.push(SimCar::new(id, direction, lane, cell));
        self.stats.record_spawn();
        Some(id)
    }

    /// Place a new car at a lane's entry cell
    pub fn spawn_car(&mut self, direction: Direction, lane: i32) -> Option<CarId> {
        let entry = self.grid.entry_cell(direction, lane);
        self.spawn_car_at(direction, lane, entry)
    }

    /// Advance the simulation by exactly one tick
    pub fn tick(&mut self) {
        self.tick_count += 1;

        // 1. sense pass
        for light in &mut self.lights {
            light.sense(&self.grid);
        }

        // 2. decide pass: the demand map is recomputed and passed in as a
        // value, never carried across ticks
        let demand = aggregate_demand(&self.lights);
        let was_authorized = self.controller.authorized;
        self.controller.decide(&demand, &self.lights);
        if self.controller.authorized != was_authorized {
            self.stats.record_switch();
        }

        // 3. actuate pass
        let decision = self.controller.decision();
        for light in &mut self.lights {
            light.actuate(decision);
        }

        // 4. movement pass, in spawn order so a queue leader vacates its
        // cell before its follower is updated
        let mut exited = Vec::new();
        for index in 0..self.cars.len() {
            let light_index = self.light_index(self.cars[index].direction, self.cars[index].lane);
            let green = self.lights[light_index].is_green();
            if self.cars[index].advance(&mut self.grid, green) == CarStep::Exited {
                exited.push(index);
            }
        }
        for index in exited.into_iter().rev() {
            let car = self.cars.remove(index);
            self.stats.record_exit(car.wait_time);
        }

        // 5. spawn pass
        let rng = &mut self.rng;
        let requests = self.spawner.plan(|percent| roll(rng, percent));
        for request in requests {
            self.spawn_car(request.direction, request.lane);
        }

        // 6. accounting pass
        if self.lights.iter().any(|l| l.is_green()) {
            self.stats.record_green(self.controller.authorized);
        }
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Signal Simulation Summary ===");
        println!("Tick: {}", self.tick_count);
        println!(
            "Authorized: {} (dwell {}, starvation threshold {})",
            self.controller.authorized,
            self.controller.dwell_ticks,
            self.controller.starvation_threshold
        );
        println!(
            "Cars: {} active, {} spawned, {} exited",
            self.cars.len(),
            self.stats.cars_spawned,
            self.stats.cars_exited
        );
        println!(
            "Waits: avg {:.1} ticks, max {} ticks",
            self.stats.average_wait(),
            self.stats.max_wait_ticks
        );
        println!("Switches: {}", self.stats.switches);

        println!("--- Lights ---");
        for light in &self.lights {
            println!(
                "  Light {:?}: {} lane {} ({:?}), {:?}, demand={}, waiting_time={}, car_waiting={}",
                light.id.0,
                light.direction,
                light.lane,
                light.turn,
                light.color,
                light.demand,
                light.waiting_time,
                light.car_waiting
            );
        }

        if !self.cars.is_empty() {
            println!("--- Active Cars ---");
            for car in &self.cars {
                println!(
                    "  Car {:?}: {} lane {}, position=({}, {}), wait={}",
                    car.id.0, car.direction, car.lane, car.pos.x, car.pos.y, car.wait_time
                );
            }
        }

        println!("--- Green time ---");
        for direction in Direction::ALL {
            println!("  {}: {} ticks", direction, self.stats.green_ticks(direction));
        }
    }

    /// Draw a visual map of the world in the terminal
    pub fn draw_map(&self) {
        println!("\n=== Intersection Map ===");
        println!("Legend: C=Car, G/r=Stop line (green/red), .=Road");
        println!();

        for y in 0..self.grid.size() {
            let mut line = String::new();
            for x in 0..self.grid.size() {
                let cell = Cell::new(x, y);
                let stop_light = self.lights.iter().find(|l| l.stop == cell);
                let glyph = if self.grid.occupied(cell) {
                    'C'
                } else if let Some(light) = stop_light {
                    if light.is_green() {
                        'G'
                    } else {
                        'r'
                    }
                } else if self.grid.is_road(cell) {
                    '.'
                } else {
                    ' '
                };
                line.push(glyph);
            }
            println!("{}", line);
        }
        println!();
    }
}

/// Roll against a percent probability with the seeded RNG if one exists
fn roll(rng: &mut Option<StdRng>, percent: u8) -> bool {
    let sample: u32 = match rng {
        Some(rng) => rng.random_range(0..100),
        None => rand::rng().random_range(0..100),
    };
    sample < u32::from(percent)
}
