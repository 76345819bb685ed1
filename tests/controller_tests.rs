//! Switching-algorithm validation tests
//!
//! These drive the controller directly against hand-built light states,
//! covering the hysteresis margin, the queue-drain gate, the starvation
//! override and the threshold governor.

use signal_sim::simulation::{
    aggregate_demand, Cell, Direction, LightId, SignalController, SimId, TrafficLight,
    THRESHOLD_BASE, THRESHOLD_MAX, THRESHOLD_STEP,
};

/// A bare light for feeding the controller; stop-line position is unused here
fn light(id: usize, direction: Direction) -> TrafficLight {
    TrafficLight::new(LightId(SimId(id)), direction, 0, None, Cell::new(0, 0))
}

fn one_light_per_direction() -> Vec<TrafficLight> {
    Direction::ALL
        .iter()
        .enumerate()
        .map(|(i, &d)| light(i, d))
        .collect()
}

#[test]
fn aggregate_demand_over_empty_set_is_zero() {
    let demand = aggregate_demand(&[]);
    for direction in Direction::ALL {
        assert_eq!(demand.get(direction), 0);
    }
    // Ties (here: all-zero) resolve to the first direction in priority order
    assert_eq!(demand.busiest(), Direction::East);
}

#[test]
fn aggregate_demand_groups_lights_by_direction() {
    let mut lights = vec![
        light(0, Direction::North),
        light(1, Direction::North),
        light(2, Direction::West),
    ];
    lights[0].demand = 4;
    lights[1].demand = 3;
    lights[2].demand = 5;

    let demand = aggregate_demand(&lights);
    assert_eq!(demand.get(Direction::North), 7);
    assert_eq!(demand.get(Direction::West), 5);
    assert_eq!(demand.get(Direction::East), 0);
    assert_eq!(demand.busiest(), Direction::North);
}

#[test]
fn hysteresis_holds_within_margin() {
    let mut controller = SignalController::new();
    assert_eq!(controller.authorized, Direction::East);

    let mut lights = one_light_per_direction();
    lights[Direction::East.index()].demand = 10;
    lights[Direction::North.index()].demand = 15;

    // 15 - 10 = 5 < 6: not enough of a lead to take the green
    let demand = aggregate_demand(&lights);
    controller.decide(&demand, &lights);
    assert_eq!(controller.authorized, Direction::East);
}

#[test]
fn hysteresis_switches_beyond_margin_when_queue_drained() {
    let mut controller = SignalController::new();

    let mut lights = one_light_per_direction();
    lights[Direction::East.index()].demand = 10;
    lights[Direction::North.index()].demand = 17;

    let demand = aggregate_demand(&lights);
    controller.decide(&demand, &lights);
    assert_eq!(controller.authorized, Direction::North);
    assert_eq!(controller.dwell_ticks, 0, "switch must reset the dwell counter");
}

#[test]
fn hysteresis_blocked_while_car_waits_at_line() {
    let mut controller = SignalController::new();

    let mut lights = one_light_per_direction();
    lights[Direction::East.index()].demand = 10;
    lights[Direction::East.index()].car_waiting = true;
    lights[Direction::North.index()].demand = 17;

    // The east queue still has a car at the stop line; green is not given up
    let demand = aggregate_demand(&lights);
    controller.decide(&demand, &lights);
    assert_eq!(controller.authorized, Direction::East);
}

#[test]
fn equal_demand_ties_resolve_by_priority_order() {
    let mut controller = SignalController::new();
    controller.authorized = Direction::South;

    let mut lights = one_light_per_direction();
    lights[Direction::West.index()].demand = 10;
    lights[Direction::North.index()].demand = 10;

    // West and North tie; West wins because it comes first in priority order
    let demand = aggregate_demand(&lights);
    controller.decide(&demand, &lights);
    assert_eq!(controller.authorized, Direction::West);
}

#[test]
fn starvation_override_seizes_green_and_escalates_threshold() {
    let mut controller = SignalController::new();
    controller.dwell_ticks = 20;

    let mut lights = one_light_per_direction();
    lights[Direction::West.index()].waiting_time = THRESHOLD_BASE + 1;
    // A rival with overwhelming demand must not matter during an override
    lights[Direction::North.index()].demand = 50;

    let demand = aggregate_demand(&lights);
    controller.decide(&demand, &lights);
    assert_eq!(controller.authorized, Direction::West);
    assert_eq!(controller.dwell_ticks, 0);
    assert_eq!(
        controller.starvation_threshold,
        THRESHOLD_BASE + THRESHOLD_STEP
    );
}

#[test]
fn starvation_override_within_dwell_guard_keeps_counters() {
    let mut controller = SignalController::new();
    controller.dwell_ticks = 5;

    let mut lights = one_light_per_direction();
    lights[Direction::South.index()].waiting_time = THRESHOLD_BASE + 1;

    let demand = aggregate_demand(&lights);
    controller.decide(&demand, &lights);
    assert_eq!(controller.authorized, Direction::South);
    // Dwell only incremented; a forced switch this soon after the previous
    // one neither resets the dwell nor escalates the threshold
    assert_eq!(controller.dwell_ticks, 6);
    assert_eq!(controller.starvation_threshold, THRESHOLD_BASE);
}

#[test]
fn starvation_threshold_is_capped() {
    let mut controller = SignalController::new();
    controller.dwell_ticks = 20;
    controller.starvation_threshold = THRESHOLD_MAX;

    let mut lights = one_light_per_direction();
    lights[Direction::West.index()].waiting_time = THRESHOLD_MAX + 1;

    let demand = aggregate_demand(&lights);
    controller.decide(&demand, &lights);
    assert_eq!(controller.starvation_threshold, THRESHOLD_MAX);
}

#[test]
fn governor_decays_threshold_back_to_baseline() {
    let mut controller = SignalController::new();
    controller.starvation_threshold = THRESHOLD_MAX;

    // No lane anywhere near the threshold
    let lights = one_light_per_direction();
    let demand = aggregate_demand(&lights);

    controller.decide(&demand, &lights);
    assert_eq!(controller.starvation_threshold, THRESHOLD_MAX - THRESHOLD_STEP);
    assert_eq!(controller.starvation_threshold, THRESHOLD_BASE);

    // Already at the baseline; the governor keeps it there
    controller.decide(&demand, &lights);
    assert_eq!(controller.starvation_threshold, THRESHOLD_BASE);
}

#[test]
fn governor_holds_while_a_lane_nears_the_threshold() {
    let mut controller = SignalController::new();
    controller.starvation_threshold = THRESHOLD_MAX;

    let mut lights = one_light_per_direction();
    // Within one step of triggering starvation: decay must not fire
    lights[Direction::North.index()].waiting_time = THRESHOLD_MAX - THRESHOLD_STEP;

    let demand = aggregate_demand(&lights);
    controller.decide(&demand, &lights);
    assert_eq!(controller.starvation_threshold, THRESHOLD_MAX);
}

#[test]
fn threshold_stays_bounded_under_sustained_starvation() {
    let mut controller = SignalController::new();
    let mut lights = one_light_per_direction();

    // A west car sits at its line forever while east demand stays high
    lights[Direction::East.index()].demand = 30;
    for _ in 0..300 {
        lights[Direction::West.index()].waiting_time += 1;
        let demand = aggregate_demand(&lights);
        controller.decide(&demand, &lights);

        let threshold = controller.starvation_threshold;
        assert!(
            (THRESHOLD_BASE..=THRESHOLD_MAX).contains(&threshold),
            "threshold {} left [{}, {}]",
            threshold,
            THRESHOLD_BASE,
            THRESHOLD_MAX
        );
        assert_eq!(
            (threshold - THRESHOLD_BASE) % THRESHOLD_STEP,
            0,
            "threshold {} not reachable in steps of {}",
            threshold,
            THRESHOLD_STEP
        );
    }
}

#[test]
fn high_rival_demand_forces_switch_after_one_tick() {
    // Starting state: east authorized with dwell 8, all demand on north,
    // nothing waiting at any east stop line
    let mut controller = SignalController::new();
    controller.dwell_ticks = 8;

    let mut lights = one_light_per_direction();
    lights[Direction::North.index()].demand = 20;

    let demand = aggregate_demand(&lights);
    controller.decide(&demand, &lights);
    assert_eq!(controller.authorized, Direction::North);
    assert_eq!(controller.dwell_ticks, 0);
}
