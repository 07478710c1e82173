//! Whole-vehicle dynamics scenarios.

use qracer::car::{ACCELERATION, Command, FRICTION, Vehicle, VehiclePose};

fn pose(x: f32, y: f32, heading: f32, velocity: f32) -> VehiclePose {
    VehiclePose {
        x,
        y,
        heading_deg: heading,
        velocity,
    }
}

#[test]
fn repeated_acceleration_approaches_terminal_velocity() {
    // Park the car in the middle so clamping never interferes; heading up
    // runs out of room the soonest, so point it along +x instead.
    let mut v = Vehicle::new(pose(50.0, 300.0, 0.0, 0.0));
    let mut prev = 0.0f32;
    let cap = ACCELERATION / FRICTION;
    for tick in 0..50 {
        v.step(&[Command::Accelerate], 10_000.0, 10_000.0);
        let vel = v.pose().velocity;
        assert!(vel > prev, "tick {tick}: velocity not monotone");
        assert!(vel < cap, "tick {tick}: velocity {vel} exceeds {cap}");
        prev = vel;
    }
    // Fixed point of v <- (v + a)(1 - f) is a(1-f)/f = 3.8; after 50 ticks
    // the car is within a few percent of it.
    assert!(prev > 3.4, "velocity {prev} still far from terminal");
}

#[test]
fn positions_clamp_exactly_to_the_window_edges() {
    let mut v = Vehicle::new(pose(795.0, 300.0, 0.0, 20.0));
    v.step(&[Command::Idle], 800.0, 600.0);
    assert_eq!(v.pose().x, 800.0);

    let mut v = Vehicle::new(pose(5.0, 300.0, 180.0, 20.0));
    v.step(&[Command::Idle], 800.0, 600.0);
    assert_eq!(v.pose().x, 0.0);

    let mut v = Vehicle::new(pose(400.0, 3.0, 90.0, 20.0));
    v.step(&[Command::Idle], 800.0, 600.0);
    assert_eq!(v.pose().y, 0.0);

    let mut v = Vehicle::new(pose(400.0, 597.0, 270.0, 20.0));
    v.step(&[Command::Idle], 800.0, 600.0);
    assert_eq!(v.pose().y, 600.0);
}

#[test]
fn clamping_leaves_velocity_untouched() {
    let mut v = Vehicle::new(pose(799.0, 300.0, 0.0, 10.0));
    v.step(&[Command::Idle], 800.0, 600.0);
    assert_eq!(v.pose().x, 800.0);
    assert!((v.pose().velocity - 10.0 * (1.0 - FRICTION)).abs() < 1e-5);
}

#[test]
fn combined_throttle_and_steering_apply_in_one_tick() {
    let mut v = Vehicle::new(pose(400.0, 300.0, 0.0, 0.0));
    v.step(&[Command::Accelerate, Command::TurnLeft], 800.0, 600.0);
    let p = v.pose();
    assert!((p.heading_deg - 5.0).abs() < 1e-6);
    assert!((p.velocity - ACCELERATION * (1.0 - FRICTION)).abs() < 1e-6);
}
