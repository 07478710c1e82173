//! End-to-end episode behavior against a synthetic course: pixel collision,
//! finish trigger, reward accounting, and the action-value/exploration
//! bookkeeping across an episode boundary.

use image::{Rgba, RgbaImage};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use qracer::agent::{self, AgentAction};
use qracer::car::{Vehicle, VehiclePose};
use qracer::collision::CollisionEngine;
use qracer::config::SessionConfig;
use qracer::mask::SpriteMask;
use qracer::session::{self, MIN_EXPLORATION_RATE, TrainingSession};
use qracer::track::{Rect, TrackMask};

const WALL: Rgba<u8> = Rgba([0, 0, 0, 255]);

fn solid_sprite(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba([200, 30, 30, 255]))
}

/// 500x500 course: open interior, 10px solid border walls.
fn bordered_track() -> TrackMask {
    let mut img = RgbaImage::new(500, 500);
    for (x, y, p) in img.enumerate_pixels_mut() {
        if x < 10 || y < 10 || x >= 490 || y >= 490 {
            *p = WALL;
        }
    }
    TrackMask::from_image(&img)
}

fn engine(track: TrackMask, finish: Rect) -> CollisionEngine {
    let cfg = SessionConfig::default();
    let car = SpriteMask::from_alpha(&solid_sprite(40, 20));
    CollisionEngine::new(track, cfg.track_rect(), finish, car)
}

fn pose(x: f32, y: f32, heading: f32) -> VehiclePose {
    VehiclePose {
        x,
        y,
        heading_deg: heading,
        velocity: 0.0,
    }
}

#[test]
fn overlapping_the_finish_region_finishes_at_zero_velocity() {
    let eng = engine(bordered_track(), Rect::new(561, 68, 82, 40));
    // Stationary on the finish box, well clear of the border walls.
    let outcome = eng.evaluate(&pose(602.0, 88.0, 0.0));
    assert!(outcome.finished);
    assert!(!outcome.collided);
}

#[test]
fn open_interior_reports_neither_outcome() {
    let eng = engine(bordered_track(), Rect::new(561, 68, 82, 40));
    let outcome = eng.evaluate(&pose(400.0, 300.0, 30.0));
    assert!(!outcome.collided && !outcome.finished);
}

#[test]
fn poses_off_the_track_bitmap_never_collide() {
    let eng = engine(bordered_track(), Rect::new(561, 68, 82, 40));
    // Window corner, entirely outside the 150..650 track placement.
    let outcome = eng.evaluate(&pose(20.0, 580.0, 45.0));
    assert!(!outcome.collided);
}

#[test]
fn driving_into_a_wall_ends_the_episode_in_the_red() {
    let eng = engine(bordered_track(), Rect::new(561, 68, 82, 40));
    let cfg = SessionConfig::default();
    let start = pose(400.0, 300.0, 0.0);
    let start_state = agent::discretize(&start);

    let mut session = TrainingSession::with_rng(start_state, SmallRng::seed_from_u64(11));
    let mut vehicle = Vehicle::new(start);

    // Full throttle straight at the right-hand wall.
    let mut crashed = false;
    for _ in 0..1000 {
        let action = AgentAction::Accelerate;
        vehicle.step(&[action.command()], cfg.width as f32, cfg.height as f32);
        let outcome = eng.evaluate(&vehicle.pose());
        let reward = session::reward(outcome.collided, outcome.finished, vehicle.pose().velocity);
        let next = agent::discretize(&vehicle.pose());
        session.observe(action, next, reward);
        if outcome.terminal() {
            assert!(outcome.collided);
            crashed = true;
            break;
        }
    }
    assert!(crashed, "never reached the wall");

    let report = session.end_episode(start_state);
    // ~70 cruise ticks of 0.1 * v cannot offset the -100 crash penalty.
    assert!(report.total_reward < 0.0);
    assert!(report.exploration_rate < 1.0);
    assert_eq!(session.episode(), 1);
    assert_eq!(session.state(), start_state);
    assert!(session.q_table().visited_states() > 0);
}

#[test]
fn exploration_rate_never_drops_below_the_floor() {
    let start = agent::discretize(&pose(200.0, 500.0, 90.0));
    let mut session = TrainingSession::with_rng(start, SmallRng::seed_from_u64(1));
    for _ in 0..10_000 {
        session.end_episode(start);
    }
    assert_eq!(session.exploration_rate(), MIN_EXPLORATION_RATE);
}
