//! Learning variant: a tabular agent drives episode after episode, updating
//! its action-value table every tick. The table lives in memory only; the
//! process exits 0 once the configured episode count completes.

use std::time::Instant;

use anyhow::Result;
use log::info;
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

use qracer::agent;
use qracer::assets;
use qracer::car::Vehicle;
use qracer::collision::CollisionEngine;
use qracer::config::SessionConfig;
use qracer::draw;
use qracer::mask::SpriteMask;
use qracer::sensors;
use qracer::session::{self, TrainingSession};
use qracer::track::TrackMask;

fn main() -> Result<()> {
    env_logger::init();

    let cfg = SessionConfig::default();
    let assets = assets::load(&cfg)?;
    let engine = CollisionEngine::new(
        TrackMask::from_image(&assets.track),
        cfg.track_rect(),
        cfg.finish_region,
        SpriteMask::from_alpha(&assets.car),
    );

    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();
    let window = WindowBuilder::new()
        .with_title("Q Racer - training")
        .with_inner_size(LogicalSize::new(cfg.width, cfg.height))
        .with_resizable(false)
        .build(&event_loop)?;

    let mut pixels = {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, &window);
        Pixels::new(cfg.width, cfg.height, surface)?
    };

    let start_state = agent::discretize(&cfg.start_pose);
    let mut session = TrainingSession::new(start_state);
    let mut vehicle = Vehicle::new(cfg.start_pose);
    let mut outcome = engine.evaluate(&vehicle.pose());
    let mut rays = sensors::cast(&vehicle.pose(), engine.track(), engine.track_rect());

    let mut last_tick = Instant::now();
    let tick = cfg.tick_duration();
    // Ticks simulated per paced frame; 1 is real-time, +/- speeds it up so a
    // 10k-episode run stays watchable.
    let mut steps_per_tick: u32 = 1;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        if let Event::RedrawRequested(_) = event {
            let frame = pixels.frame_mut();
            draw::clear_rgba(frame, 255, 255, 255, 255);

            let track_rect = engine.track_rect();
            draw::blit(frame, &assets.track, track_rect.x, track_rect.y);
            let fin = engine.finish_region();
            draw::fill_rect_rgba(frame, fin.x, fin.y, fin.w, fin.h, 255, 0, 0, 255);

            let pose = vehicle.pose();
            let sprite = draw::rotate_sprite(&assets.car, pose.heading_deg);
            draw::blit(frame, &sprite, outcome.car_rect.x, outcome.car_rect.y);

            for ray in &rays {
                let (r, g, b) = if ray.hit { (255, 0, 0) } else { (0, 255, 0) };
                draw::draw_line(
                    frame,
                    pose.x as i32,
                    pose.y as i32,
                    ray.end_x as i32,
                    ray.end_y as i32,
                    r,
                    g,
                    b,
                );
            }

            draw::draw_text(
                frame,
                &format!("EPISODE: {}/{}", session.episode(), cfg.total_episodes),
                8,
                8,
                2,
                (20, 20, 20, 255),
            );
            draw::draw_text(
                frame,
                &format!("EXPLORE: {:.4}", session.exploration_rate()),
                8,
                30,
                2,
                (20, 20, 20, 255),
            );
            draw::draw_text(
                frame,
                &format!(
                    "STATES: {}  SPEED: {}X (+/-)",
                    session.q_table().visited_states(),
                    steps_per_tick
                ),
                8,
                52,
                2,
                (20, 20, 20, 255),
            );

            if pixels.render().is_err() {
                *control_flow = ControlFlow::Exit;
            }
        }

        if input.update(&event) {
            if input.key_pressed(VirtualKeyCode::Escape)
                || input.close_requested()
                || input.destroyed()
            {
                *control_flow = ControlFlow::Exit;
                return;
            }

            if input.key_pressed(VirtualKeyCode::NumpadAdd)
                || input.key_pressed(VirtualKeyCode::Equals)
            {
                steps_per_tick = steps_per_tick.saturating_mul(2).min(10_000);
            }
            if input.key_pressed(VirtualKeyCode::NumpadSubtract)
                || input.key_pressed(VirtualKeyCode::Minus)
            {
                steps_per_tick = (steps_per_tick / 2).max(1);
            }

            if last_tick.elapsed() >= tick {
                last_tick = Instant::now();

                for _ in 0..steps_per_tick {
                    let action = session.choose_action();
                    vehicle.step(
                        &[action.command()],
                        cfg.width as f32,
                        cfg.height as f32,
                    );
                    outcome = engine.evaluate(&vehicle.pose());
                    let reward = session::reward(
                        outcome.collided,
                        outcome.finished,
                        vehicle.pose().velocity,
                    );
                    let next = agent::discretize(&vehicle.pose());
                    session.observe(action, next, reward);

                    if outcome.terminal() {
                        let report = session.end_episode(start_state);
                        if report.episode % session::REPORT_INTERVAL == 0 {
                            info!(
                                "episode {}: total reward {:.2}, exploration rate {:.4}",
                                report.episode, report.total_reward, report.exploration_rate
                            );
                        }
                        vehicle.reset(cfg.start_pose);
                        if session.episode() >= cfg.total_episodes {
                            info!(
                                "training complete: {} episodes, {} states visited",
                                session.episode(),
                                session.q_table().visited_states()
                            );
                            *control_flow = ControlFlow::Exit;
                            return;
                        }
                    }
                }
                rays = sensors::cast(&vehicle.pose(), engine.track(), engine.track_rect());
            }

            window.request_redraw();
        }
    });
}
