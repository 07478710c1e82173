//! Manual variant: keyboard-driven single run. Terminates on quit, crash,
//! or crossing the finish line; nothing is scored or persisted.

use std::time::Instant;

use anyhow::Result;
use log::info;
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

use qracer::assets;
use qracer::car::{Command, Vehicle};
use qracer::collision::CollisionEngine;
use qracer::config::SessionConfig;
use qracer::draw;
use qracer::mask::SpriteMask;
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
        .with_title("Q Racer")
        .with_inner_size(LogicalSize::new(cfg.width, cfg.height))
        .with_resizable(false)
        .build(&event_loop)?;

    let mut pixels = {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, &window);
        Pixels::new(cfg.width, cfg.height, surface)?
    };

    let mut vehicle = Vehicle::new(cfg.start_pose);
    let mut outcome = engine.evaluate(&vehicle.pose());
    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick = cfg.tick_duration();
    let mut debug = false;

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

            let secs = started.elapsed().as_secs_f32();
            draw::draw_text(
                frame,
                &format!("TIME: {secs:.1}S"),
                8,
                8,
                2,
                (20, 20, 20, 255),
            );
            if debug {
                draw::draw_text(
                    frame,
                    &format!("X: {:.1} Y: {:.1} V: {:.2}", pose.x, pose.y, pose.velocity),
                    8,
                    30,
                    2,
                    (20, 20, 20, 255),
                );
            }

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
            if input.key_pressed(VirtualKeyCode::F1) {
                debug = !debug;
            }

            if last_tick.elapsed() >= tick {
                last_tick = Instant::now();

                let mut commands = Vec::new();
                if input.key_held(VirtualKeyCode::Up) || input.key_held(VirtualKeyCode::W) {
                    commands.push(Command::Accelerate);
                }
                if input.key_held(VirtualKeyCode::Down) || input.key_held(VirtualKeyCode::S) {
                    commands.push(Command::Brake);
                }
                if input.key_held(VirtualKeyCode::Left) || input.key_held(VirtualKeyCode::A) {
                    commands.push(Command::TurnLeft);
                }
                if input.key_held(VirtualKeyCode::Right) || input.key_held(VirtualKeyCode::D) {
                    commands.push(Command::TurnRight);
                }
                // Edge-triggered: fires only on the press transition, and the
                // vehicle ignores it once spent.
                if input.key_pressed(VirtualKeyCode::Space) {
                    commands.push(Command::Boost);
                }

                vehicle.step(&commands, cfg.width as f32, cfg.height as f32);
                outcome = engine.evaluate(&vehicle.pose());
                if outcome.collided {
                    info!("crashed after {:.1}s", started.elapsed().as_secs_f32());
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                if outcome.finished {
                    info!("finished in {:.1}s", started.elapsed().as_secs_f32());
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }

            window.request_redraw();
        }
    });
}
