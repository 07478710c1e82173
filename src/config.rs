use std::path::PathBuf;
use std::time::Duration;

use crate::car::VehiclePose;
use crate::track::Rect;

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 600;
pub const FPS: u32 = 60;

pub const CAR_WIDTH: u32 = 40;
pub const CAR_HEIGHT: u32 = 20;
pub const TRACK_WIDTH: u32 = 500;
pub const TRACK_HEIGHT: u32 = 500;

/// Everything a session is parameterized on. `Default` gives the reference
/// setup: 800x600 window, 500x500 track centered in it, 60 Hz ticks,
/// 10k training episodes, finish box in the top-right bend of the course.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub width: u32,
    pub height: u32,
    pub tick_rate: u32,
    pub total_episodes: u32,
    pub finish_region: Rect,
    pub start_pose: VehiclePose,
    pub car_sprite: PathBuf,
    pub track_bitmap: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            tick_rate: FPS,
            total_episodes: 10_000,
            finish_region: Rect::new(561, 68, 82, 40),
            start_pose: VehiclePose {
                x: 200.0,
                y: 500.0,
                heading_deg: 90.0,
                velocity: 0.0,
            },
            car_sprite: PathBuf::from("assets/race_car.png"),
            track_bitmap: PathBuf::from("assets/track.png"),
        }
    }
}

impl SessionConfig {
    /// Track canvas placement: centered in the window.
    pub fn track_rect(&self) -> Rect {
        Rect::centered_on(
            self.width as i32 / 2,
            self.height as i32 / 2,
            TRACK_WIDTH as i32,
            TRACK_HEIGHT as i32,
        )
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.tick_rate as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_is_centered() {
        let cfg = SessionConfig::default();
        let r = cfg.track_rect();
        assert_eq!((r.x, r.y), (150, 50));
        assert_eq!((r.w, r.h), (500, 500));
    }
}
