//! Pixel-accurate collision between the rotated vehicle silhouette and the
//! track walls, plus the finish-line trigger.

use anyhow::ensure;
use log::warn;

use crate::car::VehiclePose;
use crate::mask::SpriteMask;
use crate::track::{Rect, TrackMask};

#[derive(Clone, Copy, Debug)]
pub struct TickOutcome {
    pub collided: bool,
    pub finished: bool,
    /// Bounding rect of the rotated silhouette, window coordinates.
    pub car_rect: Rect,
}

impl TickOutcome {
    pub fn terminal(&self) -> bool {
        self.collided || self.finished
    }
}

pub struct CollisionEngine {
    track: TrackMask,
    track_rect: Rect,
    finish: Rect,
    car_mask: SpriteMask,
}

impl CollisionEngine {
    pub fn new(track: TrackMask, track_rect: Rect, finish: Rect, car_mask: SpriteMask) -> Self {
        Self {
            track,
            track_rect,
            finish,
            car_mask,
        }
    }

    pub fn track(&self) -> &TrackMask {
        &self.track
    }

    pub fn track_rect(&self) -> Rect {
        self.track_rect
    }

    pub fn finish_region(&self) -> Rect {
        self.finish
    }

    /// Evaluate a freshly integrated pose. An overlap failure is logged and
    /// scored as no collision so the loop keeps running (fail-open); the
    /// finish test is plain rect intersection and cannot fail.
    pub fn evaluate(&self, pose: &VehiclePose) -> TickOutcome {
        let rotated = self.car_mask.rotated(pose.heading_deg);
        let car_rect = Rect::centered_on(
            pose.x.round() as i32,
            pose.y.round() as i32,
            rotated.width() as i32,
            rotated.height() as i32,
        );
        let offset = (car_rect.x - self.track_rect.x, car_rect.y - self.track_rect.y);

        let collided = match overlap(&self.track, &rotated, offset) {
            Ok(hit) => hit,
            Err(e) => {
                warn!("collision overlap failed, scoring tick as no hit: {e}");
                false
            }
        };
        let finished = car_rect.intersects(&self.finish);

        TickOutcome {
            collided,
            finished,
            car_rect,
        }
    }
}

/// True iff any solid cell of `car`, placed at `offset` in track-local
/// coordinates, lands on a wall. Cells falling off the bitmap never collide.
fn overlap(track: &TrackMask, car: &SpriteMask, offset: (i32, i32)) -> anyhow::Result<bool> {
    ensure!(
        car.width() > 0 && car.height() > 0,
        "rotated silhouette is empty ({}x{})",
        car.width(),
        car.height()
    );
    for cy in 0..car.height() as i32 {
        for cx in 0..car.width() as i32 {
            if car.get(cx, cy) && track.is_wall(offset.0 + cx, offset.1 + cy) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
