//! Ray probes for the learning variant: three fixed-length feelers at the
//! vehicle heading and +-45 degrees, answered by the same occupancy grid as
//! the collision engine.

use crate::car::VehiclePose;
use crate::track::{Rect, TrackMask};

pub const SENSOR_LENGTH: f32 = 100.0;
pub const SENSOR_OFFSETS_DEG: [f32; 3] = [-45.0, 0.0, 45.0];

#[derive(Clone, Copy, Debug)]
pub struct SensorRay {
    /// Endpoint, window coordinates.
    pub end_x: f32,
    pub end_y: f32,
    pub hit: bool,
}

/// Probe endpoints off the track bitmap report no obstacle.
pub fn cast(pose: &VehiclePose, track: &TrackMask, track_rect: Rect) -> [SensorRay; 3] {
    SENSOR_OFFSETS_DEG.map(|off| {
        let rad = (pose.heading_deg + off).to_radians();
        let end_x = pose.x + SENSOR_LENGTH * rad.cos();
        let end_y = pose.y - SENSOR_LENGTH * rad.sin();
        let hit = track.is_wall(
            end_x.floor() as i32 - track_rect.x,
            end_y.floor() as i32 - track_rect.y,
        );
        SensorRay { end_x, end_y, hit }
    })
}
