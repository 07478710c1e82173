//! Vehicle kinematics: command -> new pose, once per tick.

pub const ACCELERATION: f32 = 0.2;
pub const FRICTION: f32 = 0.05;
pub const ROTATE_SPEED: f32 = 5.0;
pub const BOOST_IMPULSE: f32 = -10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehiclePose {
    pub x: f32,
    pub y: f32,
    /// Unbounded; wraps logically modulo 360.
    pub heading_deg: f32,
    pub velocity: f32,
}

/// Closed set of control commands. Several may apply in one tick (manual
/// driving combines turning with throttle); friction and integration still
/// run exactly once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Accelerate,
    Brake,
    TurnLeft,
    TurnRight,
    Boost,
    Idle,
}

pub struct Vehicle {
    pose: VehiclePose,
    boost_spent: bool,
}

impl Vehicle {
    pub fn new(pose: VehiclePose) -> Self {
        Self {
            pose,
            boost_spent: false,
        }
    }

    pub fn pose(&self) -> VehiclePose {
        self.pose
    }

    pub fn boost_spent(&self) -> bool {
        self.boost_spent
    }

    /// Replace the pose wholesale and re-arm the boost (episode reset).
    pub fn reset(&mut self, pose: VehiclePose) {
        self.pose = pose;
        self.boost_spent = false;
    }

    /// One simulation tick. Screen convention: y grows downward, a positive
    /// heading turns counter-clockwise on screen, so `y -= sin(heading) * v`.
    /// Position is hard-clamped to the window; velocity is untouched by the
    /// clamp.
    pub fn step(&mut self, commands: &[Command], width: f32, height: f32) {
        for &cmd in commands {
            match cmd {
                Command::Accelerate => self.pose.velocity += ACCELERATION,
                Command::Brake => self.pose.velocity -= ACCELERATION,
                Command::TurnLeft => self.pose.heading_deg += ROTATE_SPEED,
                Command::TurnRight => self.pose.heading_deg -= ROTATE_SPEED,
                Command::Boost => {
                    // One boost per episode.
                    if !self.boost_spent {
                        self.pose.velocity = BOOST_IMPULSE;
                        self.boost_spent = true;
                    }
                }
                Command::Idle => {}
            }
        }

        self.pose.velocity *= 1.0 - FRICTION;

        let rad = self.pose.heading_deg.to_radians();
        self.pose.x += rad.cos() * self.pose.velocity;
        self.pose.y -= rad.sin() * self.pose.velocity;

        self.pose.x = self.pose.x.clamp(0.0, width);
        self.pose.y = self.pose.y.clamp(0.0, height);
    }
}
