//! Tabular control policy: pose discretization, the action-value table, and
//! epsilon-greedy selection.

use std::collections::HashMap;

use rand::Rng;
use rand::rngs::SmallRng;

use crate::car::{Command, VehiclePose};

pub const X_BUCKETS: usize = 80;
pub const Y_BUCKETS: usize = 60;
pub const ANGLE_BUCKETS: usize = 36;
pub const VEL_BUCKETS: usize = 20;

/// The table reserves 5 slots per state even though only the 3 named agent
/// actions are ever selected; the two spare slots stay at zero and still
/// take part in the bootstrap max. Kept as-is for behavioral fidelity with
/// the reference table layout (see DESIGN.md).
pub const ACTION_SLOTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct State {
    pub x: usize,
    pub y: usize,
    pub angle: usize,
    pub vel: usize,
}

/// Bucket the continuous pose. Position clamps to the grid, heading wraps at
/// 360 degrees, velocity wraps modulo 20; indices are always in range.
pub fn discretize(pose: &VehiclePose) -> State {
    let x = ((pose.x / 10.0).floor() as i64).clamp(0, X_BUCKETS as i64 - 1) as usize;
    let y = ((pose.y / 10.0).floor() as i64).clamp(0, Y_BUCKETS as i64 - 1) as usize;
    let angle = ((pose.heading_deg / 10.0).floor() as i64).rem_euclid(ANGLE_BUCKETS as i64) as usize;
    let vel = (pose.velocity.floor() as i64).rem_euclid(VEL_BUCKETS as i64) as usize;
    State { x, y, angle, vel }
}

/// The three actions the agent can actually pick. Indices 0..3 address the
/// first three table slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentAction {
    Accelerate,
    TurnLeft,
    TurnRight,
}

impl AgentAction {
    pub const ALL: [AgentAction; 3] = [
        AgentAction::Accelerate,
        AgentAction::TurnLeft,
        AgentAction::TurnRight,
    ];

    pub fn index(self) -> usize {
        match self {
            AgentAction::Accelerate => 0,
            AgentAction::TurnLeft => 1,
            AgentAction::TurnRight => 2,
        }
    }

    pub fn command(self) -> Command {
        match self {
            AgentAction::Accelerate => Command::Accelerate,
            AgentAction::TurnLeft => Command::TurnLeft,
            AgentAction::TurnRight => Command::TurnRight,
        }
    }
}

/// Sparse action-value table; absent states read as all-zero, matching a
/// zero-initialized dense table.
#[derive(Clone, Default)]
pub struct QTable {
    q: HashMap<State, [f32; ACTION_SLOTS]>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self, s: State) -> [f32; ACTION_SLOTS] {
        self.q.get(&s).copied().unwrap_or([0.0; ACTION_SLOTS])
    }

    pub fn slots_mut(&mut self, s: State) -> &mut [f32; ACTION_SLOTS] {
        self.q.entry(s).or_insert([0.0; ACTION_SLOTS])
    }

    /// Bootstrap target: max over all 5 slots, spares included.
    pub fn max_value(&self, s: State) -> f32 {
        self.values(s).into_iter().fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn visited_states(&self) -> usize {
        self.q.len()
    }
}

/// Epsilon-greedy over the three named actions; greedy ties break toward the
/// lowest action index.
pub fn choose_action(q: &QTable, s: State, epsilon: f32, rng: &mut SmallRng) -> AgentAction {
    if rng.r#gen::<f32>() < epsilon {
        AgentAction::ALL[rng.gen_range(0..AgentAction::ALL.len())]
    } else {
        let qs = q.values(s);
        let mut best = 0;
        for i in 1..AgentAction::ALL.len() {
            if qs[i] > qs[best] {
                best = i;
            }
        }
        AgentAction::ALL[best]
    }
}
