//! Training session: reward, the one-step action-value update, and the
//! per-episode exploration decay. Owns the table and the exploration rate so
//! nothing lives in ambient globals.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::agent::{self, AgentAction, QTable, State};

pub const LEARNING_RATE: f32 = 0.1;
pub const DISCOUNT_FACTOR: f32 = 0.9;
pub const EXPLORATION_DECAY: f32 = 0.995;
pub const MIN_EXPLORATION_RATE: f32 = 0.01;
pub const REPORT_INTERVAL: u32 = 100;

/// Per-tick reward. Collision is checked first and wins over finishing;
/// otherwise the reward is proportional to signed velocity, so reversing
/// scores negative.
pub fn reward(collided: bool, finished: bool, velocity: f32) -> f32 {
    if collided {
        -100.0
    } else if finished {
        100.0
    } else {
        velocity * 0.1
    }
}

#[derive(Clone, Copy, Debug)]
pub struct EpisodeReport {
    pub episode: u32,
    pub total_reward: f32,
    pub exploration_rate: f32,
}

pub struct TrainingSession {
    q: QTable,
    exploration_rate: f32,
    rng: SmallRng,
    state: State,
    episode: u32,
    episode_reward: f32,
}

impl TrainingSession {
    pub fn new(start: State) -> Self {
        Self::with_rng(start, SmallRng::from_entropy())
    }

    pub fn with_rng(start: State, rng: SmallRng) -> Self {
        Self {
            q: QTable::new(),
            exploration_rate: 1.0,
            rng,
            state: start,
            episode: 0,
            episode_reward: 0.0,
        }
    }

    pub fn exploration_rate(&self) -> f32 {
        self.exploration_rate
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn q_table(&self) -> &QTable {
        &self.q
    }

    pub fn choose_action(&mut self) -> AgentAction {
        agent::choose_action(&self.q, self.state, self.exploration_rate, &mut self.rng)
    }

    /// Apply the one-step update for the transition just taken and advance
    /// the tracked state:
    /// `Q[s,a] += alpha * (r + gamma * max Q[s'] - Q[s,a])`.
    pub fn observe(&mut self, action: AgentAction, next: State, reward: f32) {
        let next_max = self.q.max_value(next);
        let slots = self.q.slots_mut(self.state);
        let old = slots[action.index()];
        slots[action.index()] = old + LEARNING_RATE * (reward + DISCOUNT_FACTOR * next_max - old);
        self.state = next;
        self.episode_reward += reward;
    }

    /// Close the current episode: decay exploration (floored, once per
    /// episode), rewind the tracked state to `start`, and report the episode
    /// just finished.
    pub fn end_episode(&mut self, start: State) -> EpisodeReport {
        self.exploration_rate =
            (self.exploration_rate * EXPLORATION_DECAY).max(MIN_EXPLORATION_RATE);
        let report = EpisodeReport {
            episode: self.episode,
            total_reward: self.episode_reward,
            exploration_rate: self.exploration_rate,
        };
        self.episode += 1;
        self.episode_reward = 0.0;
        self.state = start;
        report
    }
}
