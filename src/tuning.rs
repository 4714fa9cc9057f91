//! Data-driven game balance
//!
//! Every knob defaults to the value in [`crate::consts`]. Overrides can be
//! supplied as a partial JSON object; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance parameters read by the simulation each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield_width: f32,
    pub playfield_height: f32,

    pub gravity: f32,
    pub flap_impulse: f32,

    pub obstacle_base_speed: f32,
    pub difficulty_score_scale: f32,
    pub collectible_speed: f32,

    pub obstacle_size: f32,
    pub collectible_size: f32,
    pub spawn_margin: f32,

    pub obstacle_evict_x: f32,
    pub collectible_evict_x: f32,
    pub obstacle_lookahead_gap: f32,
    pub collectible_lookahead_gap: f32,

    pub pass_reward: u32,
    pub pickup_reward: u32,

    pub feedback_ttl_ms: f64,

    /// Credit passes on the tick the flyer hits an obstacle.
    ///
    /// `true` keeps both outcomes of that tick; `false` withholds the pass
    /// credit so a fatal tick never raises the score through passes.
    pub credit_pass_on_fatal_tick: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,

            obstacle_base_speed: OBSTACLE_BASE_SPEED,
            difficulty_score_scale: DIFFICULTY_SCORE_SCALE,
            collectible_speed: COLLECTIBLE_SPEED,

            obstacle_size: OBSTACLE_SIZE,
            collectible_size: COLLECTIBLE_SIZE,
            spawn_margin: SPAWN_MARGIN,

            obstacle_evict_x: OBSTACLE_EVICT_X,
            collectible_evict_x: COLLECTIBLE_EVICT_X,
            obstacle_lookahead_gap: OBSTACLE_LOOKAHEAD_GAP,
            collectible_lookahead_gap: COLLECTIBLE_LOOKAHEAD_GAP,

            pass_reward: PASS_REWARD,
            pickup_reward: PICKUP_REWARD,

            feedback_ttl_ms: FEEDBACK_TTL_MS,

            credit_pass_on_fatal_tick: true,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Obstacle scroll speed for the given live score.
    ///
    /// Grows without bound: `base * (1 + score / scale)`.
    pub fn obstacle_speed(&self, score: u32) -> f32 {
        self.obstacle_base_speed * (1.0 + score as f32 / self.difficulty_score_scale)
    }

    /// Lowest y a spawned entity's top edge may take
    pub fn spawn_min_y(&self) -> f32 {
        self.spawn_margin
    }

    /// Height of the band spawned entities are placed in
    pub fn spawn_band(&self) -> f32 {
        (self.playfield_height - 2.0 * self.spawn_margin).max(0.0)
    }

    /// Flyer top edge at run start, kept inside small playfields
    pub fn flyer_start_y(&self) -> f32 {
        FLYER_START_Y
            .min((self.playfield_height - FLYER_SIZE) / 2.0)
            .max(0.0)
    }
}
