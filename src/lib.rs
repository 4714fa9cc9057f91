//! Astro Doge - A side-scrolling space flyer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, scoring)
//! - `game`: Run state machine and frame scheduling
//! - `best_score`: Persistent best score and outcome tiers
//! - `persistence`: Storage boundary (LocalStorage on web)
//! - `platform`: Browser shell (input, animation frames)
//! - `tuning`: Data-driven game balance

pub mod best_score;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use best_score::{BestScore, Outcome};
pub use game::{FrameReport, FrameRequest, FrameTicket, Game, Snapshot};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Flyer defaults - fixed column, starts near the vertical centre
    pub const FLYER_X: f32 = 100.0;
    pub const FLYER_START_Y: f32 = 250.0;
    pub const FLYER_SIZE: f32 = 40.0;

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.6;
    /// Velocity a flap resets to (negative = upward)
    pub const FLAP_IMPULSE: f32 = -12.0;

    /// Obstacle scroll speed at score 0 (pixels/tick)
    pub const OBSTACLE_BASE_SPEED: f32 = 3.0;
    /// Score that doubles obstacle speed (speed = base * (1 + score / this))
    pub const DIFFICULTY_SCORE_SCALE: f32 = 50.0;
    /// Collectible scroll speed, independent of difficulty
    pub const COLLECTIBLE_SPEED: f32 = 3.0;

    pub const OBSTACLE_SIZE: f32 = 60.0;
    pub const COLLECTIBLE_SIZE: f32 = 30.0;
    /// Spawns keep this distance from the top and bottom edges
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Entities at or left of these x positions are evicted
    pub const OBSTACLE_EVICT_X: f32 = -100.0;
    pub const COLLECTIBLE_EVICT_X: f32 = -50.0;

    /// A new entity spawns once the newest one is this far from the right edge
    pub const OBSTACLE_LOOKAHEAD_GAP: f32 = 250.0;
    pub const COLLECTIBLE_LOOKAHEAD_GAP: f32 = 200.0;
    /// Extra offset for the first collectible of a run
    pub const INITIAL_COLLECTIBLE_OFFSET: f32 = 100.0;

    pub const PASS_REWARD: u32 = 1;
    pub const PICKUP_REWARD: u32 = 5;

    /// Speech bubble lifetime (ms)
    pub const FEEDBACK_TTL_MS: f64 = 2000.0;
    /// Speech bubble offset from the collected coin
    pub const FEEDBACK_OFFSET_X: f32 = 50.0;
    pub const FEEDBACK_OFFSET_Y: f32 = -30.0;
}
