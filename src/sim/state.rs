//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]. Entity lanes are
//! kept in spawn order, so the newest entity is always last and has the
//! largest x of its lane.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Selectable behaviour mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Asteroids and satellites, score-scaled speed
    #[default]
    Standard,
    /// Doge-face obstacles and the rainbow theme
    Playful,
    /// No obstacles at all, coins only
    Zen,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Standard, GameMode::Playful, GameMode::Zen];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Standard => "Standard",
            GameMode::Playful => "Playful",
            GameMode::Zen => "Zen",
        }
    }

    /// Obstacle kinds this mode may spawn (empty in zen)
    pub fn obstacle_kinds(&self) -> &'static [ObstacleKind] {
        match self {
            GameMode::Standard => &[ObstacleKind::Asteroid, ObstacleKind::Satellite],
            GameMode::Playful => &[ObstacleKind::DogeFace],
            GameMode::Zen => &[],
        }
    }

    /// Whether obstacles scroll and spawn in this mode
    pub fn scrolls_obstacles(&self) -> bool {
        !matches!(self, GameMode::Zen)
    }
}

/// Mode name that matches no [`GameMode`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode: {0:?}")]
pub struct UnknownMode(pub String);

impl FromStr for GameMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "normal" => Ok(GameMode::Standard),
            "playful" | "meme" => Ok(GameMode::Playful),
            "zen" | "contemplative" => Ok(GameMode::Zen),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Run lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Menu, no run in progress
    #[default]
    Idle,
    /// Simulating
    Active,
    /// Crashed, waiting for retry or menu
    Ended,
}

/// The player-controlled flyer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flyer {
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Flyer {
    fn default() -> Self {
        Self {
            x: FLYER_X,
            y: FLYER_START_Y,
            velocity: 0.0,
            width: FLYER_SIZE,
            height: FLYER_SIZE,
        }
    }
}

impl Flyer {
    /// Resting flyer at the run start height for this playfield
    pub fn at_start(tuning: &Tuning) -> Self {
        Self {
            y: tuning.flyer_start_y(),
            ..Self::default()
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Override the vertical velocity with the flap impulse
    pub fn flap(&mut self, impulse: f32) {
        self.velocity = impulse;
    }

    /// Nose tilt for presentation, clamped to ±30°
    pub fn tilt_degrees(&self) -> f32 {
        (self.velocity * 3.0).clamp(-30.0, 30.0)
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Asteroid,
    Satellite,
    DogeFace, // Playful mode only
}

/// A scrolling hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Already credited to the score
    pub passed: bool,
}

impl Obstacle {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// A scrolling coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub collected: bool,
}

impl Collectible {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Speech bubble shown after a pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub id: u32,
    pub text: String,
    pub x: f32,
    pub y: f32,
    /// Creation time (ms, same clock as the tick timestamps)
    pub created_ms: f64,
}

impl FeedbackEvent {
    pub fn age_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.created_ms
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    /// Left the top or bottom of the playfield
    Boundary,
    /// Hit the obstacle with this id
    Obstacle(u32),
}

/// Things that happened during a tick, drained by the shell (sound, effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Passed { obstacle_id: u32 },
    Collected { collectible_id: u32, feedback_id: u32 },
    Crashed { cause: CrashCause },
}

/// Lanes that scroll leftward and recycle
pub trait Scrollable {
    fn x(&self) -> f32;
    fn shift_left(&mut self, dx: f32);
}

impl Scrollable for Obstacle {
    fn x(&self) -> f32 {
        self.x
    }

    fn shift_left(&mut self, dx: f32) {
        self.x -= dx;
    }
}

impl Scrollable for Collectible {
    fn x(&self) -> f32 {
        self.x
    }

    fn shift_left(&mut self, dx: f32) {
        self.x -= dx;
    }
}

/// Complete simulation context for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    pub run_state: RunState,
    pub mode: GameMode,
    /// Score (never decreases within a run)
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub flyer: Flyer,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Live collectibles in spawn order
    pub collectibles: Vec<Collectible>,
    /// Live speech bubbles in creation order
    pub feedback: Vec<FeedbackEvent>,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh state parked in the menu
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Clear everything a run owns, keeping the mode
    pub fn clear_run(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.time_ticks = 0;
        self.flyer = Flyer::at_start(tuning);
        self.obstacles.clear();
        self.collectibles.clear();
        self.feedback.clear();
        self.events.clear();
    }

    pub fn is_active(&self) -> bool {
        self.run_state == RunState::Active
    }
}

/// True if x strictly increases along the lane
pub fn lane_is_ordered<T: Scrollable>(lane: &[T]) -> bool {
    lane.windows(2).all(|w| w[0].x() < w[1].x())
}
