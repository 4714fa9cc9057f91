//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, fixed step order
//! - Randomness only through `RandomSource`
//! - Lanes kept in spawn order (newest last)
//! - No rendering or platform dependencies

pub mod feedback;
pub mod flyer;
pub mod geometry;
pub mod random;
pub mod resolve;
pub mod scroll;
pub mod spawn;
pub mod state;
pub mod tick;

pub use feedback::{PHRASES, expire_feedback, push_feedback};
pub use flyer::{Flight, integrate};
pub use geometry::Rect;
pub use random::{RandomSource, RngSource};
pub use resolve::{Resolution, resolve};
pub use scroll::{advance_lane, needs_spawn, scroll_collectibles, scroll_obstacles};
pub use spawn::{spawn_collectible, spawn_obstacle};
pub use state::{
    Collectible, CrashCause, FeedbackEvent, Flyer, GameEvent, GameMode, GameState, Obstacle,
    ObstacleKind, RunState, Scrollable, UnknownMode, lane_is_ordered,
};
pub use tick::{TickInput, TickOutcome, tick};
