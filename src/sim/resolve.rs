//! Pass crediting, coin pickups and fatal obstacle hits
//!
//! Resolution runs after the lanes have moved, against the flyer box captured
//! at the start of the tick.

use super::feedback::push_feedback;
use super::geometry::Rect;
use super::random::RandomSource;
use super::state::{CrashCause, GameEvent, GameState};
use crate::tuning::Tuning;

/// What one resolution pass found
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Obstacles newly credited as passed
    pub passes: u32,
    /// Coins newly collected
    pub pickups: u32,
    /// First obstacle the flyer overlaps, if any
    pub fatal: Option<u32>,
}

impl Resolution {
    pub fn is_fatal(&self) -> bool {
        self.fatal.is_some()
    }
}

/// Resolve passes, pickups and hits for this tick.
///
/// Score and flags are applied to `state`; ending the run is left to the caller.
pub fn resolve(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
    flyer_box: Rect,
    now_ms: f64,
) -> Resolution {
    let fatal = state
        .obstacles
        .iter()
        .find(|o| o.bounds().overlaps(&flyer_box))
        .map(|o| o.id);
    let mut result = Resolution {
        fatal,
        ..Default::default()
    };

    // Pass credit: trailing edge cleared the flyer's leading (left) edge
    for obstacle in &mut state.obstacles {
        if obstacle.passed || obstacle.x + obstacle.width >= flyer_box.left() {
            continue;
        }
        if result.is_fatal() && !tuning.credit_pass_on_fatal_tick {
            continue;
        }
        obstacle.passed = true;
        state.score += tuning.pass_reward;
        result.passes += 1;
        state.events.push(GameEvent::Passed {
            obstacle_id: obstacle.id,
        });
    }

    // Pickups; the anchor is taken before the coin is marked
    let hits: Vec<(usize, f32, f32)> = state
        .collectibles
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.collected && c.bounds().overlaps(&flyer_box))
        .map(|(i, c)| (i, c.x, c.y))
        .collect();

    for (index, x, y) in hits {
        let feedback_id = push_feedback(state, rng, x, y, now_ms);
        let coin = &mut state.collectibles[index];
        coin.collected = true;
        state.score += tuning.pickup_reward;
        result.pickups += 1;
        state.events.push(GameEvent::Collected {
            collectible_id: coin.id,
            feedback_id,
        });
    }

    if let Some(id) = result.fatal {
        state.events.push(GameEvent::Crashed {
            cause: CrashCause::Obstacle(id),
        });
    }

    result
}
