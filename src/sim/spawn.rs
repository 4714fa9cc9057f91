//! Procedural obstacle and coin generation

use super::random::RandomSource;
use super::state::{Collectible, GameState, Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// Vertical position uniformly inside the safe spawn band
fn spawn_y(tuning: &Tuning, rng: &mut impl RandomSource) -> f32 {
    tuning.spawn_min_y() + rng.unit() * tuning.spawn_band()
}

/// Create an obstacle at `x` for the current mode.
///
/// Returns `None` when the mode has no obstacle kinds (zen).
pub fn spawn_obstacle(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
    x: f32,
) -> Option<Obstacle> {
    let kinds = state.mode.obstacle_kinds();
    if kinds.is_empty() {
        return None;
    }

    let kind: ObstacleKind = kinds[rng.pick(kinds.len())];
    let y = spawn_y(tuning, rng);
    let obstacle = Obstacle {
        id: state.next_entity_id(),
        kind,
        x,
        y,
        width: tuning.obstacle_size,
        height: tuning.obstacle_size,
        passed: false,
    };
    log::debug!("Spawned {:?} #{} at ({}, {})", kind, obstacle.id, x, y);
    Some(obstacle)
}

/// Create an uncollected coin at `x`
pub fn spawn_collectible(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
    x: f32,
) -> Collectible {
    let y = spawn_y(tuning, rng);
    let coin = Collectible {
        id: state.next_entity_id(),
        x,
        y,
        width: tuning.collectible_size,
        height: tuning.collectible_size,
        collected: false,
    };
    log::debug!("Spawned coin #{} at ({}, {})", coin.id, x, y);
    coin
}
