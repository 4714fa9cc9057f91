//! Leftward scrolling, off-screen eviction and lookahead spawning
//!
//! Each lane is rebuilt every tick (shift, then filter) and a single new entity
//! is appended at the right edge when the newest survivor has moved far enough
//! left. Appending at the edge keeps spawn order equal to x order.

use super::random::RandomSource;
use super::spawn::{spawn_collectible, spawn_obstacle};
use super::state::{GameState, Scrollable};
use crate::tuning::Tuning;

/// Shift every entity left by `speed` and keep those `keep` accepts
pub fn advance_lane<T: Scrollable>(lane: Vec<T>, speed: f32, keep: impl Fn(&T) -> bool) -> Vec<T> {
    lane.into_iter()
        .map(|mut entity| {
            entity.shift_left(speed);
            entity
        })
        .filter(|entity| keep(entity))
        .collect()
}

/// True if the lane is empty or its newest entity has cleared the lookahead gap
pub fn needs_spawn<T: Scrollable>(lane: &[T], playfield_width: f32, gap: f32) -> bool {
    lane.last()
        .map(|newest| newest.x() < playfield_width - gap)
        .unwrap_or(true)
}

/// Scroll the obstacle lane at the score-scaled speed
pub fn scroll_obstacles(state: &mut GameState, tuning: &Tuning, rng: &mut impl RandomSource) {
    let speed = tuning.obstacle_speed(state.score);
    let evict_x = tuning.obstacle_evict_x;

    let mut lane = advance_lane(std::mem::take(&mut state.obstacles), speed, |o| {
        o.x > evict_x
    });

    if needs_spawn(&lane, tuning.playfield_width, tuning.obstacle_lookahead_gap) {
        if let Some(obstacle) = spawn_obstacle(state, tuning, rng, tuning.playfield_width) {
            lane.push(obstacle);
        }
    }

    state.obstacles = lane;
}

/// Scroll the coin lane at its fixed speed; collected coins drop out here
pub fn scroll_collectibles(state: &mut GameState, tuning: &Tuning, rng: &mut impl RandomSource) {
    let evict_x = tuning.collectible_evict_x;

    let mut lane = advance_lane(
        std::mem::take(&mut state.collectibles),
        tuning.collectible_speed,
        |c| c.x > evict_x && !c.collected,
    );

    if needs_spawn(&lane, tuning.playfield_width, tuning.collectible_lookahead_gap) {
        lane.push(spawn_collectible(state, tuning, rng, tuning.playfield_width));
    }

    state.collectibles = lane;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::{RngSource, ScriptedSource};
    use crate::sim::state::{Collectible, GameMode, Obstacle, ObstacleKind, lane_is_ordered};

    fn obstacle(id: u32, x: f32) -> Obstacle {
        Obstacle {
            id,
            kind: ObstacleKind::Asteroid,
            x,
            y: 300.0,
            width: 60.0,
            height: 60.0,
            passed: false,
        }
    }

    fn coin(id: u32, x: f32) -> Collectible {
        Collectible {
            id,
            x,
            y: 300.0,
            width: 30.0,
            height: 30.0,
            collected: false,
        }
    }

    #[test]
    fn test_obstacles_shift_by_difficulty_speed() {
        let tuning = Tuning::default();
        let mut state = GameState::new();
        state.score = 50; // double speed
        state.obstacles = vec![obstacle(1, 700.0)];
        let mut rng = ScriptedSource::default();

        scroll_obstacles(&mut state, &tuning, &mut rng);
        assert_eq!(state.obstacles.len(), 1);
        assert!((state.obstacles[0].x - 694.0).abs() < 1e-4);
    }

    #[test]
    fn test_obstacle_eviction_threshold() {
        let tuning = Tuning::default();
        let mut state = GameState::new();
        state.obstacles = vec![obstacle(1, -96.0), obstacle(2, 102.0), obstacle(3, 700.0)];
        let mut rng = ScriptedSource::default();

        scroll_obstacles(&mut state, &tuning, &mut rng);
        // -96 - 3 = -99 survives
        assert_eq!(state.obstacles[0].id, 1);

        scroll_obstacles(&mut state, &tuning, &mut rng);
        // -102 evicted
        assert_ne!(state.obstacles[0].id, 1);
    }

    #[test]
    fn test_spawns_when_lane_empty() {
        let tuning = Tuning::default();
        let mut state = GameState::new();
        let mut rng = ScriptedSource::default();

        scroll_obstacles(&mut state, &tuning, &mut rng);
        scroll_collectibles(&mut state, &tuning, &mut rng);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, 800.0);
        assert_eq!(state.collectibles.len(), 1);
        assert_eq!(state.collectibles[0].x, 800.0);
    }

    #[test]
    fn test_lookahead_gap_controls_spawn() {
        let tuning = Tuning::default();
        let mut state = GameState::new();
        let mut rng = ScriptedSource::default();

        // 553 - 3 = 550, exactly width - gap: not yet
        state.obstacles = vec![obstacle(1, 553.0)];
        scroll_obstacles(&mut state, &tuning, &mut rng);
        assert_eq!(state.obstacles.len(), 1);

        // 547 after the next shift: spawn
        scroll_obstacles(&mut state, &tuning, &mut rng);
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[1].x, 800.0);
    }

    #[test]
    fn test_collected_coins_are_dropped() {
        let tuning = Tuning::default();
        let mut state = GameState::new();
        let mut taken = coin(1, 400.0);
        taken.collected = true;
        state.collectibles = vec![taken, coin(2, 700.0)];
        let mut rng = ScriptedSource::default();

        scroll_collectibles(&mut state, &tuning, &mut rng);
        assert_eq!(state.collectibles.len(), 1);
        assert_eq!(state.collectibles[0].id, 2);
        assert_eq!(state.collectibles[0].x, 697.0);
    }

    #[test]
    fn test_coin_speed_ignores_score() {
        let tuning = Tuning::default();
        let mut state = GameState::new();
        state.score = 500;
        state.collectibles = vec![coin(1, 700.0)];
        let mut rng = ScriptedSource::default();

        scroll_collectibles(&mut state, &tuning, &mut rng);
        assert_eq!(state.collectibles[0].x, 697.0);
    }

    #[test]
    fn test_zen_lane_stays_empty() {
        let tuning = Tuning::default();
        let mut state = GameState::new();
        state.mode = GameMode::Zen;
        let mut rng = ScriptedSource::default();

        scroll_obstacles(&mut state, &tuning, &mut rng);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_steady_state_density() {
        let tuning = Tuning::default();
        let mut state = GameState::new();
        let mut rng = RngSource::seeded(5);

        for _ in 0..2000 {
            scroll_obstacles(&mut state, &tuning, &mut rng);
            scroll_collectibles(&mut state, &tuning, &mut rng);

            assert!(lane_is_ordered(&state.obstacles));
            assert!(lane_is_ordered(&state.collectibles));

            // Only the newest entity may sit inside the lookahead gap
            let inside_gap = state
                .obstacles
                .iter()
                .filter(|o| o.x >= tuning.playfield_width - tuning.obstacle_lookahead_gap)
                .count();
            assert!(inside_gap <= 1);
            let inside_gap = state
                .collectibles
                .iter()
                .filter(|c| c.x >= tuning.playfield_width - tuning.collectible_lookahead_gap)
                .count();
            assert!(inside_gap <= 1);
        }
    }
}
