//! Per-frame simulation step
//!
//! Fixed order: physics, obstacle lane, coin lane, bubble expiry, resolution.

use super::feedback::expire_feedback;
use super::flyer::{Flight, integrate};
use super::random::RandomSource;
use super::resolve::resolve;
use super::scroll::{scroll_collectibles, scroll_obstacles};
use super::state::{CrashCause, GameEvent, GameState, RunState};
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Flap (space/click/tap) since the previous tick
    pub flap: bool,
}

/// How a tick finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Run not active, nothing changed
    Skipped,
    /// Still flying
    Running,
    /// Run ended this tick
    Crashed(CrashCause),
}

/// Advance the game state by one frame.
///
/// `now_ms` is the frame timestamp used for bubble creation and expiry.
pub fn tick(
    state: &mut GameState,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
    input: &TickInput,
    now_ms: f64,
) -> TickOutcome {
    if state.run_state != RunState::Active {
        return TickOutcome::Skipped;
    }

    if input.flap {
        state.flyer.flap(tuning.flap_impulse);
    }

    state.time_ticks += 1;

    // Resolution uses where the flyer was when the frame began
    let flyer_box = state.flyer.bounds();

    if integrate(&mut state.flyer, tuning) == Flight::Crashed {
        return crash(state, CrashCause::Boundary);
    }

    if state.mode.scrolls_obstacles() {
        scroll_obstacles(state, tuning, rng);
    }
    scroll_collectibles(state, tuning, rng);

    state.feedback = expire_feedback(
        std::mem::take(&mut state.feedback),
        now_ms,
        tuning.feedback_ttl_ms,
    );

    let resolution = resolve(state, tuning, rng, flyer_box, now_ms);
    match resolution.fatal {
        Some(id) => {
            state.run_state = RunState::Ended;
            TickOutcome::Crashed(CrashCause::Obstacle(id))
        }
        None => TickOutcome::Running,
    }
}

fn crash(state: &mut GameState, cause: CrashCause) -> TickOutcome {
    state.run_state = RunState::Ended;
    state.events.push(GameEvent::Crashed { cause });
    TickOutcome::Crashed(cause)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::{RngSource, ScriptedSource};
    use crate::sim::state::{Collectible, GameMode, Obstacle, ObstacleKind};

    fn active(mode: GameMode) -> GameState {
        let mut state = GameState::new();
        state.mode = mode;
        state.run_state = RunState::Active;
        state
    }

    #[test]
    fn test_inactive_states_do_not_tick() {
        let tuning = Tuning::default();
        let mut rng = ScriptedSource::default();
        for run_state in [RunState::Idle, RunState::Ended] {
            let mut state = GameState::new();
            state.run_state = run_state;
            let before = state.flyer;
            let outcome = tick(&mut state, &tuning, &mut rng, &TickInput::default(), 0.0);
            assert_eq!(outcome, TickOutcome::Skipped);
            assert_eq!(state.flyer, before);
            assert_eq!(state.time_ticks, 0);
        }
    }

    #[test]
    fn test_flap_applies_before_integration() {
        let tuning = Tuning::default();
        let mut state = active(GameMode::Zen);
        state.flyer.velocity = 7.0;
        let mut rng = ScriptedSource::default();

        tick(&mut state, &tuning, &mut rng, &TickInput { flap: true }, 0.0);
        assert_eq!(state.flyer.y, 250.0 - 12.0);
        assert!((state.flyer.velocity - (-12.0 + 0.6)).abs() < 1e-5);
    }

    #[test]
    fn test_boundary_crash_stops_the_tick() {
        let tuning = Tuning::default();
        let mut state = active(GameMode::Standard);
        state.flyer.y = 0.0;
        state.flyer.velocity = 5.0;
        state.obstacles = vec![Obstacle {
            id: 1,
            kind: ObstacleKind::Asteroid,
            x: 500.0,
            y: 100.0,
            width: 60.0,
            height: 60.0,
            passed: false,
        }];
        let mut rng = ScriptedSource::default();

        let outcome = tick(&mut state, &tuning, &mut rng, &TickInput::default(), 0.0);
        assert_eq!(outcome, TickOutcome::Crashed(CrashCause::Boundary));
        assert_eq!(state.run_state, RunState::Ended);
        assert_eq!(state.flyer.y, 0.0);
        // Nothing else moved
        assert_eq!(state.obstacles[0].x, 500.0);
        assert!(state.collectibles.is_empty());
    }

    #[test]
    fn test_boundary_crash_skips_resolution() {
        let tuning = Tuning::default();
        let mut state = active(GameMode::Standard);
        state.flyer.y = 0.0;
        state.flyer.velocity = 5.0;
        // Behind the flyer, would be credited as passed
        state.obstacles = vec![Obstacle {
            id: 1,
            kind: ObstacleKind::Asteroid,
            x: 0.0,
            y: 400.0,
            width: 60.0,
            height: 60.0,
            passed: false,
        }];
        // Inside the start-of-tick flyer box
        state.collectibles = vec![Collectible {
            id: 2,
            x: 105.0,
            y: 5.0,
            width: 30.0,
            height: 30.0,
            collected: false,
        }];
        let mut rng = ScriptedSource::default();

        let outcome = tick(&mut state, &tuning, &mut rng, &TickInput::default(), 0.0);
        assert_eq!(outcome, TickOutcome::Crashed(CrashCause::Boundary));
        assert_eq!(state.score, 0);
        assert!(!state.obstacles[0].passed);
        assert!(!state.collectibles[0].collected);
        assert_eq!(state.collectibles[0].x, 105.0);
        assert!(state.feedback.is_empty());
        assert_eq!(
            state.events,
            vec![GameEvent::Crashed {
                cause: CrashCause::Boundary
            }]
        );
    }

    #[test]
    fn test_resolution_uses_start_of_tick_box() {
        let tuning = Tuning::default();
        let mut state = active(GameMode::Zen);
        // Flyer box [100,250]-[140,290]. A coin sitting just below the flyer's
        // starting box is still missed although the flyer is falling into it.
        state.flyer.velocity = 10.0;
        state.collectibles = vec![Collectible {
            id: 1,
            x: 103.0,
            y: 291.0,
            width: 30.0,
            height: 30.0,
            collected: false,
        }];
        let mut rng = ScriptedSource::default();

        tick(&mut state, &tuning, &mut rng, &TickInput::default(), 0.0);
        assert_eq!(state.score, 0);
        assert_eq!(state.flyer.y, 260.0);

        // Next tick the lagged box (y = 260) overlaps
        tick(&mut state, &tuning, &mut rng, &TickInput::default(), 16.0);
        assert_eq!(state.score, 5);
        assert_eq!(state.feedback.len(), 1);
    }

    #[test]
    fn test_obstacle_hit_ends_run() {
        let tuning = Tuning::default();
        let mut state = active(GameMode::Standard);
        state.obstacles = vec![Obstacle {
            id: 4,
            kind: ObstacleKind::Satellite,
            x: 103.0,
            y: 260.0,
            width: 60.0,
            height: 60.0,
            passed: false,
        }];
        let mut rng = ScriptedSource::default();

        let outcome = tick(&mut state, &tuning, &mut rng, &TickInput::default(), 0.0);
        assert_eq!(outcome, TickOutcome::Crashed(CrashCause::Obstacle(4)));
        assert_eq!(state.run_state, RunState::Ended);
    }

    #[test]
    fn test_zen_mode_never_spawns_obstacles() {
        let tuning = Tuning::default();
        let mut state = active(GameMode::Zen);
        let mut rng = RngSource::seeded(2024);

        for frame in 0..240 {
            // Hover around the middle of the playfield
            let flap = state.flyer.y > 300.0 && state.flyer.velocity > 0.0;
            let before: Vec<(u32, f32)> = state.collectibles.iter().map(|c| (c.id, c.x)).collect();

            tick(&mut state, &tuning, &mut rng, &TickInput { flap }, frame as f64 * 16.0);
            assert!(state.obstacles.is_empty());
            assert!(!state.collectibles.is_empty());

            for coin in &state.collectibles {
                if let Some((_, old_x)) = before.iter().find(|(id, _)| *id == coin.id) {
                    assert!(coin.x < *old_x);
                }
            }
        }
        assert_eq!(state.run_state, RunState::Active);
    }

    #[test]
    fn test_bubbles_expire_during_ticks() {
        let tuning = Tuning::default();
        let mut state = active(GameMode::Zen);
        let mut rng = ScriptedSource::default();
        crate::sim::feedback::push_feedback(&mut state, &mut rng, 0.0, 0.0, 0.0);

        // Keep the flyer inside the playfield
        state.flyer.velocity = 0.0;
        tick(&mut state, &tuning, &mut rng, &TickInput::default(), 1999.0);
        assert_eq!(state.feedback.len(), 1);

        state.flyer.velocity = -0.6;
        tick(&mut state, &tuning, &mut rng, &TickInput::default(), 2001.0);
        assert!(state.feedback.is_empty());
    }
}
