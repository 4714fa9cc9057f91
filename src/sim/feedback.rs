//! Speech bubbles shown after coin pickups

use super::random::RandomSource;
use super::state::{FeedbackEvent, GameState};
use crate::consts::{FEEDBACK_OFFSET_X, FEEDBACK_OFFSET_Y};

/// Phrases a bubble can show
pub const PHRASES: [&str; 8] = [
    "AEC MANE JUI ✨",
    "BADE HARAMI HO BETA🚀",
    "DOGESH BHAI OP🐶",
    "ROKDAAA 💰",
    "PAISA HI PAISA HOGA🪙",
    "PANCHI BANU UDTI CHALU 🛸",
    "UTHA LE RE BABA 🌟",
    "BABURAO KA STYLE HAI🐕",
];

/// Push a bubble anchored next to a coin at `(coin_x, coin_y)`; returns its id
pub fn push_feedback(
    state: &mut GameState,
    rng: &mut impl RandomSource,
    coin_x: f32,
    coin_y: f32,
    now_ms: f64,
) -> u32 {
    let text = PHRASES[rng.pick(PHRASES.len())];
    let id = state.next_entity_id();
    state.feedback.push(FeedbackEvent {
        id,
        text: text.to_string(),
        x: coin_x + FEEDBACK_OFFSET_X,
        y: coin_y + FEEDBACK_OFFSET_Y,
        created_ms: now_ms,
    });
    id
}

/// Drop bubbles older than `ttl_ms`
pub fn expire_feedback(events: Vec<FeedbackEvent>, now_ms: f64, ttl_ms: f64) -> Vec<FeedbackEvent> {
    events
        .into_iter()
        .filter(|e| e.age_ms(now_ms) <= ttl_ms)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FEEDBACK_TTL_MS;
    use crate::sim::random::ScriptedSource;

    #[test]
    fn test_push_uses_scripted_phrase_and_offset() {
        let mut state = GameState::new();
        let mut rng = ScriptedSource::new(vec![3], vec![]);
        let id = push_feedback(&mut state, &mut rng, 200.0, 300.0, 1234.0);

        assert_eq!(state.feedback.len(), 1);
        let bubble = &state.feedback[0];
        assert_eq!(bubble.id, id);
        assert_eq!(bubble.text, PHRASES[3]);
        assert_eq!(bubble.x, 250.0);
        assert_eq!(bubble.y, 270.0);
        assert_eq!(bubble.created_ms, 1234.0);
    }

    #[test]
    fn test_expiry_window() {
        let mut state = GameState::new();
        let mut rng = ScriptedSource::default();
        push_feedback(&mut state, &mut rng, 0.0, 0.0, 0.0);

        let kept = expire_feedback(state.feedback.clone(), 1999.0, FEEDBACK_TTL_MS);
        assert_eq!(kept.len(), 1);

        let kept = expire_feedback(state.feedback.clone(), 2001.0, FEEDBACK_TTL_MS);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_expiry_keeps_order() {
        let mut state = GameState::new();
        let mut rng = ScriptedSource::default();
        for t in [0.0, 500.0, 1000.0, 1500.0] {
            push_feedback(&mut state, &mut rng, 0.0, 0.0, t);
        }

        let kept = expire_feedback(state.feedback, 2700.0, FEEDBACK_TTL_MS);
        let created: Vec<f64> = kept.iter().map(|e| e.created_ms).collect();
        assert_eq!(created, vec![1000.0, 1500.0]);
    }
}
