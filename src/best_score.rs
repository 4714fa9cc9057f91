//! Best score tracking and end-of-run outcome tiers
//!
//! The best score only ever grows. It is read once at startup and written
//! through the [`ScoreStore`] whenever a finished run beats it.

use serde::{Deserialize, Serialize};

use crate::persistence::ScoreStore;

/// Highest score reached across runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestScore {
    pub value: u32,
}

impl BestScore {
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    /// Fold a finished run's score in. Returns true if it is a new best.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.value {
            self.value = score;
            true
        } else {
            false
        }
    }

    /// Load from storage; missing or unreadable values count as 0
    pub fn load(store: &impl ScoreStore) -> Self {
        match store.load() {
            Ok(Some(value)) => {
                log::info!("Loaded best score {}", value);
                Self::new(value)
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read best score ({}), starting at 0", e);
                Self::default()
            }
        }
    }

    /// Write to storage. Failures are logged; the in-memory value stays authoritative.
    pub fn save(&self, store: &mut impl ScoreStore) {
        match store.save(self.value) {
            Ok(()) => log::info!("Best score saved ({})", self.value),
            Err(e) => log::warn!("Best score not saved: {}", e),
        }
    }
}

/// Message tier shown after a crash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Scored nothing
    Heartbroken,
    /// 1..10
    BetterLuck,
    /// 10..25
    Proud,
    /// 25 and up
    Legendary,
}

impl Outcome {
    pub fn from_score(score: u32) -> Self {
        match score {
            0 => Outcome::Heartbroken,
            1..=9 => Outcome::BetterLuck,
            10..=24 => Outcome::Proud,
            _ => Outcome::Legendary,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Heartbroken => "SALA YEH DUKH KAHE KHATAM NHI HOTA 😢",
            Outcome::BetterLuck => "BETTER LUCK NEXT TIME🐕",
            Outcome::Proud => "BAH MODIJI BAH 🌟",
            Outcome::Legendary => "MOGAMBO KHUSH HUA 🚀",
        }
    }
}
