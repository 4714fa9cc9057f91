//! Best score persistence
//!
//! A single scalar stored under a fixed key:
//! - LocalStorage on web
//! - In-memory elsewhere (and in tests)
//!
//! Callers treat every failure as non-fatal.

use thiserror::Error;

/// Storage key for the best score
pub const BEST_SCORE_KEY: &str = "astro-doge-best-score";

/// Why a load or save failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("stored best score is unreadable: {0:?}")]
    Corrupt(String),
    #[error("failed to write best score: {0}")]
    Write(String),
}

/// Get/set contract for the persisted best score
pub trait ScoreStore {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<u32>, StorageError>;
    fn save(&mut self, score: u32) -> Result<(), StorageError>;
}

/// Parse a stored value (decimal string)
pub fn parse_score(raw: &str) -> Result<u32, StorageError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| StorageError::Corrupt(raw.to_string()))
}

/// Process-local store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<String>,
    /// Simulate an unavailable backend
    pub fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw value
    pub fn with_raw(raw: &str) -> Self {
        Self {
            value: Some(raw.to_string()),
            fail: false,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<u32>, StorageError> {
        if self.fail {
            return Err(StorageError::Unavailable);
        }
        self.value.as_deref().map(parse_score).transpose()
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Write("memory store disabled".to_string()));
        }
        self.value = Some(score.to_string());
        Ok(())
    }
}

/// Browser LocalStorage store
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load(&self) -> Result<Option<u32>, StorageError> {
        let storage = Self::storage()?;
        match storage.get_item(BEST_SCORE_KEY) {
            Ok(Some(raw)) => parse_score(&raw).map(Some),
            Ok(None) => Ok(None),
            Err(_) => Err(StorageError::Unavailable),
        }
    }

    fn save(&mut self, score: u32) -> Result<(), StorageError> {
        let storage = Self::storage()?;
        storage
            .set_item(BEST_SCORE_KEY, &score.to_string())
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}
