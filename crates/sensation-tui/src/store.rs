//! Storage port for scores and statistics.
//!
//! The engine only computes values; everything that touches disk goes
//! through the [`ScoreStore`] trait so the scoring and stats logic stays
//! testable without a filesystem. Two backends:
//! - `JsonFileStore`: JSON file under the platform data directory
//! - `MemStore`: in-memory store for tests

use crate::stats::{GameStats, PlayerScore};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

/// The two named records the game persists, read and written wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreData {
    pub scores: Vec<PlayerScore>,
    pub stats: GameStats,
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone)]
pub enum StoreError {
    /// Reading or writing the backing storage failed
    Storage(String),
    /// Backend is intentionally offline (used by tests)
    Unavailable,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "storage error: {}", e),
            Self::Unavailable => write!(f, "store unavailable"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Backend abstraction for score/stats persistence.
pub trait ScoreStore: Send + Sync {
    fn load(&self) -> StoreResult<StoreData>;
    fn save(&self, data: &StoreData) -> StoreResult<()>;
    fn name(&self) -> &'static str;
}

// ==================== JSON File Backend ====================

/// File-backed store in the platform-local data directory.
pub struct JsonFileStore {
    path: PathBuf,
    cache: Mutex<Option<StoreData>>,
}

impl JsonFileStore {
    pub fn new() -> Self {
        let path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sensation_scores.json");
        Self::at(path)
    }

    /// Store backed by an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            cache: Mutex::new(None),
        }
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> StoreResult<StoreData> {
        let mut cache = self.cache.lock().unwrap();
        if let Some(ref data) = *cache {
            return Ok(data.clone());
        }

        // A missing file is a fresh install, not an error; a corrupt file
        // degrades to empty records rather than killing the game.
        let data = match std::fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => StoreData::default(),
        };

        *cache = Some(data.clone());
        Ok(data)
    }

    fn save(&self, data: &StoreData) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| StoreError::Storage(e.to_string()))?;

        std::fs::write(&self.path, json).map_err(|e| StoreError::Storage(e.to_string()))?;

        *self.cache.lock().unwrap() = Some(data.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Local"
    }
}

// ==================== In-Memory Backend for Testing ====================

/// In-memory store with a switchable availability flag.
pub struct MemStore {
    data: Mutex<StoreData>,
    available: Mutex<bool>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(StoreData::default()),
            available: Mutex::new(true),
        }
    }

    /// Make subsequent operations fail, to exercise degraded paths.
    pub fn set_available(&self, available: bool) {
        *self.available.lock().unwrap() = available;
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for MemStore {
    fn load(&self) -> StoreResult<StoreData> {
        if !*self.available.lock().unwrap() {
            return Err(StoreError::Unavailable);
        }
        Ok(self.data.lock().unwrap().clone())
    }

    fn save(&self, data: &StoreData) -> StoreResult<()> {
        if !*self.available.lock().unwrap() {
            return Err(StoreError::Unavailable);
        }
        *self.data.lock().unwrap() = data.clone();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensation_core::Difficulty;

    fn sample_score() -> PlayerScore {
        PlayerScore {
            player_name: "Ana".to_string(),
            time_ms: 120_000,
            difficulty: Difficulty::Easy,
            errors: 1,
            hints_used: 0,
            timestamp: 1_700_000_000,
            score: 930,
        }
    }

    #[test]
    fn mem_store_round_trips() {
        let store = MemStore::new();
        let mut data = store.load().unwrap();
        assert!(data.scores.is_empty());

        data.scores.push(sample_score());
        data.stats.games_won = 1;
        store.save(&data).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.scores.len(), 1);
        assert_eq!(loaded.stats.games_won, 1);
    }

    #[test]
    fn unavailable_store_errors() {
        let store = MemStore::new();
        store.set_available(false);
        assert!(store.load().is_err());
        assert!(store.save(&StoreData::default()).is_err());
    }

    #[test]
    fn file_store_round_trips() {
        let path = std::env::temp_dir().join("sensation_store_test.json");
        let _ = std::fs::remove_file(&path);

        let store = JsonFileStore::at(path.clone());
        let mut data = store.load().unwrap();
        data.scores.push(sample_score());
        store.save(&data).unwrap();

        // Fresh instance reads from disk, not the cache
        let reopened = JsonFileStore::at(path.clone());
        let loaded = reopened.load().unwrap();
        assert_eq!(loaded.scores.len(), 1);
        assert_eq!(loaded.scores[0].player_name, "Ana");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_file_loads_empty_records() {
        let store = JsonFileStore::at(PathBuf::from("/nonexistent/sensation.json"));
        let data = store.load().unwrap();
        assert!(data.scores.is_empty());
        assert_eq!(data.stats.games_played, 0);
    }
}
