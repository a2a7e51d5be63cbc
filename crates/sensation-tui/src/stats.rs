//! Score records, aggregate statistics, and the leaderboard.

use crate::store::{ScoreStore, StoreData};
use sensation_core::{calculate_score, Difficulty};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Leaderboard size cap.
pub const MAX_SCORES: usize = 50;

const SECONDS_PER_DAY: u64 = 86_400;

/// A finalized score for one completed game. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player_name: String,
    pub time_ms: u64,
    pub difficulty: Difficulty,
    pub errors: u32,
    pub hints_used: u32,
    /// Unix timestamp (seconds) when the game was completed
    pub timestamp: u64,
    pub score: u32,
}

/// Best and average completion time for one difficulty, in milliseconds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DifficultyTimes {
    pub best_ms: Option<u64>,
    pub average_ms: Option<u64>,
}

/// Aggregate statistics across all games.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStats {
    pub games_played: u32,
    pub games_won: u32,
    pub by_difficulty: HashMap<String, DifficultyTimes>,
    pub total_hints_used: u32,
    pub total_errors: u32,
    pub longest_streak: u32,
    pub current_streak: u32,
    /// Day of the last win, as days since the Unix epoch
    pub last_played_day: Option<u64>,
}

impl GameStats {
    pub fn times_for(&self, difficulty: Difficulty) -> DifficultyTimes {
        self.by_difficulty
            .get(&difficulty.to_string())
            .copied()
            .unwrap_or_default()
    }

    /// Fold a win into the aggregates. `today` is the completion day as
    /// days since the epoch; the daily streak grows only when the previous
    /// win was yesterday.
    fn record_win(
        &mut self,
        difficulty: Difficulty,
        time_ms: u64,
        hints_used: u32,
        errors: u32,
        today: u64,
    ) {
        self.games_played += 1;
        self.games_won += 1;
        self.total_hints_used += hints_used;
        self.total_errors += errors;

        let times = self.by_difficulty.entry(difficulty.to_string()).or_default();

        times.best_ms = Some(match times.best_ms {
            Some(best) => best.min(time_ms),
            None => time_ms,
        });
        times.average_ms = Some(match times.average_ms {
            // Running mean weighted by the overall games-played counter
            Some(avg) => {
                let played = u64::from(self.games_played);
                (avg * (played - 1) + time_ms) / played
            }
            None => time_ms,
        });

        match self.last_played_day {
            Some(day) if day + 1 == today => self.current_streak += 1,
            Some(day) if day == today => {} // same-day win keeps the streak
            _ => self.current_streak = 1,
        }
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_played_day = Some(today);
    }
}

/// Owns the persisted scores and stats behind a [`ScoreStore`].
pub struct ScoreBook {
    store: Arc<dyn ScoreStore>,
    data: StoreData,
}

impl ScoreBook {
    /// Load existing records from the store; a failing store degrades to
    /// empty records so the game can still be played.
    pub fn open(store: Arc<dyn ScoreStore>) -> Self {
        let data = store.load().unwrap_or_default();
        Self { store, data }
    }

    /// Record a completed game: computes the score, inserts the entry into
    /// the leaderboard (descending by score, capped), updates the aggregate
    /// stats, and persists everything. Returns the recorded score entry.
    pub fn record_win(
        &mut self,
        player_name: &str,
        difficulty: Difficulty,
        time_ms: u64,
        errors: u32,
        hints_used: u32,
    ) -> PlayerScore {
        let score = calculate_score(time_ms, errors, hints_used, difficulty);
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let entry = PlayerScore {
            player_name: player_name.to_string(),
            time_ms,
            difficulty,
            errors,
            hints_used,
            timestamp,
            score,
        };

        self.insert_score(entry.clone());
        self.data
            .stats
            .record_win(difficulty, time_ms, hints_used, errors, timestamp / SECONDS_PER_DAY);

        // Persistence failure must not lose the in-memory session
        if let Err(e) = self.store.save(&self.data) {
            eprintln!("warning: could not save scores: {}", e);
        }

        entry
    }

    /// Insert keeping the list sorted descending by score, capped at
    /// [`MAX_SCORES`]. Ties keep insertion order (newer entries after).
    fn insert_score(&mut self, entry: PlayerScore) {
        let pos = self
            .data
            .scores
            .iter()
            .position(|e| e.score < entry.score)
            .unwrap_or(self.data.scores.len());

        self.data.scores.insert(pos, entry);
        self.data.scores.truncate(MAX_SCORES);
    }

    pub fn scores(&self) -> &[PlayerScore] {
        &self.data.scores
    }

    pub fn scores_for(&self, difficulty: Difficulty) -> Vec<&PlayerScore> {
        self.data
            .scores
            .iter()
            .filter(|s| s.difficulty == difficulty)
            .collect()
    }

    pub fn stats(&self) -> &GameStats {
        &self.data.stats
    }

    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemStore;

    fn book() -> ScoreBook {
        ScoreBook::open(Arc::new(MemStore::new()))
    }

    #[test]
    fn records_are_sorted_descending_by_score() {
        let mut book = book();
        // Higher error counts lower the score
        book.record_win("a", Difficulty::Easy, 0, 5, 0); // 750
        book.record_win("b", Difficulty::Easy, 0, 0, 0); // 1000
        book.record_win("c", Difficulty::Easy, 0, 2, 0); // 900

        let scores: Vec<u32> = book.scores().iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![1000, 900, 750]);
        assert_eq!(book.scores()[0].player_name, "b");
    }

    #[test]
    fn leaderboard_caps_at_fifty() {
        let mut book = book();
        for i in 0..60u64 {
            // One extra minute per game: scores 1000, 990, ... 410
            book.record_win("p", Difficulty::Easy, i * 60_000, 0, 0);
        }
        assert_eq!(book.scores().len(), MAX_SCORES);
        // The fifty best survive
        assert_eq!(book.scores()[0].score, 1000);
        assert!(book.scores().iter().all(|s| s.score >= 1000 - 49 * 10));
    }

    #[test]
    fn difficulty_filter() {
        let mut book = book();
        book.record_win("a", Difficulty::Easy, 0, 0, 0);
        book.record_win("b", Difficulty::Hard, 0, 0, 0);
        book.record_win("c", Difficulty::Hard, 0, 1, 0);

        assert_eq!(book.scores_for(Difficulty::Hard).len(), 2);
        assert_eq!(book.scores_for(Difficulty::Easy).len(), 1);
        assert_eq!(book.scores_for(Difficulty::Medium).len(), 0);
    }

    #[test]
    fn stats_accumulate() {
        let mut book = book();
        book.record_win("a", Difficulty::Medium, 120_000, 2, 1);
        book.record_win("a", Difficulty::Medium, 60_000, 0, 0);

        let stats = book.stats();
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.games_won, 2);
        assert_eq!(stats.total_errors, 2);
        assert_eq!(stats.total_hints_used, 1);

        let times = stats.times_for(Difficulty::Medium);
        assert_eq!(times.best_ms, Some(60_000));
        assert!(times.average_ms.is_some());
    }

    #[test]
    fn streak_day_arithmetic() {
        let mut stats = GameStats::default();

        stats.record_win(Difficulty::Easy, 1000, 0, 0, 100);
        assert_eq!(stats.current_streak, 1);

        // Next day extends the streak
        stats.record_win(Difficulty::Easy, 1000, 0, 0, 101);
        assert_eq!(stats.current_streak, 2);

        // Same day keeps it
        stats.record_win(Difficulty::Easy, 1000, 0, 0, 101);
        assert_eq!(stats.current_streak, 2);

        // A gap resets it
        stats.record_win(Difficulty::Easy, 1000, 0, 0, 105);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 2);
    }

    #[test]
    fn degraded_store_still_records_in_memory() {
        let store = Arc::new(MemStore::new());
        let mut book = ScoreBook::open(store.clone());

        store.set_available(false);
        book.record_win("a", Difficulty::Easy, 0, 0, 0);
        assert_eq!(book.scores().len(), 1);

        // Nothing reached the backend
        store.set_available(true);
        assert!(store.load().unwrap().scores.is_empty());
    }
}
