//! Score computation and time formatting.
//!
//! Pure and deterministic; persistence of the resulting values belongs to
//! the caller's storage adapter.

use crate::difficulty::Difficulty;

const TIME_PENALTY_PER_MINUTE: u64 = 10;
const ERROR_PENALTY: u32 = 50;
const HINT_PENALTY: u32 = 100;

/// Final score for a completed game. Starts from the difficulty's base
/// score, subtracts 10 points per elapsed minute (fractional minutes
/// truncated after scaling), 50 per error, and 100 per hint. Never negative.
pub fn calculate_score(time_ms: u64, errors: u32, hints_used: u32, difficulty: Difficulty) -> u32 {
    let base = i64::from(difficulty.base_score());

    // floor(minutes * 10) == ms / 6000 in integer arithmetic
    let time_penalty = (time_ms * TIME_PENALTY_PER_MINUTE / 60_000) as i64;
    let error_penalty = i64::from(errors) * i64::from(ERROR_PENALTY);
    let hint_penalty = i64::from(hints_used) * i64::from(HINT_PENALTY);

    (base - time_penalty - error_penalty - hint_penalty).max(0) as u32
}

/// Format milliseconds as zero-padded `MM:SS`. Minutes do not roll over
/// into hours: one hour renders as `60:00`.
pub fn format_time(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
