//! Rough progress percentages against assumed problem-pool sizes.
//!
//! The pool sizes are fixed estimates, not live numbers, so the
//! percentages are indicative only.

use crate::leetcode::models::StatsRecord;
use serde::{Deserialize, Serialize};

pub const ASSUMED_TOTAL_PROBLEMS: u64 = 2000;
pub const ASSUMED_EASY_PROBLEMS: u64 = 600;
pub const ASSUMED_MEDIUM_PROBLEMS: u64 = 1200;
pub const ASSUMED_HARD_PROBLEMS: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyProgress {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

/// Overall and per-difficulty progress, as served to the frontend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub overall: u32,
    #[serde(flatten)]
    pub difficulty: DifficultyProgress,
}

impl ProgressReport {
    pub fn from_record(record: &StatsRecord) -> Self {
        Self {
            overall: overall_progress_percent(record),
            difficulty: difficulty_progress(record),
        }
    }
}

fn percent(solved: u64, pool: u64) -> u32 {
    let value = (solved as f64 * 100.0 / pool as f64).round();
    value.clamp(0.0, u32::MAX as f64) as u32
}

/// Share of the assumed problem pool solved, from the per-difficulty counts
pub fn overall_progress_percent(record: &StatsRecord) -> u32 {
    // Counts come from third-party payloads and may be absurdly large
    let solved = record
        .easy_solved
        .saturating_add(record.medium_solved)
        .saturating_add(record.hard_solved);
    if solved == 0 {
        return 0;
    }
    percent(solved, ASSUMED_TOTAL_PROBLEMS)
}

pub fn difficulty_progress(record: &StatsRecord) -> DifficultyProgress {
    DifficultyProgress {
        easy: percent(record.easy_solved, ASSUMED_EASY_PROBLEMS),
        medium: percent(record.medium_solved, ASSUMED_MEDIUM_PROBLEMS),
        hard: percent(record.hard_solved, ASSUMED_HARD_PROBLEMS),
    }
}
