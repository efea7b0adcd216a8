// Problem-solving statistics with ordered provider fallback

pub mod aggregator;
pub mod config;
pub mod models;
pub mod progress;
pub mod providers;

pub use aggregator::StatsAggregator;
pub use config::LeetCodeConfig;
pub use models::{Badge, StatsRecord};
pub use progress::{difficulty_progress, overall_progress_percent, DifficultyProgress, ProgressReport};
pub use providers::{AlfaLeetCodeApi, FaisalShohagApi, LeetCodeStatsApi, StatsProvider};
