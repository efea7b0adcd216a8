pub mod aggregator;
pub mod client;
pub mod config;
pub mod models;
pub mod rate_limit;
pub mod readme;

pub use aggregator::{featured, languages, should_skip_readme, totals, RepositoryAggregator};
pub use client::GitHubClient;
pub use config::GitHubConfig;
pub use models::{Portfolio, ProfileSummary, RawRepository, RepositorySummary, Totals};
pub use rate_limit::RateLimitStatus;
pub use readme::{extract_demo_url, extract_description};
