use crate::github::{self, Portfolio, ProfileSummary, RepositorySummary, Totals};
use crate::leetcode::{ProgressReport, StatsRecord};
use serde::{Deserialize, Serialize};

/// Repository showcase for the projects section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub repos: Vec<RepositorySummary>,
    pub profile: Option<ProfileSummary>,
    pub totals: Totals,
    pub featured: Vec<RepositorySummary>,
    pub languages: Vec<LanguageCount>,
}

impl ProjectsResponse {
    pub fn from_portfolio(portfolio: Portfolio) -> Self {
        let totals = github::totals(&portfolio.repos, portfolio.profile.as_ref());
        let featured = github::featured(&portfolio.repos)
            .into_iter()
            .cloned()
            .collect();
        let languages = github::languages(&portfolio.repos)
            .into_iter()
            .map(|(language, count)| LanguageCount { language, count })
            .collect();

        Self {
            repos: portfolio.repos,
            profile: portfolio.profile,
            totals,
            featured,
            languages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    pub language: String,
    pub count: usize,
}

/// Problem-solving statistics for the LeetCode section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeetCodeResponse {
    pub stats: StatsRecord,
    pub progress: ProgressReport,
}

impl LeetCodeResponse {
    pub fn from_stats(stats: StatsRecord) -> Self {
        let progress = ProgressReport::from_record(&stats);
        Self { stats, progress }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
