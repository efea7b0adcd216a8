use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GitHub user as returned by `GET /users/{username}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProfile {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    #[serde(default)]
    pub public_repos: u64,
}

/// Repository entry from `GET /users/{username}/repos`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRepository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    /// Size in kilobytes
    #[serde(default)]
    pub size: u64,
    pub stargazers_count: Option<u64>,
    pub forks_count: Option<u64>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub html_url: String,
}

/// README payload from `GET /repos/{owner}/{repo}/readme`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadmeContent {
    pub content: Option<String>,
}

/// Profile data handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub avatar_url: String,
    pub followers: u64,
    pub following: u64,
    pub public_repos: u64,
}

impl From<RawProfile> for ProfileSummary {
    fn from(raw: RawProfile) -> Self {
        Self {
            avatar_url: raw.avatar_url,
            followers: raw.followers,
            following: raw.following,
            public_repos: raw.public_repos,
        }
    }
}

/// Repository card data, optionally enriched from the README
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: Option<u64>,
    pub forks: Option<u64>,
    pub is_fork: bool,
    pub is_archived: bool,
    pub size_kb: u64,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
    pub demo_url: Option<String>,
    pub enhanced: bool,
}

impl RepositorySummary {
    /// Summary with provider data only
    pub fn from_raw(raw: RawRepository) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            language: raw.language,
            stars: raw.stargazers_count,
            forks: raw.forks_count,
            is_fork: raw.fork,
            is_archived: raw.archived,
            size_kb: raw.size,
            updated_at: raw.updated_at,
            html_url: raw.html_url,
            demo_url: None,
            enhanced: false,
        }
    }

    /// Apply README-derived values. A missing description keeps the provider one.
    pub fn enhance(mut self, demo_url: Option<String>, description: Option<String>) -> Self {
        self.demo_url = demo_url;
        if description.is_some() {
            self.description = description;
        }
        self.enhanced = true;
        self
    }
}

/// Portfolio-wide counters shown next to the project grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub repo_count: usize,
    pub star_sum: u64,
    pub fork_sum: u64,
    pub follower_count: u64,
    pub following_count: u64,
    pub public_repo_count: u64,
}

/// Result of one aggregation cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub repos: Vec<RepositorySummary>,
    pub profile: Option<ProfileSummary>,
}
