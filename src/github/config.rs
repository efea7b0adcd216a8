use crate::error::{Error, Result};
use std::env;

/// GitHub integration configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Account whose repositories are showcased
    pub username: String,

    /// REST API base URL, without trailing slash
    pub api_base_url: String,

    /// Maximum README requests in flight during enrichment (default: 12)
    pub readme_concurrency: usize,
}

impl GitHubConfig {
    /// Create a new GitHubConfig from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let readme_concurrency = match env::var("README_CONCURRENCY") {
            Ok(value) => value
                .parse()
                .map_err(|_| Error::Config("Invalid README_CONCURRENCY value".to_string()))?,
            Err(_) => defaults.readme_concurrency,
        };

        Ok(Self {
            username: env::var("GITHUB_USERNAME").unwrap_or(defaults.username),
            api_base_url: env::var("GITHUB_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            readme_concurrency,
        })
    }

    /// Get the base API URL
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            username: "pargat-apps".to_string(),
            api_base_url: "https://api.github.com".to_string(),
            readme_concurrency: 12,
        }
    }
}
