use std::env;

/// Problem-statistics provider configuration
#[derive(Debug, Clone)]
pub struct LeetCodeConfig {
    /// Account whose statistics are shown
    pub username: String,

    /// Base URLs of the three providers, tried in this order
    pub stats_api_url: String,
    pub alfa_api_url: String,
    pub faisal_api_url: String,
}

impl LeetCodeConfig {
    /// Create a new LeetCodeConfig from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = |key: &str, default: String| {
            env::var(key)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(default)
        };

        Self {
            username: env::var("LEETCODE_USERNAME").unwrap_or(defaults.username),
            stats_api_url: base_url("LEETCODE_STATS_API_URL", defaults.stats_api_url),
            alfa_api_url: base_url("ALFA_LEETCODE_API_URL", defaults.alfa_api_url),
            faisal_api_url: base_url("FAISAL_LEETCODE_API_URL", defaults.faisal_api_url),
        }
    }
}

impl Default for LeetCodeConfig {
    fn default() -> Self {
        Self {
            username: "pargat-apps".to_string(),
            stats_api_url: "https://leetcode-stats-api.herokuapp.com".to_string(),
            alfa_api_url: "https://alfa-leetcode-api.onrender.com".to_string(),
            faisal_api_url: "https://leetcode-api-faisalshohag.vercel.app".to_string(),
        }
    }
}
