use crate::error::{Error, Result};
use crate::github::GitHubConfig;
use crate::http::RequestGuard;
use crate::leetcode::LeetCodeConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub github: GitHubConfig,
    pub leetcode: LeetCodeConfig,
}

/// Deployment environment. Only affects diagnostic log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    /// Filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Development => "info,showcase=debug",
            Environment::Production => "warn,showcase=info",
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(Error::Config(format!(
                "Invalid APP_ENV value: {other} (expected development or production)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_rate_limit: u64,
}

/// Settings for the outbound HTTP client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
    #[serde(skip)]
    pub guard: RequestGuard,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: format!("Showcase/{}", env!("CARGO_PKG_VERSION")),
            guard: RequestGuard::default(),
        }
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let environment = match std::env::var("APP_ENV") {
            Ok(value) => value.parse()?,
            Err(_) => Environment::default(),
        };

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PORT value".to_string()))?;

        let api_rate_limit = std::env::var("API_RATE_LIMIT")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid API_RATE_LIMIT value".to_string()))?;

        let timeout_seconds = std::env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid HTTP_TIMEOUT_SECS value".to_string()))?;

        Ok(Settings {
            environment,
            server: ServerConfig {
                host,
                port,
                api_rate_limit,
            },
            http: HttpConfig {
                timeout_seconds,
                ..HttpConfig::default()
            },
            github: GitHubConfig::from_env()?,
            leetcode: LeetCodeConfig::from_env(),
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.server.api_rate_limit == 0 {
            return Err(Error::Config("API rate limit must be non-zero".to_string()));
        }

        if self.http.timeout_seconds == 0 {
            return Err(Error::Config("HTTP timeout must be non-zero".to_string()));
        }

        if self.github.username.trim().is_empty() {
            return Err(Error::Config("GitHub username must not be empty".to_string()));
        }

        if self.leetcode.username.trim().is_empty() {
            return Err(Error::Config(
                "LeetCode username must not be empty".to_string(),
            ));
        }

        if self.github.readme_concurrency == 0 {
            return Err(Error::Config(
                "README concurrency must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}
