use crate::github::{
    config::GitHubConfig,
    models::{ProfileSummary, RawProfile, RawRepository, ReadmeContent},
    rate_limit,
};
use crate::http::{GuardedClient, RequestOptions};
use crate::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Page size for the repository listing
const REPOS_PER_PAGE: u32 = 50;

/// GitHub API client
#[derive(Clone)]
pub struct GitHubClient {
    http: GuardedClient,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(http: GuardedClient, config: GitHubConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url(), path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self.http.get(&url, RequestOptions::default()).await?;
        rate_limit::record(response.headers());
        GuardedClient::read_json(&url, response).await
    }

    /// Get user information
    pub async fn get_user(&self, username: &str) -> Result<RawProfile> {
        let path = format!("/users/{}", urlencoding::encode(username));
        self.get_json(&path).await
    }

    /// List a user's repositories, most recently updated first
    pub async fn list_repositories(&self, username: &str) -> Result<Vec<RawRepository>> {
        let path = format!(
            "/users/{}/repos?sort=updated&per_page={REPOS_PER_PAGE}",
            urlencoding::encode(username)
        );
        self.get_json(&path).await
    }

    /// Profile summary, or `None` when it cannot be fetched
    pub async fn fetch_profile(&self, username: &str) -> Option<ProfileSummary> {
        match self.get_user(username).await {
            Ok(raw) => Some(raw.into()),
            Err(e) => {
                debug!("Failed to fetch GitHub user {}: {}", username, e.log_safe());
                None
            }
        }
    }

    /// Repository list, or an empty list when it cannot be fetched
    pub async fn fetch_repositories(&self, username: &str) -> Vec<RawRepository> {
        match self.list_repositories(username).await {
            Ok(repos) => repos,
            Err(e) => {
                debug!(
                    "Failed to fetch GitHub repositories for {}: {}",
                    username,
                    e.log_safe()
                );
                Vec::new()
            }
        }
    }

    /// Fetch and decode a repository README.
    ///
    /// A 404, or a payload without content, is reported as `Error::NoReadme`.
    pub async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<String> {
        let path = format!(
            "/repos/{}/{}/readme",
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        );
        let url = self.url(&path);
        let full_name = format!("{owner}/{repo}");

        let response = self.http.get(&url, RequestOptions::default()).await?;
        rate_limit::record(response.headers());

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NoReadme(full_name));
        }
        if !status.is_success() {
            return Err(Error::UpstreamRejected {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = response.bytes().await?;
        let readme: ReadmeContent = serde_json::from_slice(&bytes)
            .map_err(|e| Error::MalformedResponse(format!("{url}: {e}")))?;

        match readme.content {
            Some(content) if !content.is_empty() => decode_content(&content),
            _ => Err(Error::NoReadme(full_name)),
        }
    }
}

/// Decode the base64 body GitHub returns, which is wrapped with newlines
pub fn decode_content(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| Error::MalformedResponse(format!("Invalid base64 README content: {e}")))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
