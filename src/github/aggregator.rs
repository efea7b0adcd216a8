use crate::github::{
    client::GitHubClient,
    models::{Portfolio, ProfileSummary, RawRepository, RepositorySummary, Totals},
    readme::{extract_demo_url, extract_description},
};
use futures::stream::{self, StreamExt};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Instant;
use tracing::{debug, info};

/// Number of repositories kept after filtering
pub const MAX_REPOSITORIES: usize = 12;

/// Repositories smaller than this (KB) are not worth a README request
pub const MIN_README_SIZE_KB: u64 = 10;

const MAX_FEATURED: usize = 6;
const MAX_LANGUAGES: usize = 5;

static SCRATCH_REPO_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(test|demo|example)-?\d*$").expect("scratch repo pattern must compile")
});

static PRACTICE_REPO_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^leetcode|^lc-|^LCOF").expect("practice repo pattern must compile")
});

/// Builds the project showcase from a user's public repositories
#[derive(Clone)]
pub struct RepositoryAggregator {
    client: GitHubClient,
}

impl RepositoryAggregator {
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    /// Fetch profile and repositories, keep the most recent ones and enrich
    /// them from their READMEs. Upstream failures degrade the result instead
    /// of failing it.
    pub async fn aggregate(&self, username: &str) -> Portfolio {
        let start = Instant::now();

        let (profile, raw_repos) = tokio::join!(
            self.client.fetch_profile(username),
            self.client.fetch_repositories(username)
        );

        let selected = select_repositories(raw_repos);
        let concurrency = self.client.config().readme_concurrency.max(1);

        debug!(
            "Enriching {} repositories for {} (concurrency {})",
            selected.len(),
            username,
            concurrency
        );

        let repos: Vec<RepositorySummary> = stream::iter(selected)
            .map(|repo| self.enrich(username, repo))
            .buffered(concurrency)
            .collect()
            .await;

        info!(
            "Aggregated {} repositories for {} in {:?} (profile: {})",
            repos.len(),
            username,
            start.elapsed(),
            if profile.is_some() { "ok" } else { "unavailable" }
        );

        Portfolio { repos, profile }
    }

    /// Attach README-derived demo link and description to one repository
    async fn enrich(&self, owner: &str, repo: RawRepository) -> RepositorySummary {
        if should_skip_readme(&repo) {
            return RepositorySummary::from_raw(repo).enhance(None, None);
        }

        match self.client.fetch_readme(owner, &repo.name).await {
            Ok(readme) => {
                let demo_url = extract_demo_url(Some(&readme));
                let description = extract_description(Some(&readme));
                RepositorySummary::from_raw(repo).enhance(demo_url, description)
            }
            Err(e) if e.is_no_readme() => RepositorySummary::from_raw(repo).enhance(None, None),
            Err(e) => {
                debug!("README fetch failed for {}: {}", repo.name, e.log_safe());
                RepositorySummary::from_raw(repo)
            }
        }
    }
}

/// Drop forks and archived repositories, newest first, capped at `MAX_REPOSITORIES`
pub fn select_repositories(repos: Vec<RawRepository>) -> Vec<RawRepository> {
    let mut kept: Vec<RawRepository> = repos
        .into_iter()
        .filter(|repo| !repo.fork && !repo.archived)
        .collect();

    // Stable sort keeps provider order for equal timestamps
    kept.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    kept.truncate(MAX_REPOSITORIES);
    kept
}

/// Repositories unlikely to carry a demo link are not worth a README request
pub fn should_skip_readme(repo: &RawRepository) -> bool {
    repo.size < MIN_README_SIZE_KB
        || SCRATCH_REPO_NAME.is_match(&repo.name)
        || PRACTICE_REPO_NAME.is_match(&repo.name)
        || repo.language.is_none()
}

/// Sum stars and forks over the repositories and copy the profile counters
pub fn totals(repos: &[RepositorySummary], profile: Option<&ProfileSummary>) -> Totals {
    Totals {
        repo_count: repos.len(),
        star_sum: repos
            .iter()
            .fold(0u64, |sum, r| sum.saturating_add(r.stars.unwrap_or(0))),
        fork_sum: repos
            .iter()
            .fold(0u64, |sum, r| sum.saturating_add(r.forks.unwrap_or(0))),
        follower_count: profile.map_or(0, |p| p.followers),
        following_count: profile.map_or(0, |p| p.following),
        public_repo_count: profile.map_or(0, |p| p.public_repos),
    }
}

/// Repositories worth highlighting: starred or with a live demo
pub fn featured(repos: &[RepositorySummary]) -> Vec<&RepositorySummary> {
    repos
        .iter()
        .filter(|r| r.stars.unwrap_or(0) > 0 || r.demo_url.is_some())
        .take(MAX_FEATURED)
        .collect()
}

/// Most used primary languages with their repository counts
pub fn languages(repos: &[RepositorySummary]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for language in repos.iter().filter_map(|r| r.language.as_deref()) {
        let count = counts.entry(language).or_insert(0);
        if *count == 0 {
            order.push(language);
        }
        *count += 1;
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|language| (language.to_string(), counts[language]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(MAX_LANGUAGES);
    ranked
}
