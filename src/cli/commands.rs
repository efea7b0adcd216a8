use crate::api::models::{LeetCodeResponse, ProjectsResponse};
use crate::config::Settings;
use crate::github::{GitHubClient, RepositoryAggregator};
use crate::http::GuardedClient;
use crate::leetcode::StatsAggregator;
use crate::utils::{format_date, format_number};
use crate::{Error, Result};
use serde::Serialize;

/// Print the repository showcase for a GitHub user
pub async fn projects(settings: &Settings, username: Option<String>, json: bool) -> Result<()> {
    let username = username.unwrap_or_else(|| settings.github.username.clone());

    let http = GuardedClient::new(&settings.http)?;
    let aggregator = RepositoryAggregator::new(GitHubClient::new(http, settings.github.clone()));
    let response = ProjectsResponse::from_portfolio(aggregator.aggregate(&username).await);

    if json {
        print_json(&response)
    } else {
        print_projects(&username, &response);
        Ok(())
    }
}

/// Print problem-solving statistics for a LeetCode user
pub async fn leetcode(settings: &Settings, username: Option<String>, json: bool) -> Result<()> {
    let username = username.unwrap_or_else(|| settings.leetcode.username.clone());

    let http = GuardedClient::new(&settings.http)?;
    let aggregator = StatsAggregator::new(http, &settings.leetcode);
    let response = LeetCodeResponse::from_stats(aggregator.fetch_stats(&username).await);

    if json {
        print_json(&response)
    } else {
        print_leetcode(&response);
        Ok(())
    }
}

/// Report whether the request guard lets a URL through
pub fn check_url(settings: &Settings, url: &str) -> Result<()> {
    match settings.http.guard.check(url) {
        Ok(_) => {
            println!("\x1b[32m\u{2713}\x1b[0m Allowed: {url}");
            Ok(())
        }
        Err(e) => {
            println!("\x1b[31m\u{2717}\x1b[0m {e}");
            println!("  Allowed hosts (https only):");
            for host in settings.http.guard.allowed_hosts() {
                println!("    - {host}");
            }
            Err(e)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| Error::Internal(format!("Failed to serialize output: {e}")))?;
    println!("{rendered}");
    Ok(())
}

fn print_projects(username: &str, response: &ProjectsResponse) {
    let totals = &response.totals;

    println!("\nGitHub: {username}");
    if response.profile.is_none() {
        println!("  (profile unavailable)");
    }
    println!(
        "  Repos: {}  Stars: {}  Forks: {}  Followers: {}  Following: {}",
        totals.repo_count,
        format_number(totals.star_sum),
        format_number(totals.fork_sum),
        format_number(totals.follower_count),
        format_number(totals.following_count)
    );

    if response.repos.is_empty() {
        println!("\nNo repositories found");
        return;
    }

    println!(
        "\n{:<30} {:<12} {:>6} {:<20} {:<30}",
        "Name", "Language", "Stars", "Updated", "Demo"
    );
    println!("{}", "-".repeat(102));

    for repo in &response.repos {
        println!(
            "{:<30} {:<12} {:>6} {:<20} {:<30}",
            truncate(&repo.name, 28),
            truncate(repo.language.as_deref().unwrap_or("-"), 12),
            format_number(repo.stars.unwrap_or(0)),
            format_date(&repo.updated_at),
            repo.demo_url.as_deref().unwrap_or("-")
        );
        if let Some(description) = &repo.description {
            println!("  {}", truncate(description, 96));
        }
    }

    if !response.languages.is_empty() {
        let languages: Vec<String> = response
            .languages
            .iter()
            .map(|l| format!("{} ({})", l.language, l.count))
            .collect();
        println!("\nTop languages: {}", languages.join(", "));
    }
}

fn print_leetcode(response: &LeetCodeResponse) {
    let stats = &response.stats;
    let progress = &response.progress;

    println!("\nLeetCode: {}", stats.username);
    println!(
        "  Solved: {} ({}% of problem pool)",
        stats.total_solved, progress.overall
    );
    println!(
        "  Easy: {} ({}%)  Medium: {} ({}%)  Hard: {} ({}%)",
        stats.easy_solved,
        progress.difficulty.easy,
        stats.medium_solved,
        progress.difficulty.medium,
        stats.hard_solved,
        progress.difficulty.hard
    );
    println!("  Acceptance rate: {:.1}%", stats.acceptance_rate);
    if let Some(ranking) = stats.ranking {
        println!("  Ranking: {}", format_number(ranking));
    }

    if !stats.badges.is_empty() {
        println!("  Badges:");
        for badge in &stats.badges {
            println!("    {} {}", badge.icon, badge.name);
        }
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-repository-name", 10), "a-very-...");
        assert_eq!(truncate("ééééééééééé", 5), "éé...");
    }
}
