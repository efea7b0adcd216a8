use axum::{extract::State, Json};
use tracing::debug;

use crate::{
    api::models::*, config::Settings, github::RepositoryAggregator, leetcode::StatsAggregator,
    Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub repositories: RepositoryAggregator,
    pub stats: StatsAggregator,
    pub settings: Settings,
}

/// GET /api/projects - Repository showcase for the configured GitHub user
pub async fn get_projects(State(state): State<AppState>) -> Result<Json<ProjectsResponse>> {
    let username = &state.settings.github.username;
    debug!("Projects request for {}", username);

    let portfolio = state.repositories.aggregate(username).await;

    Ok(Json(ProjectsResponse::from_portfolio(portfolio)))
}

/// GET /api/leetcode - Problem-solving statistics for the configured user
pub async fn get_leetcode(State(state): State<AppState>) -> Result<Json<LeetCodeResponse>> {
    let username = &state.settings.leetcode.username;
    debug!("LeetCode request for {}", username);

    let stats = state.stats.fetch_stats(username).await;

    Ok(Json(LeetCodeResponse::from_stats(stats)))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}
