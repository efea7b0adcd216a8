use crate::http::GuardedClient;
use crate::leetcode::{
    config::LeetCodeConfig,
    models::StatsRecord,
    providers::{AlfaLeetCodeApi, FaisalShohagApi, LeetCodeStatsApi, StatsProvider},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fetches statistics from an ordered list of providers.
///
/// Providers are tried one after another, never concurrently; the first
/// usable record wins. When every provider fails the fixed fallback record
/// is returned, so `fetch_stats` has no failure path.
#[derive(Clone)]
pub struct StatsAggregator {
    http: GuardedClient,
    providers: Arc<[Box<dyn StatsProvider>]>,
}

impl StatsAggregator {
    /// Aggregator over the three public providers, in priority order
    pub fn new(http: GuardedClient, config: &LeetCodeConfig) -> Self {
        let providers: Vec<Box<dyn StatsProvider>> = vec![
            Box::new(LeetCodeStatsApi::new(config.stats_api_url.clone())),
            Box::new(AlfaLeetCodeApi::new(config.alfa_api_url.clone())),
            Box::new(FaisalShohagApi::new(config.faisal_api_url.clone())),
        ];
        Self::with_providers(http, providers)
    }

    pub fn with_providers(http: GuardedClient, providers: Vec<Box<dyn StatsProvider>>) -> Self {
        Self {
            http,
            providers: providers.into(),
        }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn fetch_stats(&self, username: &str) -> StatsRecord {
        for provider in self.providers.iter() {
            match provider.fetch(&self.http, username).await {
                Ok(record) => {
                    info!(
                        "Fetched stats for {} from {} ({} solved)",
                        username,
                        provider.name(),
                        record.total_solved
                    );
                    return record;
                }
                Err(e) => {
                    debug!(
                        "Stats provider {} failed for {}: {}",
                        provider.name(),
                        username,
                        e.log_safe()
                    );
                }
            }
        }

        warn!(
            "All {} stats providers failed for {}, using fallback record",
            self.providers.len(),
            username
        );
        StatsRecord::fallback(username)
    }
}
