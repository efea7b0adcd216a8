use serde::{Deserialize, Serialize};

/// Achievement badge shown under the solve counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub name: String,
    pub icon: String,
}

impl Badge {
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
        }
    }
}

/// Problem-solving statistics normalized across providers.
///
/// Counts come from the provider as-is; `total_solved` is not checked
/// against the per-difficulty counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    /// Display name reported by the provider, or the requested username
    pub username: String,
    pub total_solved: u64,
    pub easy_solved: u64,
    pub medium_solved: u64,
    pub hard_solved: u64,
    pub ranking: Option<u64>,
    pub acceptance_rate: f64,
    pub badges: Vec<Badge>,
}

impl StatsRecord {
    /// Placeholder record used when no provider answers
    pub fn fallback(username: &str) -> Self {
        Self {
            username: username.to_string(),
            total_solved: 45,
            easy_solved: 25,
            medium_solved: 15,
            hard_solved: 5,
            ranking: None,
            acceptance_rate: 75.0,
            badges: vec![
                Badge::new("Problem Solver", "🎯"),
                Badge::new("Code Warrior", "⚔️"),
            ],
        }
    }
}
