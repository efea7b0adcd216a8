use crate::http::GuardedClient;
use crate::leetcode::models::{Badge, StatsRecord};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;

/// One third-party source of problem-solving statistics.
///
/// Providers disagree on field names and on how they signal a missing user,
/// so each one decides for itself whether a payload is usable.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn endpoint(&self, username: &str) -> String;

    /// Map a raw payload onto a record, or `None` if it is not a success
    fn normalize(&self, username: &str, data: &Value) -> Option<StatsRecord>;

    async fn fetch(&self, http: &GuardedClient, username: &str) -> Result<StatsRecord> {
        let data = http.get_value(&self.endpoint(username)).await?;

        self.normalize(username, &data).ok_or_else(|| {
            Error::MalformedResponse(format!("{} returned an unrecognized payload", self.name()))
        })
    }
}

/// `leetcode-stats-api.herokuapp.com`
#[derive(Debug, Clone)]
pub struct LeetCodeStatsApi {
    base_url: String,
}

impl LeetCodeStatsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl StatsProvider for LeetCodeStatsApi {
    fn name(&self) -> &'static str {
        "leetcode-stats-api"
    }

    fn endpoint(&self, username: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(username))
    }

    fn normalize(&self, username: &str, data: &Value) -> Option<StatsRecord> {
        if !has_key(data, "totalSolved") {
            return None;
        }
        Some(common_record(data, display_name(data, "name", username), Vec::new()))
    }
}

/// `alfa-leetcode-api.onrender.com`
#[derive(Debug, Clone)]
pub struct AlfaLeetCodeApi {
    base_url: String,
}

impl AlfaLeetCodeApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl StatsProvider for AlfaLeetCodeApi {
    fn name(&self) -> &'static str {
        "alfa-leetcode-api"
    }

    fn endpoint(&self, username: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(username))
    }

    fn normalize(&self, username: &str, data: &Value) -> Option<StatsRecord> {
        // This API reports unknown users through an `error` field
        if !is_truthy(data) || data.get("error").is_some_and(is_truthy) {
            return None;
        }
        Some(common_record(
            data,
            display_name(data, "username", username),
            badges(data),
        ))
    }
}

/// `leetcode-api-faisalshohag.vercel.app`
#[derive(Debug, Clone)]
pub struct FaisalShohagApi {
    base_url: String,
}

impl FaisalShohagApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl StatsProvider for FaisalShohagApi {
    fn name(&self) -> &'static str {
        "leetcode-api-faisalshohag"
    }

    fn endpoint(&self, username: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(username))
    }

    fn normalize(&self, username: &str, data: &Value) -> Option<StatsRecord> {
        if !has_key(data, "totalSolved") {
            return None;
        }
        Some(common_record(data, display_name(data, "name", username), Vec::new()))
    }
}

fn common_record(data: &Value, username: String, badges: Vec<Badge>) -> StatsRecord {
    let ranking = count(data.get("ranking"));

    StatsRecord {
        username,
        total_solved: count(data.get("totalSolved")),
        easy_solved: count(data.get("easySolved")),
        medium_solved: count(data.get("mediumSolved")),
        hard_solved: count(data.get("hardSolved")),
        ranking: (ranking > 0).then_some(ranking),
        acceptance_rate: rate(data.get("acceptanceRate")),
        badges,
    }
}

fn has_key(data: &Value, key: &str) -> bool {
    data.as_object().is_some_and(|object| object.contains_key(key))
}

/// Loose truthiness: null, false, 0, "" and NaN count as absent
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_name(data: &Value, key: &str, fallback: &str) -> String {
    data.get(key)
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Non-negative count; anything unusable becomes 0
fn count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f > 0.0)
                    .map(|f| f.round() as u64)
            })
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

fn rate(value: Option<&Value>) -> f64 {
    let rate = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if rate.is_finite() {
        rate
    } else {
        0.0
    }
}

fn badges(data: &Value) -> Vec<Badge> {
    data.get("badges")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let object = item.as_object()?;
                    let text = |keys: &[&str]| {
                        keys.iter()
                            .find_map(|k| object.get(*k).and_then(Value::as_str))
                            .unwrap_or_default()
                            .to_string()
                    };
                    Some(Badge::new(text(&["name", "displayName"]), text(&["icon"])))
                })
                .collect()
        })
        .unwrap_or_default()
}
