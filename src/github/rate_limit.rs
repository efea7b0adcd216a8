use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use tracing::{debug, warn};

/// Quota snapshot reported by the GitHub API on every response.
///
/// Unauthenticated requests share one hourly quota; once it is spent every
/// call is rejected until `reset_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
}

impl RateLimitStatus {
    /// Read `x-ratelimit-*` headers; `None` when `x-ratelimit-remaining` is absent
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let remaining = header_value(headers, "x-ratelimit-remaining")?;
        let limit = header_value(headers, "x-ratelimit-limit").unwrap_or(remaining);
        let reset_at = header_value::<i64>(headers, "x-ratelimit-reset")
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .unwrap_or_else(Utc::now);

        Some(Self {
            limit,
            remaining,
            reset_at,
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

fn header_value<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

/// Log the quota carried by a GitHub response
pub fn record(headers: &HeaderMap) -> Option<RateLimitStatus> {
    let status = RateLimitStatus::from_headers(headers)?;

    if status.is_exhausted() {
        warn!(
            "GitHub API rate limit exhausted (0/{}), requests fail until {}",
            status.limit,
            status.reset_at.format("%H:%M:%S UTC")
        );
    } else {
        debug!(
            "GitHub rate limit: {}/{} (resets at {})",
            status.remaining, status.limit, status.reset_at
        );
    }

    Some(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_reads_rate_limit_headers() {
        let status = record(&headers(&[
            ("x-ratelimit-limit", "60"),
            ("x-ratelimit-remaining", "42"),
            ("x-ratelimit-reset", "1700000000"),
        ]))
        .unwrap();

        assert_eq!(status.limit, 60);
        assert_eq!(status.remaining, 42);
        assert_eq!(status.reset_at.timestamp(), 1_700_000_000);
        assert!(!status.is_exhausted());
    }

    #[test]
    fn test_exhausted_quota() {
        let status = record(&headers(&[
            ("x-ratelimit-limit", "60"),
            ("x-ratelimit-remaining", "0"),
            ("x-ratelimit-reset", "1700000000"),
        ]))
        .unwrap();

        assert!(status.is_exhausted());
    }

    #[test]
    fn test_missing_or_garbled_headers() {
        assert!(record(&HeaderMap::new()).is_none());
        assert!(record(&headers(&[("x-ratelimit-remaining", "lots")])).is_none());

        let status = record(&headers(&[("x-ratelimit-remaining", "5")])).unwrap();
        assert_eq!(status.limit, 5);
    }
}
