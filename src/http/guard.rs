// Outbound request allow-list
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::warn;
use url::Url;

/// Hosts the portfolio is allowed to talk to
pub const DEFAULT_ALLOWED_HOSTS: &[&str] = &[
    "api.github.com",
    "raw.githubusercontent.com",
    "leetcode-stats-api.herokuapp.com",
    "alfa-leetcode-api.onrender.com",
    "leetcode-api-faisalshohag.vercel.app",
    "fonts.googleapis.com",
    "fonts.gstatic.com",
];

/// Checks every outbound URL against a fixed host allow-list.
///
/// A URL passes when it parses, uses `https`, and its host exactly matches
/// one of the allowed hosts. Ports are not considered.
#[derive(Debug, Clone)]
pub struct RequestGuard {
    allowed_hosts: Arc<[String]>,
    allow_insecure_transport: bool,
}

impl Default for RequestGuard {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_HOSTS.iter().copied())
    }
}

impl RequestGuard {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_hosts: hosts
                .into_iter()
                .map(|h| Into::<String>::into(h).to_lowercase())
                .collect(),
            allow_insecure_transport: false,
        }
    }

    /// Also accept plain `http`. Only meant for loopback test servers.
    pub fn allow_insecure_transport(mut self) -> Self {
        self.allow_insecure_transport = true;
        self
    }

    pub fn allowed_hosts(&self) -> &[String] {
        &self.allowed_hosts
    }

    /// True iff a request to `url` may be issued
    pub fn is_allowed(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => self.is_allowed_url(&parsed),
            Err(_) => false,
        }
    }

    pub fn is_allowed_url(&self, url: &Url) -> bool {
        let scheme_ok = match url.scheme() {
            "https" => true,
            "http" => self.allow_insecure_transport,
            _ => false,
        };

        scheme_ok
            && url
                .host_str()
                .is_some_and(|host| self.allowed_hosts.iter().any(|allowed| allowed == host))
    }

    /// Parse and check a URL, returning `BlockedHost` when it is refused
    pub fn check(&self, url: &str) -> Result<Url> {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Security: Blocked unparseable URL {}: {}", url, e);
                return Err(Error::BlockedHost(url.to_string()));
            }
        };

        if !self.is_allowed_url(&parsed) {
            warn!(
                "Security: Blocked request to {} (scheme: {}, host: {})",
                url,
                parsed.scheme(),
                parsed.host_str().unwrap_or("<none>")
            );
            return Err(Error::BlockedHost(url.to_string()));
        }

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allow_list() {
        let guard = RequestGuard::default();

        assert!(guard.is_allowed("https://api.github.com/users/octocat"));
        assert!(guard.is_allowed("https://raw.githubusercontent.com/a/b/main/README.md"));
        assert!(guard.is_allowed("https://leetcode-stats-api.herokuapp.com/someone"));
        assert!(guard.is_allowed("https://alfa-leetcode-api.onrender.com/someone"));
        assert!(guard.is_allowed("https://leetcode-api-faisalshohag.vercel.app/someone"));
        assert!(guard.is_allowed("https://fonts.googleapis.com/css2?family=Inter"));
        assert!(guard.is_allowed("https://fonts.gstatic.com/s/inter.woff2"));
    }

    #[test]
    fn test_rejects_insecure_scheme() {
        let guard = RequestGuard::default();

        assert!(!guard.is_allowed("http://api.github.com/users/octocat"));
        assert!(!guard.is_allowed("ftp://api.github.com/"));
        assert!(!guard.is_allowed("wss://api.github.com/"));
    }

    #[test]
    fn test_rejects_unlisted_and_lookalike_hosts() {
        let guard = RequestGuard::default();

        assert!(!guard.is_allowed("https://example.com/"));
        assert!(!guard.is_allowed("https://evil-api.github.com/"));
        assert!(!guard.is_allowed("https://api.github.com.evil.io/"));
        assert!(!guard.is_allowed("https://github.com/"));
        assert!(!guard.is_allowed("not-a-url"));
        assert!(!guard.is_allowed(""));
    }

    #[test]
    fn test_host_match_ignores_case_and_port() {
        let guard = RequestGuard::default();

        assert!(guard.is_allowed("https://API.GitHub.com/users/octocat"));
        assert!(guard.is_allowed("https://api.github.com:8443/users/octocat"));
    }

    #[test]
    fn test_userinfo_does_not_spoof_host() {
        let guard = RequestGuard::default();

        assert!(!guard.is_allowed("https://api.github.com@evil.io/"));
        assert!(guard.is_allowed("https://evil.io@api.github.com/"));
    }

    #[test]
    fn test_insecure_transport_opt_in() {
        let guard = RequestGuard::new(["127.0.0.1"]);
        assert!(!guard.is_allowed("http://127.0.0.1:1234/users/x"));

        let guard = guard.allow_insecure_transport();
        assert!(guard.is_allowed("http://127.0.0.1:1234/users/x"));
        assert!(guard.is_allowed("https://127.0.0.1/users/x"));
        assert!(!guard.is_allowed("http://localhost:1234/users/x"));
    }

    #[test]
    fn test_check_reports_blocked_host() {
        let guard = RequestGuard::default();

        match guard.check("https://example.com/") {
            Err(Error::BlockedHost(url)) => assert_eq!(url, "https://example.com/"),
            other => panic!("expected BlockedHost, got {other:?}"),
        }
        assert!(guard.check("https://api.github.com/").is_ok());
    }
}
