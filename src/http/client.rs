use crate::config::HttpConfig;
use crate::error::{Error, Result};
use crate::http::guard::RequestGuard;
use reqwest::{header, redirect, Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const MAX_REDIRECTS: usize = 10;

/// Caller-supplied request options, applied on top of the client defaults
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: header::HeaderMap,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn with_header(mut self, name: header::HeaderName, value: header::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP client that refuses to contact hosts outside the guard's allow-list.
///
/// Every outbound request in the crate goes through here. The client never
/// keeps cookies, never sends a `Referer`, and only follows redirects whose
/// targets pass the guard as well.
#[derive(Clone)]
pub struct GuardedClient {
    client: Client,
    guard: RequestGuard,
}

impl GuardedClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let redirect_guard = config.guard.clone();
        let redirect_policy = redirect::Policy::custom(move |attempt| {
            if attempt.previous().len() >= MAX_REDIRECTS {
                attempt.error("too many redirects")
            } else if redirect_guard.is_allowed_url(attempt.url()) {
                attempt.follow()
            } else {
                let blocked = attempt.url().to_string();
                attempt.error(Error::BlockedHost(blocked))
            }
        });

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .referer(false)
            .redirect(redirect_policy)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            guard: config.guard.clone(),
        })
    }

    pub fn guard(&self) -> &RequestGuard {
        &self.guard
    }

    /// Guarded GET. Fails with `BlockedHost` before any I/O when the URL is refused.
    pub async fn get(&self, url: &str, options: RequestOptions) -> Result<Response> {
        let url = self.guard.check(url)?;
        debug!("GET {}", url);

        let mut request = self.client.get(url).headers(options.headers);
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        Ok(request.send().await?)
    }

    /// Guarded GET that requires a 2xx status and returns the body as JSON
    pub async fn get_json<T>(&self, url: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.get(url, RequestOptions::default()).await?;
        Self::read_json(url, response).await
    }

    /// Require a 2xx status and decode the body of an already issued request
    pub async fn read_json<T>(url: &str, response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamRejected {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::MalformedResponse(format!("{url}: {e}")))
    }

    /// Guarded GET decoded into an untyped JSON value
    pub async fn get_value(&self, url: &str) -> Result<serde_json::Value> {
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loopback_config() -> HttpConfig {
        HttpConfig {
            guard: RequestGuard::new(["127.0.0.1"]).allow_insecure_transport(),
            ..HttpConfig::default()
        }
    }

    #[test]
    fn test_client_creation() {
        assert!(GuardedClient::new(&HttpConfig::default()).is_ok());
    }

    #[tokio::test]
    async fn test_blocked_host_issues_no_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users/someone")
            .with_status(200)
            .with_body("{}")
            .expect(0)
            .create_async()
            .await;

        // Default guard: loopback and plain http are both refused
        let client = GuardedClient::new(&HttpConfig::default()).unwrap();
        let result = client
            .get(
                &format!("{}/users/someone", server.url()),
                RequestOptions::default(),
            )
            .await;

        assert!(matches!(result, Err(Error::BlockedHost(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/data")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"value": 42}"#)
            .create_async()
            .await;

        let client = GuardedClient::new(&loopback_config()).unwrap();
        let value = client
            .get_value(&format!("{}/data", server.url()))
            .await
            .unwrap();

        assert_eq!(value["value"], 42);
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/data")
            .with_status(503)
            .create_async()
            .await;

        let client = GuardedClient::new(&loopback_config()).unwrap();
        let result = client.get_value(&format!("{}/data", server.url())).await;

        assert!(matches!(
            result,
            Err(Error::UpstreamRejected { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/data")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = GuardedClient::new(&loopback_config()).unwrap();
        let result = client.get_value(&format!("{}/data", server.url())).await;

        assert!(matches!(result, Err(Error::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_caller_headers_are_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/data")
            .match_header("x-request-source", "portfolio")
            .with_status(200)
            .create_async()
            .await;

        let client = GuardedClient::new(&loopback_config()).unwrap();
        let options = RequestOptions::default().with_header(
            header::HeaderName::from_static("x-request-source"),
            header::HeaderValue::from_static("portfolio"),
        );
        let response = client
            .get(&format!("{}/data", server.url()), options)
            .await
            .unwrap();

        assert!(response.status().is_success());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_per_request_timeout() {
        // The kernel completes the handshake; nobody ever answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = GuardedClient::new(&loopback_config()).unwrap();
        let options = RequestOptions::default().with_timeout(Duration::from_millis(200));
        let result = client.get(&format!("http://{addr}/slow"), options).await;

        match result {
            Err(Error::Transport(e)) => assert!(e.is_timeout()),
            other => panic!("expected a timeout, got {other:?}"),
        }
        drop(listener);
    }

    #[tokio::test]
    async fn test_redirect_to_unlisted_host_is_refused() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/moved")
            .with_status(302)
            .with_header("location", "https://example.com/elsewhere")
            .create_async()
            .await;

        let client = GuardedClient::new(&loopback_config()).unwrap();
        let result = client.get_value(&format!("{}/moved", server.url())).await;

        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
