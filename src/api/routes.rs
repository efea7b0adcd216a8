use axum::extract::ConnectInfo;
use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Router};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use tower_governor::key_extractor::KeyExtractor;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

#[cfg(not(test))]
use {
    std::sync::Arc,
    tower_governor::{governor::GovernorConfigBuilder, GovernorLayer},
    tracing::warn,
};

use crate::api::handlers::{self as api_handlers, AppState};
use crate::config::Settings;

/// Rate-limit key: the peer IP from `ConnectInfo`
#[derive(Clone, Copy, Debug)]
struct FallbackIpKeyExtractor;

impl KeyExtractor for FallbackIpKeyExtractor {
    type Key = IpAddr;

    fn extract<B>(
        &self,
        req: &axum::http::Request<B>,
    ) -> Result<Self::Key, tower_governor::GovernorError> {
        if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
            return Ok(addr.ip());
        }

        // Only reached when the server is not started with
        // `into_make_service_with_connect_info`; all such requests
        // then share a single bucket.
        Ok(IpAddr::V4(Ipv4Addr::LOCALHOST))
    }
}

/// Create the router with all endpoints
#[cfg_attr(test, allow(unused_variables))]
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    // Public API routes - read-only, no authentication required
    #[cfg_attr(test, allow(unused_mut))]
    let mut api_routes = Router::new()
        .route("/projects", get(api_handlers::get_projects))
        .route("/leetcode", get(api_handlers::get_leetcode))
        .with_state(state);

    // Every API call fans out to third-party services, so throttle per client.
    // Disabled in tests, where requests carry no peer address.
    #[cfg(not(test))]
    {
        let governor_conf = GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_second(settings.server.api_rate_limit)
            .burst_size(settings.server.api_rate_limit as u32 * 2)
            .finish();

        match governor_conf {
            Some(config) => {
                api_routes = api_routes.layer(GovernorLayer {
                    config: Arc::new(config),
                });
            }
            None => warn!("Invalid rate limit configuration, API rate limiting disabled"),
        }
    }

    let api_routes = api_routes;

    let health_routes = Router::new().route("/health", get(api_handlers::health_check));

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            // CORS - the portfolio page may be hosted anywhere
            CorsLayer::new()
                .allow_methods([Method::GET, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .allow_origin(tower_http::cors::Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=300"),
        ))
        .layer(TraceLayer::new_for_http())
}
