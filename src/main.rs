use clap::Parser;
use showcase::{
    api::{create_router, AppState},
    cli::{commands, Cli, Commands},
    config::Settings,
    github::{GitHubClient, RepositoryAggregator},
    http::GuardedClient,
    leetcode::StatsAggregator,
    Error, Result,
};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Configuration decides the default log verbosity, so it loads first
    let settings = Settings::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.environment.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    settings.validate()?;

    match cli.command {
        Commands::Serve { port, host } => serve(settings, port, host).await?,
        Commands::Projects { username, json } => {
            commands::projects(&settings, username, json).await?
        }
        Commands::Leetcode { username, json } => {
            commands::leetcode(&settings, username, json).await?
        }
        Commands::CheckUrl { url } => commands::check_url(&settings, &url)?,
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!(
        "Starting Showcase API ({:?} environment)",
        settings.environment
    );
    info!("GitHub user: {}", settings.github.username);
    info!("LeetCode user: {}", settings.leetcode.username);

    let http = GuardedClient::new(&settings.http)?;
    let repositories =
        RepositoryAggregator::new(GitHubClient::new(http.clone(), settings.github.clone()));
    let stats = StatsAggregator::new(http, &settings.leetcode);
    info!("Stats providers: {}", stats.provider_names().join(" -> "));

    let state = AppState {
        repositories,
        stats,
        settings: settings.clone(),
    };
    let app = create_router(state, &settings);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Showcase API");
    println!("========================================");
    println!("Address: http://{addr}");
    println!("\nEndpoints:");
    println!("  GET  /health");
    println!("  GET  /api/projects");
    println!("  GET  /api/leetcode");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}
