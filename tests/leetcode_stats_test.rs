use mockito::ServerGuard;
use serde_json::json;
use showcase::config::HttpConfig;
use showcase::http::{GuardedClient, RequestGuard};
use showcase::leetcode::{Badge, LeetCodeConfig, StatsAggregator};

const USER: &str = "octocat";

fn aggregator(server: &ServerGuard) -> StatsAggregator {
    let http = GuardedClient::new(&HttpConfig {
        guard: RequestGuard::new(["127.0.0.1"]).allow_insecure_transport(),
        ..HttpConfig::default()
    })
    .unwrap();

    let config = LeetCodeConfig {
        username: USER.to_string(),
        stats_api_url: format!("{}/a", server.url()),
        alfa_api_url: format!("{}/b", server.url()),
        faisal_api_url: format!("{}/c", server.url()),
    };
    StatsAggregator::new(http, &config)
}

#[tokio::test]
async fn test_first_provider_wins() {
    let mut server = mockito::Server::new_async().await;

    let a = server
        .mock("GET", "/a/octocat")
        .with_status(200)
        .with_body(
            json!({
                "status": "success",
                "totalSolved": 310,
                "easySolved": 150,
                "mediumSolved": 130,
                "hardSolved": 30,
                "acceptanceRate": 58.2,
                "ranking": 120000
            })
            .to_string(),
        )
        .create_async()
        .await;
    let b = server.mock("GET", "/b/octocat").expect(0).create_async().await;
    let c = server.mock("GET", "/c/octocat").expect(0).create_async().await;

    let record = aggregator(&server).fetch_stats(USER).await;

    a.assert_async().await;
    b.assert_async().await;
    c.assert_async().await;
    assert_eq!(record.username, USER);
    assert_eq!(record.total_solved, 310);
    assert_eq!(record.ranking, Some(120000));
    assert!(record.badges.is_empty());
}

#[tokio::test]
async fn test_falls_back_to_second_provider() {
    let mut server = mockito::Server::new_async().await;

    let a = server
        .mock("GET", "/a/octocat")
        .with_status(502)
        .expect(1)
        .create_async()
        .await;
    let b = server
        .mock("GET", "/b/octocat")
        .with_status(200)
        .with_body(
            json!({
                "username": "The Octocat",
                "totalSolved": 80,
                "easySolved": 50,
                "mediumSolved": 25,
                "hardSolved": 5,
                "badges": [{"name": "Guardian", "icon": "🛡️"}]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let c = server.mock("GET", "/c/octocat").expect(0).create_async().await;

    let record = aggregator(&server).fetch_stats(USER).await;

    a.assert_async().await;
    b.assert_async().await;
    c.assert_async().await;
    assert_eq!(record.username, "The Octocat");
    assert_eq!(record.total_solved, 80);
    assert_eq!(record.hard_solved, 5);
    assert_eq!(record.ranking, None);
    assert_eq!(record.acceptance_rate, 0.0);
    assert_eq!(record.badges, vec![Badge::new("Guardian", "🛡️")]);
}

#[tokio::test]
async fn test_unrecognized_shapes_move_down_the_chain() {
    let mut server = mockito::Server::new_async().await;

    // Success status but no success indicator
    let _a = server
        .mock("GET", "/a/octocat")
        .with_status(200)
        .with_body(r#"{"status": "error", "message": "user does not exist"}"#)
        .create_async()
        .await;
    let _b = server
        .mock("GET", "/b/octocat")
        .with_status(200)
        .with_body(r#"{"error": "User not found"}"#)
        .create_async()
        .await;
    let c = server
        .mock("GET", "/c/octocat")
        .with_status(200)
        .with_body(r#"{"totalSolved": 12, "easySolved": 12}"#)
        .expect(1)
        .create_async()
        .await;

    let record = aggregator(&server).fetch_stats(USER).await;

    c.assert_async().await;
    assert_eq!(record.total_solved, 12);
    assert_eq!(record.easy_solved, 12);
    assert_eq!(record.username, USER);
}

#[tokio::test]
async fn test_all_providers_failing_yields_fallback() {
    let mut server = mockito::Server::new_async().await;

    let a = server
        .mock("GET", "/a/octocat")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;
    let b = server
        .mock("GET", "/b/octocat")
        .with_status(200)
        .with_body("<html>Application error</html>")
        .expect(1)
        .create_async()
        .await;
    let c = server
        .mock("GET", "/c/octocat")
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let record = aggregator(&server).fetch_stats(USER).await;

    a.assert_async().await;
    b.assert_async().await;
    c.assert_async().await;
    assert_eq!(record.total_solved, 45);
    assert_eq!(record.easy_solved, 25);
    assert_eq!(record.medium_solved, 15);
    assert_eq!(record.hard_solved, 5);
    assert_eq!(record.acceptance_rate, 75.0);
    assert_eq!(record.badges.len(), 2);
    assert_eq!(record.username, USER);
}

#[tokio::test]
async fn test_blocked_providers_yield_fallback() {
    let mut server = mockito::Server::new_async().await;
    let any = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    // Production guard refuses the loopback test server
    let http = GuardedClient::new(&HttpConfig::default()).unwrap();
    let config = LeetCodeConfig {
        username: USER.to_string(),
        stats_api_url: format!("{}/a", server.url()),
        alfa_api_url: format!("{}/b", server.url()),
        faisal_api_url: format!("{}/c", server.url()),
    };
    let record = StatsAggregator::new(http, &config).fetch_stats(USER).await;

    any.assert_async().await;
    assert_eq!(record.total_solved, 45);
}
