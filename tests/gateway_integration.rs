//! BackendGateway against a mock HTTP backend.

mod common;

use common::{gateway_for, live_stats, mount_live_backend};
use mosdash::gateway::{
    fallback, DashboardSource, Protocol, QueryStatus, CONFIG_PATH, HEALTH_PATH, STATS_PATH,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_live_reads_are_real() {
    let server = MockServer::start().await;
    mount_live_backend(&server).await;
    let gateway = gateway_for(&server);

    let stats = gateway.stats().await;
    assert!(stats.is_real);
    assert_eq!(stats.data.total_queries, 500);
    assert_eq!(stats.data.active_clients, 7);

    let top = gateway.top_domains().await;
    assert!(top.is_real);
    assert_eq!(top.data[0].count, 1024);

    let upstreams = gateway.upstreams().await;
    assert!(upstreams.is_real);
    assert_eq!(upstreams.data[0].protocol, Protocol::Tls);
    assert_eq!(upstreams.data[0].latency_ms, 11.5);
    assert_eq!(upstreams.data[0].total_requests, 300);

    let logs = gateway.logs().await;
    assert!(logs.is_real);
    assert_eq!(logs.data.len(), 2);
    assert_eq!(logs.data[0].status, QueryStatus::NoError);
    assert_eq!(logs.data[0].latency_ms, 0.7);

    let config = gateway.config().await;
    assert!(config.is_real);
    assert_eq!(config.data.yaml, "log:\n  level: warn\n");
}

#[tokio::test]
async fn test_requests_send_json_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATS_PATH))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_stats()))
        .expect(1)
        .mount(&server)
        .await;

    assert!(gateway_for(&server).stats().await.is_real);
}

#[tokio::test]
async fn test_server_error_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATS_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let stats = gateway_for(&server).stats().await;
    assert!(!stats.is_real);
    assert_eq!(stats.data, fallback::stats());
}

#[tokio::test]
async fn test_malformed_body_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let stats = gateway_for(&server).stats().await;
    assert!(!stats.is_real);
    assert_eq!(stats.data, fallback::stats());
}

#[tokio::test]
async fn test_slow_response_past_deadline_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(live_stats())
                .set_delay(Duration::from_millis(1500)),
        )
        .mount(&server)
        .await;

    let start = std::time::Instant::now();
    let stats = gateway_for(&server).stats().await;

    assert!(!stats.is_real);
    assert_eq!(stats.data, fallback::stats());
    assert!(start.elapsed() < Duration::from_millis(1200));
}

#[tokio::test]
async fn test_slow_response_within_deadline_is_real() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(live_stats())
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    assert!(gateway_for(&server).stats().await.is_real);
}

#[tokio::test]
async fn test_save_config_posts_yaml() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CONFIG_PATH))
        .and(body_json(json!({"yaml": "plugins: []"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert!(gateway_for(&server).save_config("plugins: []").await);
}

#[tokio::test]
async fn test_save_config_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CONFIG_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(!gateway_for(&server).save_config("plugins: []").await);
}

#[tokio::test]
async fn test_health_probe() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HEALTH_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    assert!(gateway_for(&server).check_health().await);

    let down = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HEALTH_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&down)
        .await;
    assert!(!gateway_for(&down).check_health().await);
}

#[tokio::test]
async fn test_settings_change_applies_to_next_call() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(STATS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_stats()))
        .expect(1)
        .mount(&first)
        .await;
    Mock::given(method("GET"))
        .and(path(STATS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalQueries": 9, "avgLatency": 1.0, "cacheHitRate": 0.0, "activeClients": 1
        })))
        .expect(1)
        .mount(&second)
        .await;

    let gateway = gateway_for(&first);
    assert_eq!(gateway.stats().await.data.total_queries, 500);

    gateway
        .settings()
        .set(&format!("{}/", second.uri()), "Second");
    assert_eq!(gateway.stats().await.data.total_queries, 9);
}
