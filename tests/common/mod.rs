//! Shared helpers for integration tests against a wiremock backend.

#![allow(dead_code)]

use mosdash::gateway::{
    BackendGateway, GatewayTimeouts, CONFIG_PATH, HEALTH_PATH, HISTORY_PATH, LOGS_PATH,
    STATS_PATH, TOP_DOMAINS_PATH, UPSTREAMS_PATH,
};
use mosdash::settings::{ConnectionSettings, MemorySettingsStore};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn live_stats() -> Value {
    json!({"totalQueries": 500, "avgLatency": 3.5, "cacheHitRate": 90.0, "activeClients": 7})
}

pub fn live_logs(count: usize) -> Value {
    let entries: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "timestamp": format!("2024-06-01 12:00:{:02}", 59 - (i % 60)),
                "domain": format!("host{}.example.net", i),
                "type": "A",
                "client": "10.0.0.8",
                "upstream": "Quad9",
                "latency": 0.7,
                "status": "NOERROR",
            })
        })
        .collect();
    Value::Array(entries)
}

/// Settings pointing at `server`, kept in memory.
pub fn settings_for(server: &MockServer) -> Arc<ConnectionSettings> {
    Arc::new(ConnectionSettings::init(MemorySettingsStore::with_values(
        &server.uri(),
        "Test Forwarder",
    )))
}

pub fn short_timeouts() -> GatewayTimeouts {
    GatewayTimeouts {
        read: Duration::from_millis(300),
        health: Duration::from_millis(300),
        write: Duration::from_millis(300),
    }
}

pub fn gateway_for(server: &MockServer) -> BackendGateway {
    BackendGateway::new(settings_for(server)).with_timeouts(short_timeouts())
}

/// Serve distinguishable live payloads on every read endpoint.
pub async fn mount_live_backend(server: &MockServer) {
    let routes = [
        (STATS_PATH, live_stats()),
        (
            HISTORY_PATH,
            json!([{"time": "0:00", "queries": 1, "cacheHits": 1}]),
        ),
        (
            TOP_DOMAINS_PATH,
            json!([{"domain": "example.net", "count": "1,024", "pct": 12.5}]),
        ),
        (
            UPSTREAMS_PATH,
            json!([{
                "id": "q9",
                "name": "Quad9",
                "address": "9.9.9.9",
                "protocol": "tls",
                "status": "online",
                "latency": 11.5,
                "requests": 300
            }]),
        ),
        (LOGS_PATH, live_logs(2)),
        (CONFIG_PATH, json!({"yaml": "log:\n  level: warn\n"})),
    ];

    for (route, body) in routes {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path(HEALTH_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}
