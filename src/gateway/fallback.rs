//! Fixed synthetic payloads served when the backend is unreachable ("demo mode").
//!
//! Every function returns the same value on every call, so a fallback result
//! can be compared for equality.

use super::types::{
    ConfigDocument, HistoryPoint, Protocol, QueryLogEntry, QueryStatus, Stats, TopDomain,
    UpstreamServer, UpstreamStatus,
};

pub const CONFIG_YAML: &str = r#"log:
  level: info
  file: "/var/log/mosdns.log"

plugins:
  - tag: main_sequence
    type: sequence
    args:
      - exec: $primary_dns
      - exec: query_summary

  - tag: primary_dns
    type: forward
    args:
      upstream:
        - addr: 1.1.1.1
        - addr: 8.8.8.8"#;

pub fn stats() -> Stats {
    Stats {
        total_queries: 1_245_672,
        avg_latency: 14.0,
        cache_hit_rate: 64.2,
        active_clients: 42,
    }
}

/// 24 hourly buckets, `"0:00"` to `"23:00"`.
pub fn history() -> Vec<HistoryPoint> {
    (0..24u64)
        .map(|hour| HistoryPoint {
            time: format!("{}:00", hour),
            queries: 100 + (hour * 173) % 500,
            cache_hits: 50 + (hour * 97) % 300,
        })
        .collect()
}

pub fn top_domains() -> Vec<TopDomain> {
    [
        ("google.com", 45_210, 85.0),
        ("github.com", 12_402, 62.0),
        ("api.slack.com", 8_901, 45.0),
        ("netflix.com", 7_522, 38.0),
        ("openai.com", 6_100, 25.0),
    ]
    .into_iter()
    .map(|(domain, count, pct)| TopDomain {
        domain: domain.to_string(),
        count,
        pct,
    })
    .collect()
}

pub fn upstreams() -> Vec<UpstreamServer> {
    let upstream = |id: &str, name: &str, address: &str, protocol, status, latency_ms, total_requests| {
        UpstreamServer {
            id: id.to_string(),
            name: name.to_string(),
            address: address.to_string(),
            protocol,
            status,
            latency_ms,
            total_requests,
        }
    };

    vec![
        upstream("1", "Google DNS", "8.8.8.8", Protocol::Https, UpstreamStatus::Online, 12.4, 45_021),
        upstream("2", "Cloudflare", "1.1.1.1", Protocol::Tls, UpstreamStatus::Online, 8.1, 89_012),
        upstream("3", "OpenDNS", "208.67.222.222", Protocol::Udp, UpstreamStatus::Degraded, 45.0, 1_205),
        upstream("4", "Local Cache", "127.0.0.1", Protocol::Udp, UpstreamStatus::Online, 0.2, 156_722),
    ]
}

/// Newest first.
pub fn logs() -> Vec<QueryLogEntry> {
    let entry = |timestamp: &str, domain: &str, record_type: &str, client: &str, upstream: &str, latency_ms, status| {
        QueryLogEntry {
            timestamp: timestamp.to_string(),
            domain: domain.to_string(),
            record_type: record_type.to_string(),
            client_address: client.to_string(),
            upstream_name: upstream.to_string(),
            latency_ms,
            status,
        }
    };

    vec![
        entry("2024-05-20 10:45:18", "github.com", "AAAA", "192.168.1.5", "Google DNS", 15.0, QueryStatus::NoError),
        entry("2024-05-20 10:45:14", "ads.tracking.com", "A", "192.168.1.12", "Adblock-Plugin", 0.7, QueryStatus::NxDomain),
        entry("2024-05-20 10:45:12", "google.com", "A", "192.168.1.5", "Cloudflare", 9.0, QueryStatus::NoError),
    ]
}

pub fn config() -> ConfigDocument {
    ConfigDocument {
        yaml: CONFIG_YAML.to_string(),
    }
}
