//! Wire types for the backend HTTP façade.

use serde::{Deserialize, Deserializer, Serialize};

/// Aggregate traffic counters from `GET /api/v1/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_queries: u64,
    /// Milliseconds
    pub avg_latency: f64,
    /// Percent, 0-100
    pub cache_hit_rate: f64,
    pub active_clients: u64,
}

/// One bucket of the 24h series from `GET /api/v1/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    /// Bucket label, e.g. `"13:00"`
    pub time: String,
    pub queries: u64,
    pub cache_hits: u64,
}

/// One row of `GET /api/v1/top_domains`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopDomain {
    pub domain: String,
    #[serde(deserialize_with = "count_from_number_or_string")]
    pub count: u64,
    /// Share of the busiest domain, percent
    pub pct: f64,
}

/// Transport used to reach an upstream resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Udp,
    Tcp,
    Tls,
    Https,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Protocol::Udp => "udp",
            Protocol::Tcp => "tcp",
            Protocol::Tls => "tls",
            Protocol::Https => "https",
        };
        f.write_str(s)
    }
}

/// Reachability of an upstream as reported by the forwarder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamStatus {
    Online,
    Degraded,
    Offline,
}

impl std::fmt::Display for UpstreamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UpstreamStatus::Online => "online",
            UpstreamStatus::Degraded => "degraded",
            UpstreamStatus::Offline => "offline",
        };
        f.write_str(s)
    }
}

/// An upstream resolver, from `GET /api/v1/upstreams`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamServer {
    pub id: String,
    pub name: String,
    pub address: String,
    pub protocol: Protocol,
    pub status: UpstreamStatus,
    /// Milliseconds; fractional values are common
    #[serde(rename = "latency", alias = "latencyMs")]
    pub latency_ms: f64,
    #[serde(rename = "requests", alias = "totalRequests")]
    pub total_requests: u64,
}

/// DNS response code recorded for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryStatus {
    #[serde(rename = "NOERROR")]
    NoError,
    #[serde(rename = "NXDOMAIN")]
    NxDomain,
    #[serde(rename = "SERVFAIL")]
    ServFail,
}

impl std::fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            QueryStatus::NoError => "NOERROR",
            QueryStatus::NxDomain => "NXDOMAIN",
            QueryStatus::ServFail => "SERVFAIL",
        };
        f.write_str(s)
    }
}

/// One forwarded query, from `GET /api/v1/logs` (newest first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub timestamp: String,
    pub domain: String,
    #[serde(rename = "type", alias = "recordType")]
    pub record_type: String,
    #[serde(rename = "client", alias = "clientAddress")]
    pub client_address: String,
    #[serde(rename = "upstream", alias = "upstreamName")]
    pub upstream_name: String,
    #[serde(rename = "latency", alias = "latencyMs")]
    pub latency_ms: f64,
    pub status: QueryStatus,
}

impl QueryLogEntry {
    /// Case-insensitive match on domain, client address or upstream name.
    ///
    /// An empty query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        [&self.domain, &self.client_address, &self.upstream_name]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Forwarder configuration as opaque YAML text, `{ "yaml": ... }` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub yaml: String,
}

/// Accepts `45210` as well as the display form `"45,210"`.
fn count_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u64),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Number(n) => Ok(n),
        Count::Text(s) => s
            .chars()
            .filter(|c| !matches!(c, ',' | '_' | ' '))
            .collect::<String>()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid count: {s}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stats_wire_names() {
        let stats: Stats = serde_json::from_value(json!({
            "totalQueries": 10, "avgLatency": 1.5, "cacheHitRate": 50.0, "activeClients": 3
        }))
        .unwrap();
        assert_eq!(stats.total_queries, 10);
        assert_eq!(stats.active_clients, 3);
    }

    #[test]
    fn test_top_domain_count_as_display_string() {
        let row: TopDomain =
            serde_json::from_value(json!({"domain": "google.com", "count": "45,210", "pct": 85}))
                .unwrap();
        assert_eq!(row.count, 45210);
        assert_eq!(row.pct, 85.0);
    }

    #[test]
    fn test_top_domain_count_rejects_garbage() {
        let row = serde_json::from_value::<TopDomain>(
            json!({"domain": "a", "count": "lots", "pct": 1}),
        );
        assert!(row.is_err());
    }

    #[test]
    fn test_upstream_accepts_both_field_spellings() {
        let short: UpstreamServer = serde_json::from_value(json!({
            "id": "1", "name": "Cloudflare", "address": "1.1.1.1", "protocol": "tls",
            "status": "online", "latency": 8, "requests": 100
        }))
        .unwrap();
        let long: UpstreamServer = serde_json::from_value(json!({
            "id": "1", "name": "Cloudflare", "address": "1.1.1.1", "protocol": "tls",
            "status": "online", "latencyMs": 8, "totalRequests": 100
        }))
        .unwrap();
        assert_eq!(short, long);
        assert_eq!(short.protocol, Protocol::Tls);
    }

    #[test]
    fn test_upstream_fractional_latency() {
        let upstreams: Vec<UpstreamServer> = serde_json::from_value(json!([{
            "id": "2", "name": "Cloudflare", "address": "1.1.1.1", "protocol": "tls",
            "status": "online", "latency": 8.4, "requests": 100
        }]))
        .unwrap();
        assert_eq!(upstreams[0].latency_ms, 8.4);

        let back = serde_json::to_value(&upstreams[0]).unwrap();
        assert_eq!(back["latency"], 8.4);
    }

    #[test]
    fn test_upstream_rejects_unknown_protocol() {
        let result = serde_json::from_value::<UpstreamServer>(json!({
            "id": "1", "name": "x", "address": "x", "protocol": "quic",
            "status": "online", "latency": 1, "requests": 1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_log_entry_wire_names() {
        let entry: QueryLogEntry = serde_json::from_value(json!({
            "timestamp": "2024-05-20 10:45:12", "domain": "google.com", "type": "A",
            "client": "192.168.1.5", "upstream": "Cloudflare", "latency": 9, "status": "NXDOMAIN"
        }))
        .unwrap();
        assert_eq!(entry.record_type, "A");
        assert_eq!(entry.status, QueryStatus::NxDomain);

        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["client"], "192.168.1.5");
        assert_eq!(back["status"], "NXDOMAIN");
    }

    #[test]
    fn test_log_entry_fractional_latency() {
        let entry: QueryLogEntry = serde_json::from_value(json!({
            "timestamp": "2024-05-20 10:45:14", "domain": "ads.tracking.com", "type": "A",
            "client": "192.168.1.12", "upstream": "Adblock-Plugin", "latencyMs": 0.7,
            "status": "NXDOMAIN"
        }))
        .unwrap();
        assert_eq!(entry.latency_ms, 0.7);
    }

    #[test]
    fn test_log_entry_matches() {
        let entry: QueryLogEntry = serde_json::from_value(json!({
            "timestamp": "t", "domain": "GitHub.com", "type": "AAAA",
            "client": "192.168.1.5", "upstream": "Google DNS", "latency": 15, "status": "NOERROR"
        }))
        .unwrap();
        assert!(entry.matches("github"));
        assert!(entry.matches("192.168.1"));
        assert!(entry.matches("google dns"));
        assert!(entry.matches(""));
        assert!(!entry.matches("netflix"));
    }
}
