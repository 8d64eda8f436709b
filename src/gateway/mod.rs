//! Typed endpoint catalog for the forwarder's JSON/HTTP façade.
//!
//! Each read binds [`ResilientFetch::call`] to one path and one fixed
//! fallback payload from [`fallback`]. The two write-ish operations,
//! [`DashboardSource::save_config`] and [`DashboardSource::check_health`],
//! answer with a plain `bool`.

pub mod fallback;
mod types;

pub use types::*;

use crate::fetch::{
    FetchResult, ResilientFetch, DEFAULT_HEALTH_TIMEOUT, DEFAULT_READ_TIMEOUT,
    DEFAULT_WRITE_TIMEOUT,
};
use crate::settings::ConnectionSettings;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub const STATS_PATH: &str = "/api/v1/stats";
pub const HISTORY_PATH: &str = "/api/v1/history";
pub const TOP_DOMAINS_PATH: &str = "/api/v1/top_domains";
pub const UPSTREAMS_PATH: &str = "/api/v1/upstreams";
pub const LOGS_PATH: &str = "/api/v1/logs";
pub const CONFIG_PATH: &str = "/api/v1/config";
pub const HEALTH_PATH: &str = "/health";

/// Everything the view orchestrator needs from a backend.
///
/// Implemented by [`BackendGateway`] over HTTP; tests substitute in-memory
/// sources. None of these methods fail: reads fall back, writes return `false`.
#[async_trait]
pub trait DashboardSource: Send + Sync + 'static {
    async fn stats(&self) -> FetchResult<Stats>;

    async fn history(&self) -> FetchResult<Vec<HistoryPoint>>;

    async fn top_domains(&self) -> FetchResult<Vec<TopDomain>>;

    async fn upstreams(&self) -> FetchResult<Vec<UpstreamServer>>;

    async fn logs(&self) -> FetchResult<Vec<QueryLogEntry>>;

    async fn config(&self) -> FetchResult<ConfigDocument>;

    /// `true` only when the backend acknowledged the write with a 2xx.
    async fn save_config(&self, yaml: &str) -> bool;

    /// Lightweight reachability probe, not part of the polling set.
    async fn check_health(&self) -> bool;
}

/// Deadlines applied by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatewayTimeouts {
    pub read: Duration,
    pub health: Duration,
    pub write: Duration,
}

impl Default for GatewayTimeouts {
    fn default() -> Self {
        Self {
            read: DEFAULT_READ_TIMEOUT,
            health: DEFAULT_HEALTH_TIMEOUT,
            write: DEFAULT_WRITE_TIMEOUT,
        }
    }
}

/// HTTP implementation of [`DashboardSource`].
#[derive(Debug, Clone)]
pub struct BackendGateway {
    fetch: ResilientFetch,
    timeouts: GatewayTimeouts,
}

impl BackendGateway {
    pub fn new(settings: Arc<ConnectionSettings>) -> Self {
        Self::with_fetch(ResilientFetch::new(settings), GatewayTimeouts::default())
    }

    pub fn with_fetch(fetch: ResilientFetch, timeouts: GatewayTimeouts) -> Self {
        Self { fetch, timeouts }
    }

    pub fn with_timeouts(mut self, timeouts: GatewayTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn settings(&self) -> &Arc<ConnectionSettings> {
        self.fetch.settings()
    }
}

#[async_trait]
impl DashboardSource for BackendGateway {
    async fn stats(&self) -> FetchResult<Stats> {
        self.fetch
            .call(STATS_PATH, fallback::stats(), self.timeouts.read)
            .await
    }

    async fn history(&self) -> FetchResult<Vec<HistoryPoint>> {
        self.fetch
            .call(HISTORY_PATH, fallback::history(), self.timeouts.read)
            .await
    }

    async fn top_domains(&self) -> FetchResult<Vec<TopDomain>> {
        self.fetch
            .call(TOP_DOMAINS_PATH, fallback::top_domains(), self.timeouts.read)
            .await
    }

    async fn upstreams(&self) -> FetchResult<Vec<UpstreamServer>> {
        self.fetch
            .call(UPSTREAMS_PATH, fallback::upstreams(), self.timeouts.read)
            .await
    }

    async fn logs(&self) -> FetchResult<Vec<QueryLogEntry>> {
        self.fetch
            .call(LOGS_PATH, fallback::logs(), self.timeouts.read)
            .await
    }

    async fn config(&self) -> FetchResult<ConfigDocument> {
        self.fetch
            .call(CONFIG_PATH, fallback::config(), self.timeouts.read)
            .await
    }

    async fn save_config(&self, yaml: &str) -> bool {
        let body = ConfigDocument {
            yaml: yaml.to_string(),
        };
        match self
            .fetch
            .try_post(CONFIG_PATH, &body, self.timeouts.write)
            .await
        {
            Ok(()) => {
                tracing::info!(bytes = yaml.len(), "Config saved to backend");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save config");
                false
            }
        }
    }

    async fn check_health(&self) -> bool {
        self.fetch
            .probe(HEALTH_PATH, self.timeouts.health)
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        let timeouts = GatewayTimeouts::default();
        assert_eq!(timeouts.read, Duration::from_millis(2000));
        assert_eq!(timeouts.health, Duration::from_millis(1000));
        assert!(timeouts.health < timeouts.read);
    }

    #[tokio::test]
    async fn test_unreachable_backend_serves_every_fallback() {
        let settings = Arc::new(ConnectionSettings::in_memory());
        settings.set("http://127.0.0.1:9", "Offline");
        let gateway = BackendGateway::new(settings).with_timeouts(GatewayTimeouts {
            read: Duration::from_millis(300),
            health: Duration::from_millis(300),
            write: Duration::from_millis(300),
        });

        assert_eq!(gateway.stats().await, FetchResult::fallback(fallback::stats()));
        assert_eq!(gateway.history().await, FetchResult::fallback(fallback::history()));
        assert_eq!(
            gateway.top_domains().await,
            FetchResult::fallback(fallback::top_domains())
        );
        assert_eq!(
            gateway.upstreams().await,
            FetchResult::fallback(fallback::upstreams())
        );
        assert_eq!(gateway.logs().await, FetchResult::fallback(fallback::logs()));
        assert_eq!(gateway.config().await, FetchResult::fallback(fallback::config()));
        assert!(!gateway.save_config("log: {}").await);
        assert!(!gateway.check_health().await);
    }
}
