//! UI-facing state assembled from gateway reads.

use super::view::ViewKind;
use crate::gateway::{HistoryPoint, QueryLogEntry, Stats, TopDomain, UpstreamServer};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Whether the primary reads are coming from a live backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionMode {
    Online,
    DemoMode,
}

impl std::fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionMode::Online => f.write_str("Online"),
            ConnectionMode::DemoMode => f.write_str("Demo Mode"),
        }
    }
}

/// Everything a presentation layer renders.
///
/// Each field is replaced wholesale by the most recently completed read that
/// targets it; cycles may complete out of order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardState {
    pub active_view: ViewKind,
    pub stats: Option<Stats>,
    /// `is_real` of the latest completed stats read
    pub is_real_connection: bool,
    pub history: Vec<HistoryPoint>,
    pub top_domains: Vec<TopDomain>,
    pub upstreams: Vec<UpstreamServer>,
    /// Bounded most-recent window, newest first
    pub logs: Vec<QueryLogEntry>,
    /// Config text: as fetched, or the operator's in-progress edit
    pub config_yaml: Option<String>,
    pub cycles_in_flight: usize,
    pub last_cycle_completed_at: Option<DateTime<Utc>>,
}

impl DashboardState {
    pub fn mode(&self) -> ConnectionMode {
        if self.is_real_connection {
            ConnectionMode::Online
        } else {
            ConnectionMode::DemoMode
        }
    }

    pub fn is_loading(&self) -> bool {
        self.cycles_in_flight > 0
    }

    pub fn config_loaded(&self) -> bool {
        self.config_yaml.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_demo_mode() {
        let state = DashboardState::default();
        assert_eq!(state.mode(), ConnectionMode::DemoMode);
        assert!(!state.is_loading());
        assert!(!state.config_loaded());
        assert_eq!(state.active_view, ViewKind::Dashboard);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(ConnectionMode::Online.to_string(), "Online");
        assert_eq!(ConnectionMode::DemoMode.to_string(), "Demo Mode");
    }
}
