//! Snapshot of console state handed to the advisor with a chat question.

use crate::gateway::{QueryLogEntry, Stats};
use crate::orchestrator::{DashboardState, ViewKind};
use serde::Serialize;

/// Recent log entries included by default.
pub const DEFAULT_CONTEXT_LOG_LIMIT: usize = 10;

/// What the assistant gets to see: current stats, the newest log entries and
/// the active screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorContext {
    pub system_stats: Option<Stats>,
    pub recent_logs: Vec<QueryLogEntry>,
    pub view: ViewKind,
}

impl AdvisorContext {
    pub fn from_state(state: &DashboardState, log_limit: usize) -> Self {
        Self {
            system_stats: state.stats.clone(),
            recent_logs: state.logs.iter().take(log_limit).cloned().collect(),
            view: state.active_view,
        }
    }

    /// Pretty JSON for embedding in a prompt.
    pub fn to_prompt_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::fallback;

    #[test]
    fn test_from_state_bounds_logs() {
        let state = DashboardState {
            stats: Some(fallback::stats()),
            logs: fallback::logs(),
            active_view: ViewKind::AiAssistant,
            ..DashboardState::default()
        };

        let context = AdvisorContext::from_state(&state, 2);
        assert_eq!(context.recent_logs.len(), 2);
        assert_eq!(context.recent_logs[0], fallback::logs()[0]);
        assert_eq!(context.view, ViewKind::AiAssistant);
    }

    #[test]
    fn test_prompt_json_shape() {
        let state = DashboardState {
            stats: Some(fallback::stats()),
            logs: fallback::logs(),
            active_view: ViewKind::Logs,
            ..DashboardState::default()
        };
        let json: serde_json::Value =
            serde_json::from_str(&AdvisorContext::from_state(&state, 10).to_prompt_json())
                .unwrap();

        assert_eq!(json["view"], "LOGS");
        assert_eq!(json["systemStats"]["totalQueries"], 1_245_672);
        assert_eq!(json["recentLogs"].as_array().unwrap().len(), 3);
    }
}
