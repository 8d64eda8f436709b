//! Screens of the console and the data each one needs.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The active screen. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewKind {
    #[default]
    Dashboard,
    #[serde(rename = "CONFIG")]
    ConfigEditor,
    Upstreams,
    Logs,
    AiAssistant,
}

impl ViewKind {
    pub const ALL: [ViewKind; 5] = [
        ViewKind::Dashboard,
        ViewKind::ConfigEditor,
        ViewKind::Upstreams,
        ViewKind::Logs,
        ViewKind::AiAssistant,
    ];

    /// Whether the screen shows continuously changing data and gets auto-refresh.
    pub fn polls(self) -> bool {
        matches!(
            self,
            ViewKind::Dashboard | ViewKind::Logs | ViewKind::AiAssistant
        )
    }

    /// Minimal set of reads for one cycle on this screen.
    pub fn plan(self, config_loaded: bool) -> FetchPlan {
        FetchPlan {
            stats: true,
            history: self == ViewKind::Dashboard,
            top_domains: self == ViewKind::Dashboard,
            upstreams: self == ViewKind::Upstreams,
            logs: matches!(self, ViewKind::Logs | ViewKind::AiAssistant),
            config: self == ViewKind::ConfigEditor && !config_loaded,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewKind::Dashboard => "Dashboard",
            ViewKind::ConfigEditor => "Config Editor",
            ViewKind::Upstreams => "Upstreams",
            ViewKind::Logs => "Query Logs",
            ViewKind::AiAssistant => "AI Assistant",
        }
    }
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "dashboard" => Ok(ViewKind::Dashboard),
            "config" | "config-editor" => Ok(ViewKind::ConfigEditor),
            "upstreams" => Ok(ViewKind::Upstreams),
            "logs" => Ok(ViewKind::Logs),
            "ai" | "ai-assistant" => Ok(ViewKind::AiAssistant),
            _ => Err(format!("Invalid view: {}", s)),
        }
    }
}

/// Which gateway reads a cycle issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchPlan {
    pub stats: bool,
    pub history: bool,
    pub top_domains: bool,
    pub upstreams: bool,
    pub logs: bool,
    pub config: bool,
}

impl FetchPlan {
    /// Number of reads the plan issues.
    pub fn len(&self) -> usize {
        [
            self.stats,
            self.history,
            self.top_domains,
            self.upstreams,
            self.logs,
            self.config,
        ]
        .iter()
        .filter(|x| **x)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_fetched_on_every_view() {
        for view in ViewKind::ALL {
            assert!(view.plan(false).stats, "{view:?}");
            assert!(view.plan(true).stats, "{view:?}");
        }
    }

    #[test]
    fn test_dashboard_plan() {
        let plan = ViewKind::Dashboard.plan(false);
        assert!(plan.history && plan.top_domains);
        assert!(!plan.upstreams && !plan.logs && !plan.config);
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn test_config_editor_plan_is_idempotent() {
        assert!(ViewKind::ConfigEditor.plan(false).config);
        let loaded = ViewKind::ConfigEditor.plan(true);
        assert!(!loaded.config);
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_logs_and_assistant_fetch_logs() {
        assert!(ViewKind::Logs.plan(false).logs);
        assert!(ViewKind::AiAssistant.plan(false).logs);
        assert!(!ViewKind::Upstreams.plan(false).logs);
    }

    #[test]
    fn test_polling_views() {
        let polling: Vec<_> = ViewKind::ALL.into_iter().filter(|v| v.polls()).collect();
        assert_eq!(
            polling,
            vec![ViewKind::Dashboard, ViewKind::Logs, ViewKind::AiAssistant]
        );
    }

    #[test]
    fn test_view_serializes_like_the_frontend_enum() {
        assert_eq!(
            serde_json::to_string(&ViewKind::AiAssistant).unwrap(),
            "\"AI_ASSISTANT\""
        );
        assert_eq!(
            serde_json::to_string(&ViewKind::ConfigEditor).unwrap(),
            "\"CONFIG\""
        );
    }

    #[test]
    fn test_view_from_str() {
        assert_eq!(ViewKind::from_str("LOGS").unwrap(), ViewKind::Logs);
        assert_eq!(ViewKind::from_str("config-editor").unwrap(), ViewKind::ConfigEditor);
        assert_eq!(ViewKind::from_str("ai_assistant").unwrap(), ViewKind::AiAssistant);
        assert!(ViewKind::from_str("settings").is_err());
    }
}
