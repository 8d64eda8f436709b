//! Wiring shared by every command: settings, gateway, orchestrator, advisor.

use crate::advisor::{AdvisorClient, GeminiGenerator};
use crate::config::DashConfig;
use crate::gateway::BackendGateway;
use crate::orchestrator::{DashboardState, ViewDataOrchestrator, ViewKind};
use crate::settings::{ConnectionSettings, FileSettingsStore};
use std::sync::Arc;

pub struct Console {
    pub config: DashConfig,
    pub settings: Arc<ConnectionSettings>,
    pub orchestrator: ViewDataOrchestrator<BackendGateway>,
}

impl Console {
    /// Restore the persisted connection from `[settings] path`.
    pub fn open(config: DashConfig) -> Self {
        let store = FileSettingsStore::new(config.settings.path.clone());
        Self::with_settings(config, Arc::new(ConnectionSettings::init(store)))
    }

    pub fn with_settings(config: DashConfig, settings: Arc<ConnectionSettings>) -> Self {
        let gateway =
            BackendGateway::new(Arc::clone(&settings)).with_timeouts(config.fetch.timeouts());
        let orchestrator = ViewDataOrchestrator::new(Arc::new(gateway), config.polling.options());
        Self {
            config,
            settings,
            orchestrator,
        }
    }

    /// Enter `view`, wait for its entry cycle, and stop polling again.
    pub async fn snapshot(&self, view: ViewKind) -> DashboardState {
        self.orchestrator.navigate(view).await;
        self.orchestrator.dispose();
        self.orchestrator.state()
    }

    pub fn advisor(&self) -> AdvisorClient {
        AdvisorClient::new(Arc::new(GeminiGenerator::from_config(&self.config.advisor)))
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("connection", &self.settings.get())
            .field("orchestrator", &self.orchestrator)
            .finish()
    }
}
