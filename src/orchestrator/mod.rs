//! View-scoped data orchestration.
//!
//! [`ViewDataOrchestrator`] turns "which screen is active" into the minimal set
//! of gateway reads, merges their results into [`DashboardState`], and keeps a
//! single auto-refresh timer armed while a live-data screen is showing.
//!
//! Cycles are not serialized: a transition cycle and a timer tick may both be
//! in flight. Every read writes its own field as soon as it resolves, so the
//! most recently completed read for a field wins.

mod state;
mod view;


pub use state::*;
pub use view::*;

use crate::gateway::{BackendGateway, DashboardSource};
use crate::settings::ConnectionConfig;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

/// Auto-refresh period for live-data screens.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Number of log entries kept in state.
pub const DEFAULT_LOG_WINDOW: usize = 100;

/// Tuning for [`ViewDataOrchestrator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorOptions {
    pub poll_interval: Duration,
    pub log_window: usize,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            log_window: DEFAULT_LOG_WINDOW,
        }
    }
}

/// One batch of reads against a source, writing into shared state.
///
/// Cheap to clone; the poll timer holds its own copy.
struct Cycle<S> {
    source: Arc<S>,
    state: Arc<RwLock<DashboardState>>,
    log_window: usize,
}

impl<S> Clone for Cycle<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
            log_window: self.log_window,
        }
    }
}

/// Decrements the in-flight counter even if the cycle future is dropped.
struct InFlightGuard {
    state: Arc<RwLock<DashboardState>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.cycles_in_flight = state.cycles_in_flight.saturating_sub(1);
        state.last_cycle_completed_at = Some(chrono::Utc::now());
    }
}

impl<S: DashboardSource> Cycle<S> {
    fn update(&self, f: impl FnOnce(&mut DashboardState)) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        f(&mut state);
    }

    async fn run(&self, view: ViewKind) {
        let plan = {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            state.cycles_in_flight += 1;
            view.plan(state.config_loaded())
        };
        let _guard = InFlightGuard {
            state: Arc::clone(&self.state),
        };

        tracing::debug!(view = ?view, reads = plan.len(), "Orchestrator cycle started");

        let stats = async {
            if plan.stats {
                let result = self.source.stats().await;
                self.update(|state| {
                    if state.is_real_connection != result.is_real {
                        if result.is_real {
                            tracing::info!("Backend reachable, showing live data");
                        } else {
                            tracing::info!("Backend unreachable, showing fallback data (demo mode)");
                        }
                    }
                    state.is_real_connection = result.is_real;
                    state.stats = Some(result.data);
                });
            }
        };
        let history = async {
            if plan.history {
                let result = self.source.history().await;
                self.update(|state| state.history = result.data);
            }
        };
        let top_domains = async {
            if plan.top_domains {
                let result = self.source.top_domains().await;
                self.update(|state| state.top_domains = result.data);
            }
        };
        let upstreams = async {
            if plan.upstreams {
                let result = self.source.upstreams().await;
                self.update(|state| state.upstreams = result.data);
            }
        };
        let logs = async {
            if plan.logs {
                let mut result = self.source.logs().await;
                result.data.truncate(self.log_window);
                self.update(|state| state.logs = result.data);
            }
        };
        let config = async {
            if plan.config {
                let result = self.source.config().await;
                // An edit or another cycle may have filled it while we waited.
                self.update(|state| {
                    if state.config_yaml.is_none() {
                        state.config_yaml = Some(result.data.yaml);
                    }
                });
            }
        };

        tokio::join!(stats, history, top_domains, upstreams, logs, config);

        tracing::debug!(view = ?view, "Orchestrator cycle completed");
    }
}

/// State machine over [`ViewKind`] that owns the poll timer.
///
/// Dropping the orchestrator (or calling [`dispose`](Self::dispose)) disarms
/// the timer. Must be used within a Tokio runtime.
pub struct ViewDataOrchestrator<S: DashboardSource> {
    cycle: Cycle<S>,
    scheduler: Mutex<crate::scheduler::PollScheduler>,
    options: OrchestratorOptions,
}

impl<S: DashboardSource> ViewDataOrchestrator<S> {
    pub fn new(source: Arc<S>, options: OrchestratorOptions) -> Self {
        Self {
            cycle: Cycle {
                source,
                state: Arc::new(RwLock::new(DashboardState::default())),
                log_window: options.log_window,
            },
            scheduler: Mutex::new(crate::scheduler::PollScheduler::new()),
            options,
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.cycle.source
    }

    pub fn options(&self) -> OrchestratorOptions {
        self.options
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> DashboardState {
        self.cycle
            .state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn active_view(&self) -> ViewKind {
        self.cycle
            .state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .active_view
    }

    pub fn is_polling(&self) -> bool {
        self.scheduler
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_armed()
    }

    /// Switch screens: cancel the timer, re-arm it if the new screen polls,
    /// then run the entry cycle and wait for it.
    pub async fn navigate(&self, view: ViewKind) {
        {
            let mut scheduler = self.scheduler.lock().unwrap_or_else(|e| e.into_inner());
            scheduler.disarm();

            self.cycle.update(|state| state.active_view = view);

            if view.polls() {
                let cycle = self.cycle.clone();
                scheduler.arm(self.options.poll_interval, move || {
                    let cycle = cycle.clone();
                    async move { cycle.run(view).await }
                });
            }
        }

        tracing::debug!(view = ?view, polling = view.polls(), "View changed");
        self.cycle.run(view).await;
    }

    /// Run one cycle for the active screen without touching the timer.
    pub async fn refresh(&self) {
        let view = self.active_view();
        self.cycle.run(view).await;
    }

    /// Replace the local config text with the operator's edit.
    ///
    /// Once set, entering the config editor never overwrites it with a fetch.
    pub fn edit_config(&self, yaml: impl Into<String>) {
        let yaml = yaml.into();
        self.cycle.update(|state| state.config_yaml = Some(yaml));
    }

    /// Send the local config text to the backend.
    ///
    /// Returns `false` if the write failed or nothing is loaded yet; local
    /// state is left exactly as it was either way.
    pub async fn save_config(&self) -> bool {
        let Some(yaml) = self.state().config_yaml else {
            tracing::warn!("No config loaded, nothing to save");
            return false;
        };
        self.cycle.source.save_config(&yaml).await
    }

    /// Probe the backend (e.g. right after a connection change).
    pub async fn check_health(&self) -> bool {
        self.cycle.source.check_health().await
    }

    /// Disarm the timer. In-flight cycles still complete.
    pub fn dispose(&self) {
        self.scheduler
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .disarm();
    }
}

impl ViewDataOrchestrator<BackendGateway> {
    /// Point the gateway at a new backend and refresh the active screen
    /// against it.
    ///
    /// Writes through the gateway's own settings handle, so the refresh that
    /// follows always reads from `base_url`.
    pub async fn reconnect(&self, base_url: &str, instance_name: &str) -> Arc<ConnectionConfig> {
        let config = self.source().settings().set(base_url, instance_name);
        self.refresh().await;
        config
    }
}

impl<S: DashboardSource> std::fmt::Debug for ViewDataOrchestrator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewDataOrchestrator")
            .field("active_view", &self.active_view())
            .field("polling", &self.is_polling())
            .field("options", &self.options)
            .finish()
    }
}
