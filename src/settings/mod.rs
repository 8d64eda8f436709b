//! Connection settings for the DNS-forwarder backend.
//!
//! Holds the backend base URL and a human-readable instance label. Values are
//! read once from a [`SettingsStore`] at startup and re-persisted on every
//! [`ConnectionSettings::set`]. Readers get an immutable snapshot, so a call
//! that started before `set` keeps its URL and every call issued after `set`
//! returns sees the new one.

mod error;
mod store;

pub use error::*;
pub use store::*;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Base URL used when nothing has been persisted.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5335";

/// Instance label used when nothing (or an empty string) has been persisted.
pub const DEFAULT_INSTANCE_NAME: &str = "My MosDNS";

/// Snapshot of the connection settings.
///
/// # Invariants
///
/// - `base_url` never ends with `/`
/// - `instance_name` is never empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    pub base_url: String,
    pub instance_name: String,
}

impl ConnectionConfig {
    /// Build a normalized config. Malformed URLs are accepted as-is.
    ///
    /// ```
    /// use mosdash::settings::{ConnectionConfig, DEFAULT_INSTANCE_NAME};
    ///
    /// let config = ConnectionConfig::new("http://x/", "");
    /// assert_eq!(config.base_url, "http://x");
    /// assert_eq!(config.instance_name, DEFAULT_INSTANCE_NAME);
    /// ```
    pub fn new(base_url: &str, instance_name: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            instance_name: normalize_instance_name(instance_name),
        }
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn from_persisted(persisted: &PersistedSettings) -> Self {
        let base_url = persisted
            .backend_base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL);
        let instance_name = persisted.instance_name.as_deref().unwrap_or_default();
        Self::new(base_url, instance_name)
    }

    fn to_persisted(&self) -> PersistedSettings {
        PersistedSettings {
            backend_base_url: Some(self.base_url.clone()),
            instance_name: Some(self.instance_name.clone()),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            instance_name: DEFAULT_INSTANCE_NAME.to_string(),
        }
    }
}

/// Strip every trailing slash.
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Substitute the default label for an empty or whitespace-only name.
pub fn normalize_instance_name(instance_name: &str) -> String {
    if instance_name.trim().is_empty() {
        DEFAULT_INSTANCE_NAME.to_string()
    } else {
        instance_name.to_string()
    }
}

/// Process-wide connection settings with explicit init and explicit save.
///
/// Share it as `Arc<ConnectionSettings>`; the gateway reads it before every call.
pub struct ConnectionSettings {
    store: Box<dyn SettingsStore>,
    current: RwLock<Arc<ConnectionConfig>>,
}

impl ConnectionSettings {
    /// Read persisted values from `store`, defaulting anything missing.
    ///
    /// A store that fails to load is logged and treated as empty.
    pub fn init(store: impl SettingsStore + 'static) -> Self {
        let persisted = match store.load() {
            Ok(persisted) => persisted,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load connection settings, using defaults");
                PersistedSettings::default()
            }
        };
        let config = ConnectionConfig::from_persisted(&persisted);
        tracing::debug!(
            base_url = %config.base_url,
            instance_name = %config.instance_name,
            "Connection settings loaded"
        );

        Self {
            store: Box::new(store),
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// Settings that live only as long as the process.
    pub fn in_memory() -> Self {
        Self::init(MemorySettingsStore::new())
    }

    /// Current snapshot.
    pub fn get(&self) -> Arc<ConnectionConfig> {
        Arc::clone(&self.current.read().unwrap_or_else(|e| e.into_inner()))
    }

    /// Normalize, persist and publish new settings, returning the new snapshot.
    ///
    /// Never fails: a persistence error is logged and the new values still
    /// apply for the rest of the process.
    pub fn set(&self, base_url: &str, instance_name: &str) -> Arc<ConnectionConfig> {
        let config = Arc::new(ConnectionConfig::new(base_url, instance_name));

        if let Err(e) = self.store.save(&config.to_persisted()) {
            tracing::warn!(error = %e, "Failed to persist connection settings");
        }

        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Arc::clone(&config);
        tracing::info!(
            base_url = %config.base_url,
            instance_name = %config.instance_name,
            "Connection settings updated"
        );
        config
    }
}

impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("current", &self.get())
            .finish_non_exhaustive()
    }
}
