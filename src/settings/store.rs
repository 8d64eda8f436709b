//! Persistence boundary for connection settings.

use super::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// The two persisted keys, as they appear on disk.
///
/// Either key may be absent (first start, or a hand-edited file).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
}

/// Key/value storage that survives restarts.
pub trait SettingsStore: Send + Sync {
    /// Read whatever was persisted. A store with nothing in it returns the default.
    fn load(&self) -> Result<PersistedSettings, SettingsError>;

    /// Persist both keys, replacing previous values.
    fn save(&self, settings: &PersistedSettings) -> Result<(), SettingsError>;
}

/// Stores settings as a small TOML file.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SettingsError {
        SettingsError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<PersistedSettings, SettingsError> {
        if !self.path.exists() {
            return Ok(PersistedSettings::default());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        toml::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    fn save(&self, settings: &PersistedSettings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }
        let content =
            toml::to_string_pretty(settings).map_err(|e| SettingsError::Encode(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| self.io_error(e))
    }
}

/// Process-local store, used by tests and by front-ends without a disk.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    inner: Mutex<PersistedSettings>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store, as if a previous run had saved these values.
    pub fn with_values(base_url: &str, instance_name: &str) -> Self {
        Self {
            inner: Mutex::new(PersistedSettings {
                backend_base_url: Some(base_url.to_string()),
                instance_name: Some(instance_name.to_string()),
            }),
        }
    }

    /// What is currently persisted.
    pub fn persisted(&self) -> PersistedSettings {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<PersistedSettings, SettingsError> {
        Ok(self.persisted())
    }

    fn save(&self, settings: &PersistedSettings) -> Result<(), SettingsError> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = settings.clone();
        Ok(())
    }
}
