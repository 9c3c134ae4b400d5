//! Persisted user preferences.
//!
//! A [`SettingsRepository`] reads and writes a typed [`Settings`] value under a
//! fixed namespace key in a [`KeyValueStore`]. Stored shapes are versioned;
//! anything malformed or from an unknown version degrades to defaults.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Namespace key the preferences live under.
pub const SETTINGS_KEY: &str = "gpuglot.preferences";

/// Current on-disk schema version.
pub const SETTINGS_VERSION: u32 = 1;

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings I/O error: {}", e),
            SettingsError::Serialize(e) => write!(f, "cannot encode settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Serialize(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Serialize(e)
    }
}

/// String key-value side channel.
pub trait KeyValueStore: fmt::Debug {
    /// Returns the raw stored value, `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        (**self).set(key, value)
    }
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$XDG_CONFIG_HOME/gpuglot`, falling back to `$HOME/.config/gpuglot`.
    pub fn default_dir() -> Option<PathBuf> {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(xdg).join("gpuglot"));
        }
        std::env::var_os("HOME")
            .filter(|v| !v.is_empty())
            .map(|home| PathBuf::from(home).join(".config").join("gpuglot"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Atomic replace.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Volatile store, used with `--no-persist`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self { entries }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed user preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Show crippled-aware (nominal) dual readings.
    pub factor_in_cripple: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            factor_in_cripple: true,
        }
    }
}

/// Stored JSON shape. `version` is absent in legacy (v0) values.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<u32>,
    crippled: bool,
}

impl StoredSettings {
    /// Upgrades a stored value to the current schema, or `None` if unsupported.
    fn migrate(self) -> Option<Settings> {
        match self.version.unwrap_or(0) {
            // v0 `{crippled}` and v1 `{version: 1, crippled}` carry the same field.
            0 | 1 => Some(Settings {
                factor_in_cripple: self.crippled,
            }),
            _ => None,
        }
    }
}

/// Typed access to preferences stored in a [`KeyValueStore`].
#[derive(Debug)]
pub struct SettingsRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SettingsRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads preferences. Never fails: absent, unreadable, malformed, or
    /// future-version values all yield [`Settings::default`].
    pub fn load(&self) -> Settings {
        let raw = match self.store.get(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no stored preferences, using defaults");
                return Settings::default();
            }
            Err(e) => {
                warn!(error = %e, "cannot read stored preferences, using defaults");
                return Settings::default();
            }
        };

        let stored: StoredSettings = match serde_json::from_str(&raw) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "malformed stored preferences, using defaults");
                return Settings::default();
            }
        };

        let version = stored.version;
        match stored.migrate() {
            Some(settings) => {
                debug!(?version, ?settings, "loaded preferences");
                settings
            }
            None => {
                warn!(?version, "unsupported preferences version, using defaults");
                Settings::default()
            }
        }
    }

    pub fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        let stored = StoredSettings {
            version: Some(SETTINGS_VERSION),
            crippled: settings.factor_in_cripple,
        };
        let json = serde_json::to_string(&stored)?;
        self.store.set(SETTINGS_KEY, &json)?;
        debug!(crippled = settings.factor_in_cripple, "saved preferences");
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
