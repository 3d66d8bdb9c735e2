//! Configuration file handling for ~/.tilecache/config.ini.
//!
//! ```ini
//! [cache]
//! directory = ~/.cache/tilecache
//! format = png
//! lock = global        ; or: sharded
//! shards = 64          ; only used with lock = sharded
//! sync_writes = false
//!
//! [logging]
//! directory = ~/.tilecache/logs
//! level = info
//! ```

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::store::{StoreConfig, DEFAULT_FORMAT};
use crate::cache::{LockMode, TileCacheError};

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// `[cache]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub directory: PathBuf,
    pub format: String,
    pub lock_mode: LockMode,
    pub sync_writes: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            directory: default_cache_directory(),
            format: DEFAULT_FORMAT.to_string(),
            lock_mode: LockMode::Global,
            sync_writes: false,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// When set, logs are also written to a file in this directory.
    pub directory: Option<PathBuf>,
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: None,
            level: "info".to_string(),
        }
    }
}

/// Parsed user configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub cache: CacheSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Load configuration from the default path (~/.tilecache/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        parse_ini(&ini)
    }

    /// Parse configuration from INI text.
    pub fn from_ini_str(content: &str) -> Result<Self, ConfigFileError> {
        let ini = Ini::load_from_str(content).map_err(ini::Error::Parse)?;
        parse_ini(&ini)
    }

    /// Build the store settings described by the `[cache]` section.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.cache.directory.clone(), self.cache.format.clone())
            .with_lock_mode(self.cache.lock_mode)
            .with_sync_writes(self.cache.sync_writes)
    }
}

/// Overlay values found in `ini` onto `ConfigFile::default()`.
fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [cache] section
    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.cache.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("format") {
            let v = v.trim();
            // Same rules the store applies when it is opened
            StoreConfig::new(&config.cache.directory, v)
                .validate()
                .map_err(|e| match e {
                    TileCacheError::InvalidConfig(reason) => invalid("cache", "format", v, &reason),
                    other => invalid("cache", "format", v, &other.to_string()),
                })?;
            config.cache.format = v.to_string();
        }
        if let Some(v) = section.get("lock") {
            config.cache.lock_mode = v
                .parse()
                .map_err(|_| invalid("cache", "lock", v, "must be 'global' or 'sharded'"))?;
        }
        if let Some(v) = section.get("shards") {
            let shards = v
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid("cache", "shards", v, "must be a positive integer"))?;
            if let LockMode::Sharded { .. } = config.cache.lock_mode {
                config.cache.lock_mode = LockMode::Sharded { shards };
            }
        }
        if let Some(v) = section.get("sync_writes") {
            config.cache.sync_writes = parse_bool(v)
                .ok_or_else(|| invalid("cache", "sync_writes", v, "must be true or false"))?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = Some(expand_tilde(v));
            }
        }
        if let Some(v) = section.get("level") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.level = v.to_string();
            }
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Expand a leading `~` to the home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Get the default cache directory (platform cache dir + `tilecache`).
pub fn default_cache_directory() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tilecache")
}

/// Get the path to the config directory (~/.tilecache).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tilecache")
}

/// Get the path to the config file (~/.tilecache/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
