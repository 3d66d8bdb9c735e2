//! Common types and utilities shared across CLI commands.

use std::path::{Path, PathBuf};

use tilecache::cache::LockMode;
use tilecache::config::{ConfigFile, StoreConfig};

use crate::error::CliError;

/// Store settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct StoreOverrides {
    pub root: Option<PathBuf>,
    pub format: Option<String>,
    pub sharded: Option<usize>,
}

/// Load the config file from `path`, or from the default location.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// Resolve store settings from CLI args and config.
pub fn resolve_store_config(config: &ConfigFile, overrides: &StoreOverrides) -> StoreConfig {
    // CLI takes precedence, then config
    let mut store = config.store_config();
    if let Some(root) = &overrides.root {
        store.root_directory = root.clone();
    }
    if let Some(format) = &overrides.format {
        store.format = format.clone();
    }
    if let Some(shards) = overrides.sharded {
        store.lock_mode = LockMode::Sharded { shards };
    }
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_overrides_uses_config() {
        let config =
            ConfigFile::from_ini_str("[cache]\ndirectory = /srv/tiles\nformat = jpg\n").unwrap();
        let store = resolve_store_config(&config, &StoreOverrides::default());

        assert_eq!(store.root_directory, PathBuf::from("/srv/tiles"));
        assert_eq!(store.format, "jpg");
        assert_eq!(store.lock_mode, LockMode::Global);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config =
            ConfigFile::from_ini_str("[cache]\ndirectory = /srv/tiles\nformat = jpg\n").unwrap();
        let overrides = StoreOverrides {
            root: Some(PathBuf::from("/tmp/tiles")),
            format: Some("webp".to_string()),
            sharded: Some(16),
        };
        let store = resolve_store_config(&config, &overrides);

        assert_eq!(store.root_directory, PathBuf::from("/tmp/tiles"));
        assert_eq!(store.format, "webp");
        assert_eq!(store.lock_mode, LockMode::Sharded { shards: 16 });
    }

    #[test]
    fn test_load_config_missing_file_gives_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("none.ini");
        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_load_config_invalid_value() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        std::fs::write(&path, "[cache]\nlock = nope\n").unwrap();

        let err = load_config(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
