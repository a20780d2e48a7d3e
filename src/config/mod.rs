//! Configuration loaded from `~/.kcic/config.toml`.
//!
//! The file is optional; every field falls back to its `Default`. Command-line
//! flags and `KCIC_*` environment variables are applied on top by the binary.

use crate::ordering::ReorderPolicy;
use crate::utils::kcic_home;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Which [`crate::store::Store`] implementation backs the content tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// One JSON file per table under `data_dir`.
    #[default]
    Json,
    /// Process memory; nothing survives exit.
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "file" => Ok(StoreBackend::Json),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            _ => Err(format!("Unknown store backend: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Json,
            data_dir: kcic_home().join("data"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrderingConfig {
    pub reorder_policy: ReorderPolicy,
}

/// `[logging]` table. Unset fields leave the binary's defaults in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
    pub dir: Option<PathBuf>,
    pub rotation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CmsConfig {
    pub store: StoreConfig,
    pub ordering: OrderingConfig,
    pub logging: LoggingConfig,
}

/// Default location of the config file.
#[must_use]
pub fn config_path() -> PathBuf {
    kcic_home().join(CONFIG_FILENAME)
}

/// Parse a config document.
pub fn parse_config(content: &str) -> Result<CmsConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, the default path is tried and
/// a missing file yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<CmsConfig, ConfigError> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (config_path(), false),
    };

    if !required && !path.exists() {
        debug!("Config not found at {}; using defaults", path.display());
        return Ok(CmsConfig::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config = parse_config(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(parse_config("").unwrap(), CmsConfig::default());
    }

    #[test]
    fn test_defaults() {
        let config = CmsConfig::default();
        assert_eq!(config.store.backend, StoreBackend::Json);
        assert!(config.store.data_dir.ends_with("data"));
        assert_eq!(config.ordering.reorder_policy, ReorderPolicy::Strict);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_full_document() {
        let config = parse_config(
            r#"
[store]
backend = "memory"
data_dir = "/srv/kcic"

[ordering]
reorder_policy = "trusting"

[logging]
level = "debug"
json = true
rotation = "hourly"
"#,
        )
        .unwrap();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.data_dir, PathBuf::from("/srv/kcic"));
        assert_eq!(config.ordering.reorder_policy, ReorderPolicy::Trusting);
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.json, Some(true));
        assert_eq!(config.logging.dir, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse_config("[store]\nbackend = \"json\"\ncolour = \"green\"\n").unwrap_err();
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_bad_policy_rejected() {
        assert!(parse_config("[ordering]\nreorder_policy = \"loose\"\n").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "[ordering]\nreorder_policy = \"trusting\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.ordering.reorder_policy, ReorderPolicy::Trusting);
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("JSON".parse::<StoreBackend>(), Ok(StoreBackend::Json));
        assert_eq!("memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }
}
