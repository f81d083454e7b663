//! Dispatcher configuration
//!
//! Settings are stored as TOML. Loading a missing file writes the defaults
//! so the file can be edited afterwards.
//!
//! # Example
//!
//! ```ignore
//! use frameq_core::{Dispatcher, DispatcherConfig};
//!
//! let config = DispatcherConfig::load("configs/frameq.toml").unwrap_or_default();
//! let dispatcher = Dispatcher::from_config(&config);
//! ```

use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tasks::DEFAULT_MAX_PER_PROCESS;

/// Configuration system errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Dispatcher settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Maximum tasks run by one `process` call. Must be at least 1.
    pub max_per_process: NonZeroUsize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            max_per_process: DEFAULT_MAX_PER_PROCESS,
        }
    }
}

impl DispatcherConfig {
    /// Parse config from a TOML string
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from file, creating default if missing.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config = Self::from_toml_str(&content)?;
            tracing::debug!("Loaded dispatcher config from {:?}", path);
            Ok(config)
        } else {
            let default = Self::default();
            default.save(path)?;
            tracing::info!("Created default dispatcher config at {:?}", path);
            Ok(default)
        }
    }

    /// Save config to file.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved dispatcher config to {:?}", path);
        Ok(())
    }

    /// Reload config from file.
    pub fn reload(&mut self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        *self = Self::from_toml_str(&content)?;
        tracing::debug!("Reloaded dispatcher config from {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DispatcherConfig::default();
        assert_eq!(config.max_per_process.get(), 128);
    }

    #[test]
    fn test_parse_config() {
        let config = DispatcherConfig::from_toml_str("max_per_process = 16").unwrap();
        assert_eq!(config.max_per_process.get(), 16);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config = DispatcherConfig::from_toml_str("").unwrap();
        assert_eq!(config, DispatcherConfig::default());
    }

    #[test]
    fn test_zero_cap_rejected() {
        let result = DispatcherConfig::from_toml_str("max_per_process = 0");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_config_serialize() {
        let config = DispatcherConfig {
            max_per_process: NonZeroUsize::new(4).unwrap(),
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("max_per_process = 4"));
    }

    #[test]
    fn test_load_creates_default_then_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("frameq.toml");

        let config = DispatcherConfig::load(&path).unwrap();
        assert_eq!(config, DispatcherConfig::default());
        assert!(path.exists());

        std::fs::write(&path, "max_per_process = 7\n").unwrap();
        let mut config = config;
        config.reload(&path).unwrap();
        assert_eq!(config.max_per_process.get(), 7);

        assert_eq!(DispatcherConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_reload_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = DispatcherConfig::default();
        let result = config.reload(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
