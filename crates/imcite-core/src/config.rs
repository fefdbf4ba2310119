//! User configuration
//!
//! A small TOML file pointing at the library to open:
//!
//! ```toml
//! library_dir = "/home/me/papers"
//! create_missing = true
//! ```
//!
//! Consumers (the CLI layer) load this, then hand `library_dir` to
//! [`DataBroker::open`] or [`DataCache::open`].
//!
//! [`DataBroker::open`]: crate::DataBroker::open
//! [`DataCache::open`]: crate::DataCache::open

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors when loading the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Where the library lives and whether to create it on first open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub library_dir: PathBuf,
    #[serde(default)]
    pub create_missing: bool,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            library_dir: home.join(".imcite"),
            create_missing: false,
        }
    }
}

impl Config {
    /// Load from a specific TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the platform config directory
    /// (`<config dir>/imcite/config.toml`), falling back to defaults
    /// when no file exists yet.
    pub fn load_default() -> Result<Self, ConfigError> {
        match dirs::config_dir().map(|dir| dir.join("imcite/config.toml")) {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            library_dir: PathBuf::from("/home/me/papers"),
            create_missing: true,
        };
        std::fs::write(&path, toml::to_string(&config).unwrap()).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_create_missing_defaults_off() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "library_dir = \"/tmp/lib\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert!(!config.create_missing);
    }

    #[test]
    fn test_parse_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "library_dir = [not toml").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }
}
