//! Configuration management for the file storage
//!
//! Settings come from an optional `config` file and the process environment,
//! the environment taking precedence.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::SettingsError;
use crate::storage::DEFAULT_BASE_PATH;

/// Environment variable holding the listening socket address.
pub const SOCKET_VAR: &str = "SOCKET";

const DEFAULT_LOG_DIR: &str = "logs";

/// Validated process settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Socket address the process announces (SOCKET, required)
    pub socket: SocketAddr,

    /// Root directory of the storage (STORAGE_PATH)
    pub storage_path: PathBuf,

    /// Directory for the main log file (LOG_DIR)
    pub log_dir: PathBuf,
}

/// Settings as they come out of the sources, before validation
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    socket: Option<String>,
    storage_path: Option<String>,
    log_dir: Option<String>,
}

impl Settings {
    /// Load settings from `config.*` (if present) with environment overrides
    pub fn load() -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::default())
            .build()?;

        Self::from_config(config)
    }

    /// Validate settings from an already built configuration
    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        let raw: RawSettings = config.try_deserialize()?;

        let socket = raw
            .socket
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| SettingsError::EnvironmentVariable(SOCKET_VAR.to_string()))?;

        let socket = socket
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| SettingsError::InvalidSocket {
                value: socket.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            socket,
            storage_path: non_empty_or(raw.storage_path, DEFAULT_BASE_PATH),
            log_dir: non_empty_or(raw.log_dir, DEFAULT_LOG_DIR),
        })
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> PathBuf {
    match value {
        Some(v) if !v.is_empty() => PathBuf::from(v),
        _ => PathBuf::from(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(pairs: &[(&str, &str)]) -> Config {
        let mut builder = Config::builder();
        for (key, value) in pairs {
            builder = builder.set_override(*key, *value).unwrap();
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_socket_with_defaults() {
        let settings = Settings::from_config(build(&[("socket", "127.0.0.1:8080")])).unwrap();
        assert_eq!(settings.socket, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(settings.storage_path, PathBuf::from(".data"));
        assert_eq!(settings.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_overridden_paths() {
        let settings = Settings::from_config(build(&[
            ("socket", "0.0.0.0:9000"),
            ("storage_path", "/srv/storage"),
            ("log_dir", "/var/log/storage"),
        ]))
        .unwrap();
        assert_eq!(settings.storage_path, PathBuf::from("/srv/storage"));
        assert_eq!(settings.log_dir, PathBuf::from("/var/log/storage"));
    }

    #[test]
    fn test_missing_socket() {
        let err = Settings::from_config(build(&[])).unwrap_err();
        assert!(matches!(err, SettingsError::EnvironmentVariable(ref key) if key == "SOCKET"));
    }

    #[test]
    fn test_empty_socket() {
        let err = Settings::from_config(build(&[("socket", "")])).unwrap_err();
        assert!(matches!(err, SettingsError::EnvironmentVariable(_)));
    }

    #[test]
    fn test_invalid_socket() {
        let err = Settings::from_config(build(&[("socket", "localhost")])).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidSocket { .. }));
    }
}
