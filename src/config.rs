//! Configuration management for the task client.
//!
//! The client reads an optional `config.yaml` from its data directory. Only
//! the API base URL is configurable.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Base URL used when no config file overrides it.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL prepended to every absolute API path (e.g. `/tasks`).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_base_url: default_api_base_url() }
    }
}

impl ClientConfig {
    /// Load config from a file, returning None if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Load config from a file, falling back to defaults when it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        Ok(Self::load_from(path)?.unwrap_or_default())
    }

    /// Save config to a file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Return a copy with the base URL replaced, when one is given.
    #[must_use]
    pub fn with_api_base_url(mut self, api_base_url: Option<String>) -> Self {
        if let Some(url) = api_base_url {
            self.api_base_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:3000");
    }

    #[test]
    fn test_load_not_found() {
        let dir = TempDir::new().unwrap();
        let result = ClientConfig::load_from(&dir.path().join("config.yaml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_or_default_when_missing() {
        let dir = TempDir::new().unwrap();
        let config = ClientConfig::load_or_default(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.yaml");

        let config = ClientConfig { api_base_url: "http://api.internal:8080".to_string() };
        config.save_to(&path).unwrap();

        let loaded = ClientConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_yaml_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");

        ClientConfig::default().save_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("api_base_url: http://localhost:3000"));
    }

    #[test]
    fn test_empty_mapping_uses_default_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "{}\n").unwrap();

        let config = ClientConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api_base_url: [unterminated").unwrap();

        assert!(ClientConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_with_api_base_url_override() {
        let config =
            ClientConfig::default().with_api_base_url(Some("http://example.test".to_string()));
        assert_eq!(config.api_base_url, "http://example.test");

        let unchanged = ClientConfig::default().with_api_base_url(None);
        assert_eq!(unchanged.api_base_url, DEFAULT_API_BASE_URL);
    }
}
