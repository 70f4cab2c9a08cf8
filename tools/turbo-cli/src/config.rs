//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use turbo_discovery::DiscoveryConfig;

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog API connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local persistence.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Facet, slider, and search tunables.
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Catalog API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the `/products` endpoints hang off.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Local storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file backing the key-value store, relative to the working
    /// directory.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    ".turbo/storage.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let config: CliConfig = toml::from_str(
            r#"
[api]
base_url = "https://shop.example.com/api"

[discovery.search]
debounce_ms = 250

[discovery.facets]
spec_priority = ["Storage", "RAM"]
"#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://shop.example.com/api");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.storage.path, ".turbo/storage.json");
        assert_eq!(config.discovery.search.debounce_ms, 250);
        assert_eq!(config.discovery.search.min_query_len, 2);
        assert_eq!(config.discovery.facets.spec_priority, vec!["Storage", "RAM"]);
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turbo.json");
        std::fs::write(&path, r#"{ "storage": { "path": "wish.json" } }"#).unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.storage.path, "wish.json");
        assert_eq!(config.discovery.slider.min_gap, 1);
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = CliConfig::load("/nonexistent/turbo.toml").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }
}
