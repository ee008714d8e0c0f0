use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ForgeError, Result};

/// Environment variables checked for the API key, in order.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForgeConfig {
    #[serde(default)]
    pub api_keys: ApiKeysConfig,

    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeysConfig {
    #[serde(default)]
    pub gemini: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}
fn default_timeout() -> u64 {
    60
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl ForgeConfig {
    /// Load config from ~/.config/content-forge/config.toml, creating defaults if missing.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path, writing defaults there if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| ForgeError::Config(format!("Failed to read config: {e}")))?;
            toml::from_str(&contents)
                .map_err(|e| ForgeError::Config(format!("Failed to parse config: {e}")))
        } else {
            let config = ForgeConfig::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| ForgeError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ForgeError::Config("Could not determine config directory".into()))?;
        Ok(config_dir.join("content-forge").join("config.toml"))
    }

    /// Resolve the API key from the process environment, then the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Same as [`resolve_api_key`](Self::resolve_api_key) with a custom
    /// environment lookup. Blank values are treated as absent.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .chain(std::iter::once(self.api_keys.gemini.clone()))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = ForgeConfig::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.generation.model, "gemini-2.5-flash");
        assert_eq!(config.generation.timeout_seconds, 60);
        assert!(config.api_keys.gemini.is_empty());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[generation]\nmodel = \"gemini-2.0-pro\"\n").unwrap();

        let config = ForgeConfig::load_from(&path).unwrap();
        assert_eq!(config.generation.model, "gemini-2.0-pro");
        assert_eq!(
            config.generation.endpoint,
            "https://generativelanguage.googleapis.com"
        );
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[generation\nmodel = ").unwrap();

        let err = ForgeConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ForgeError::Config(_)));
    }

    #[test]
    fn environment_takes_precedence_over_file() {
        let mut config = ForgeConfig::default();
        config.api_keys.gemini = "from-file".into();

        let env: HashMap<&str, &str> = [("API_KEY", "from-env")].into();
        let key = config.resolve_api_key_with(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(key.as_deref(), Some("from-env"));

        let env: HashMap<&str, &str> =
            [("GEMINI_API_KEY", "gemini"), ("API_KEY", "generic")].into();
        let key = config.resolve_api_key_with(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(key.as_deref(), Some("gemini"));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let mut config = ForgeConfig::default();
        assert_eq!(config.resolve_api_key_with(|_| Some("  ".into())), None);

        config.api_keys.gemini = "from-file".into();
        assert_eq!(
            config.resolve_api_key_with(|_| Some(String::new())).as_deref(),
            Some("from-file")
        );
    }
}
