//! Configuration management for the screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable consulted for the provider credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub provider: ProviderConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Preconfigured secret; a key given on the command line or in the environment wins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub show_raw_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderConfig {
                base_url: "https://api.openai.com/v1".to_string(),
                timeout_secs: 120,
                api_key: None,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                show_raw_json: false,
            },
        }
    }
}

impl Config {
    /// Load the config from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::read(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScreenerError::Configuration(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }
        Self::read(path)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("smart-screener")
            .join("config.toml")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.timeout_secs)
    }

    /// Resolve the credential: command line, then environment, then config file
    pub fn resolve_api_key(&self, explicit: Option<String>) -> Option<String> {
        resolve_api_key_from(
            explicit,
            std::env::var(API_KEY_ENV).ok(),
            self.provider.api_key.clone(),
        )
    }
}

fn resolve_api_key_from(
    explicit: Option<String>,
    from_env: Option<String>,
    configured: Option<String>,
) -> Option<String> {
    [explicit, from_env, configured]
        .into_iter()
        .flatten()
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

/// Mask a secret for display, keeping only a short prefix
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{}****", visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrips_through_toml() {
        let config = Config::default();
        let content = toml::to_string_pretty(&config).unwrap();

        assert!(content.contains("base_url"));
        assert!(!content.contains("api_key"));

        let parsed = Config::from_toml(&content).unwrap();
        assert_eq!(parsed.provider.timeout_secs, 120);
        assert_eq!(parsed.output.format, OutputFormat::Console);
        assert!(parsed.provider.api_key.is_none());
    }

    #[test]
    fn test_config_with_stored_key() {
        let content = r#"
[provider]
base_url = "http://localhost:8080/v1"
timeout_secs = 5
api_key = "sk-stored"

[output]
format = "html"
color_output = false
show_raw_json = true
"#;
        let config = Config::from_toml(content).unwrap();
        assert_eq!(config.provider.api_key.as_deref(), Some("sk-stored"));
        assert_eq!(config.output.format, OutputFormat::Html);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_config_is_configuration_error() {
        let result = Config::from_toml("provider = 12");
        assert!(matches!(result, Err(ScreenerError::Configuration(_))));
    }

    #[test]
    fn test_api_key_precedence() {
        let key = resolve_api_key_from(
            Some("sk-cli".into()),
            Some("sk-env".into()),
            Some("sk-file".into()),
        );
        assert_eq!(key.as_deref(), Some("sk-cli"));

        let key = resolve_api_key_from(None, Some("sk-env".into()), Some("sk-file".into()));
        assert_eq!(key.as_deref(), Some("sk-env"));

        let key = resolve_api_key_from(Some("   ".into()), None, Some("sk-file".into()));
        assert_eq!(key.as_deref(), Some("sk-file"));

        assert!(resolve_api_key_from(None, Some(String::new()), None).is_none());
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("sk-abcdef123"), "sk-a****");
        assert_eq!(mask_secret("ab"), "ab****");
    }
}
