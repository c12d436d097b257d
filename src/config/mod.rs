//! Configuration module for the news dashboard

mod template;

use crate::utils::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub use template::{generate_commented_config_template, generate_config_template};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration file version
    pub version: String,
    /// General application settings
    #[serde(default)]
    pub app: AppConfig,
    /// News feed settings
    #[serde(default)]
    pub feed: FeedConfig,
    /// Chat assistant settings
    #[serde(default)]
    pub assistant: AssistantConfig,
    /// Web dashboard settings
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Application-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log level (debug, info, warn, error)
    pub log_level: String,
}

/// News feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// RSS feed URL
    pub url: String,
    /// Optional pass-through proxy prefix; the encoded feed URL is appended
    #[serde(default)]
    pub proxy: Option<String>,
    /// Seconds between two refreshes
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Chat assistant configuration; missing keys take their defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// API key for the chat completion provider
    pub api_key: String,
    /// Model used for answers and article analysis
    pub model: String,
    /// Model used for follow-up question generation
    pub suggestion_model: String,
    /// OpenAI-compatible API root
    pub base_url: String,
    /// Instructions sent with each article analysis request
    pub prompt: String,
    /// System context describing the assistant's persona
    pub context: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

/// Web dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            app: AppConfig::default(),
            feed: FeedConfig::default(),
            assistant: AssistantConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string() }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: "https://www.forexlive.com/feed/news/".to_string(),
            proxy: None,
            refresh_interval_secs: default_refresh_interval_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4-turbo-preview".to_string(),
            suggestion_model: "gpt-3.5-turbo".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
            context: DEFAULT_CONTEXT.to_string(),
            temperature: 0.7,
            max_tokens: 500,
            timeout_secs: 60,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { bind_addr: "127.0.0.1:8080".to_string() }
    }
}

const DEFAULT_PROMPT: &str = "Analyse this forex market news and give a detailed analysis including:
- Currencies concerned
- Impacted currency pairs
- Trading opportunities
- Market sentiment
- Best time to trade
- Expected volatility
- Detailed reasoning";

const DEFAULT_CONTEXT: &str = "You are a forex market analyst with more than 20 years of experience. \
Your expertise lets you quickly identify the implications of economic news for the different currency pairs.";

// --------- Helper default functions for serde ---------
fn default_refresh_interval_secs() -> u64 {
    300
}
fn default_timeout_secs() -> u64 {
    15
}

impl Config {
    /// Serialize default config to TOML string
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).expect("serialize default config")
    }

    /// Load configuration from a specific file path
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::ConfigError(format!("Failed to read config file {:?}: {}", path.as_ref(), e))
        })?;
        let mut cfg: Self = toml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config file: {}", e)))?;
        cfg.merge_env()?;
        Ok(cfg)
    }

    /// Save the configuration to a file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;
        // Create parent directories if needed
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::ConfigError(format!("Failed to create directory {:?}: {}", parent, e))
            })?;
        }
        std::fs::write(path, content).map_err(|e| {
            Error::ConfigError(format!("Failed to write config file {:?}: {}", path, e))
        })?;
        Ok(())
    }

    /// Validate the configuration for required fields and reasonable values
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(Error::ConfigError("Config version must be set (e.g., '0.1.0')".to_string()));
        }
        // Feed config
        if self.feed.url.trim().is_empty() {
            return Err(Error::ConfigError("feed.url must be set".to_string()));
        }
        if url::Url::parse(&self.feed.url).is_err() {
            return Err(Error::ConfigError(format!("feed.url '{}' is not a valid URL", self.feed.url)));
        }
        if self.feed.refresh_interval_secs == 0 {
            return Err(Error::ConfigError("feed.refresh_interval_secs must be > 0".to_string()));
        }
        if self.feed.timeout_secs == 0 {
            return Err(Error::ConfigError("feed.timeout_secs must be > 0".to_string()));
        }
        // Assistant config
        if self.assistant.model.trim().is_empty() {
            return Err(Error::ConfigError("assistant.model must be set".to_string()));
        }
        if !(0.0..=2.0).contains(&self.assistant.temperature) {
            return Err(Error::ConfigError("assistant.temperature must be within 0..=2".to_string()));
        }
        if self.assistant.max_tokens == 0 {
            return Err(Error::ConfigError("assistant.max_tokens must be > 0".to_string()));
        }
        // Dashboard config
        if self.dashboard.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(Error::ConfigError(format!(
                "dashboard.bind_addr '{}' is not a socket address",
                self.dashboard.bind_addr
            )));
        }
        Ok(())
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        // Try to load from current directory
        if std::path::Path::new("config.toml").exists() {
            return Self::from_file("config.toml");
        }

        // Try to load from user config directory
        if let Some(mut path) = dirs::config_dir() {
            path.push("fxpulse");
            path.push("config.toml");
            if path.exists() {
                return Self::from_file(path);
            }
        }

        // Return default config if no config file found
        let mut config = Self::default();
        config.merge_env()?;
        Ok(config)
    }

    /// Merge environment variables into the configuration
    pub fn merge_env(&mut self) -> Result<()> {
        if let Ok(api_key) = env::var("OPENAI_API_KEY") {
            self.assistant.api_key = api_key;
        }

        if let Ok(model) = env::var("FXPULSE_MODEL") {
            self.assistant.model = model;
        }

        if let Ok(url) = env::var("FXPULSE_FEED_URL") {
            self.feed.url = url;
        }

        if let Ok(bind) = env::var("FXPULSE_BIND") {
            self.dashboard.bind_addr = bind;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.app.log_level, "info");
        assert_eq!(config.assistant.model, "gpt-4-turbo-preview");
        assert_eq!(config.feed.refresh_interval_secs, 300);
        assert!(config.assistant.api_key.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.feed.url = "https://feeds.test/news.xml".to_string();

        config.save(&config_path).unwrap();

        temp_env::with_vars_unset(vec!["FXPULSE_FEED_URL", "OPENAI_API_KEY"], || {
            let loaded_config = Config::from_file(&config_path).unwrap();
            assert_eq!(loaded_config.feed.url, "https://feeds.test/news.xml");
        });
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "version = \"0.1.0\"\n[dashboard]\nbind_addr = \"0.0.0.0:9000\"\n").unwrap();

        temp_env::with_vars_unset(vec!["FXPULSE_BIND", "FXPULSE_MODEL"], || {
            let cfg = Config::from_file(&path).unwrap();
            assert_eq!(cfg.dashboard.bind_addr, "0.0.0.0:9000");
            assert_eq!(cfg.assistant.model, "gpt-4-turbo-preview");
        });
    }

    #[test]
    fn test_merge_env() {
        temp_env::with_vars(
            vec![
                ("OPENAI_API_KEY", Some("sk-test")),
                ("FXPULSE_MODEL", Some("gpt-4")),
            ],
            || {
                let mut config = Config::default();
                config.merge_env().unwrap();

                assert_eq!(config.assistant.api_key, "sk-test");
                assert_eq!(config.assistant.model, "gpt-4");
            },
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.feed.refresh_interval_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.dashboard.bind_addr = "localhost".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.feed.url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_toml_sections() {
        let toml = Config::default_toml();
        assert!(toml.contains("[app]"));
        assert!(toml.contains("[feed]"));
        assert!(toml.contains("[assistant]"));
        assert!(toml.contains("[dashboard]"));
    }
}
