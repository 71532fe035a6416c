//! Configuration management for Navigator
//!
//! Supports environment variables, config files, and runtime overrides.
//! Priority: CLI flags > env vars > config file > defaults.
//!
//! Config file location: ~/.config/navigator/config.toml

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{NavigatorError, Result};

/// Main configuration for Navigator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// LLM backend credentials and endpoints
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Browser configuration
    #[serde(default)]
    pub browser: BrowserConfig,
    /// Agent configuration
    #[serde(default)]
    pub agent: AgentConfig,
    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
}

/// Per-backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub openai: ProviderConfig,
    pub anthropic: ProviderConfig,
    pub google: ProviderConfig,
    pub browser_use: ProviderConfig,
}

/// Settings for a single LLM backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key; falls back to the backend's conventional env var
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL of the API
    pub base_url: String,
    /// Model override. Only the browser-use backend reads this; the others
    /// take the model from the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Browser automation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// agent-browser executable
    pub binary: String,
    /// Prefix for the per-process session name
    pub session_prefix: String,
    /// Whether to run in headed mode (visible browser)
    pub headed: bool,
}

/// Agent behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Maximum observe/act steps per task
    /// Default: 25
    pub max_steps: usize,
    /// Consecutive failed steps before the task is abandoned; 0 means no limit
    /// Default: 3
    pub max_failures: usize,
    /// Page state is truncated to this many characters in prompts
    pub max_page_chars: usize,
    /// Sampling temperature for decisions
    pub temperature: f32,
    /// Whether to show debug output
    pub debug: bool,
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name).ok().map(|v| v == "true" || v == "1")
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            openai: ProviderConfig::from_env(
                &["OPENAI_API_KEY"],
                "OPENAI_BASE_URL",
                "https://api.openai.com",
            ),
            anthropic: ProviderConfig::from_env(
                &["ANTHROPIC_API_KEY"],
                "ANTHROPIC_BASE_URL",
                "https://api.anthropic.com",
            ),
            google: ProviderConfig::from_env(
                &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
                "GOOGLE_BASE_URL",
                "https://generativelanguage.googleapis.com",
            ),
            browser_use: ProviderConfig {
                model: Some(
                    env::var("BROWSER_USE_MODEL").unwrap_or_else(|_| "bu-latest".to_string()),
                ),
                ..ProviderConfig::from_env(
                    &["BROWSER_USE_API_KEY"],
                    "BROWSER_USE_BASE_URL",
                    "https://llm.api.browser-use.com",
                )
            },
        }
    }
}

impl ProviderConfig {
    /// Build from the first set env var in `key_vars` and an optional base URL override
    fn from_env(key_vars: &[&str], base_url_var: &str, default_base_url: &str) -> Self {
        Self {
            api_key: key_vars.iter().find_map(|var| env::var(var).ok()),
            base_url: env::var(base_url_var).unwrap_or_else(|_| default_base_url.to_string()),
            model: None,
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            binary: env::var("NAVIGATOR_BROWSER_BINARY")
                .unwrap_or_else(|_| "agent-browser".to_string()),
            session_prefix: env::var("NAVIGATOR_BROWSER_SESSION")
                .unwrap_or_else(|_| "navigator".to_string()),
            headed: env_flag("NAVIGATOR_BROWSER_HEADED").unwrap_or(false),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_steps: env::var("NAVIGATOR_MAX_STEPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(25),
            max_failures: 3,
            max_page_chars: 40_000,
            temperature: 0.1,
            debug: env_flag("NAVIGATOR_DEBUG").unwrap_or(false),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 120 }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("navigator")
    }

    /// Get the config file path
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, environment, and defaults
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // Try to load .env file if it exists
        let _ = dotenvy::dotenv();

        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let mut config = Self::load_from_file(&path)?;
        config.apply_env_credentials();
        Ok(config)
    }

    /// Load configuration from a file only
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| NavigatorError::config(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| NavigatorError::config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| {
                    NavigatorError::config(format!("Failed to create config dir: {}", e))
                })?;
            }
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| NavigatorError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| NavigatorError::config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Fill API keys the file left empty from the environment
    fn apply_env_credentials(&mut self) {
        let env_keys = ProvidersConfig::default();
        let pairs = [
            (&mut self.providers.openai, env_keys.openai),
            (&mut self.providers.anthropic, env_keys.anthropic),
            (&mut self.providers.google, env_keys.google),
            (&mut self.providers.browser_use, env_keys.browser_use),
        ];
        for (slot, from_env) in pairs {
            if slot.api_key.is_none() {
                slot.api_key = from_env.api_key;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.agent.max_failures, 3);
        assert_eq!(config.http.timeout_secs, 120);
        assert_eq!(config.agent.max_page_chars, 40_000);
        assert!(config.providers.browser_use.model.is_some());
    }

    #[test]
    fn test_config_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.agent.max_steps = 7;
        config.browser.session_prefix = "ci".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.agent.max_steps, 7);
        assert_eq!(loaded.browser.session_prefix, "ci");
    }

    #[test]
    fn test_partial_file_uses_section_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[http]\ntimeout_secs = 5\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.agent.max_failures, 3);
    }

    #[test]
    fn test_file_api_key_is_not_replaced_by_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[providers.openai]\napi_key = \"from-file\"\nbase_url = \"http://localhost:8080\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.providers.openai.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.providers.openai.base_url, "http://localhost:8080");
        assert_eq!(
            config.providers.anthropic.base_url,
            ProvidersConfig::default().anthropic.base_url
        );
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[agent\nmax_steps = ").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, NavigatorError::Config(_)));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.http.timeout_secs, 120);
    }

    #[test]
    fn test_config_dir() {
        let dir = Config::config_dir();
        assert!(dir.to_string_lossy().contains("navigator"));
    }
}
