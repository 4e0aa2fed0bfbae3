//! PocketPath configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fallback backdrop used whenever image search is unavailable
pub const FALLBACK_IMAGE: &str =
    "https://images.unsplash.com/photo-1469854523086-cc02fe5d8800?auto=format&fit=crop&w=1920&q=80";

/// Accent color paired with [`FALLBACK_IMAGE`]
pub const FALLBACK_COLOR: &str = "#F09819";

/// Main PocketPath configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level override (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Text generation provider configuration
    pub llm: LlmConfig,

    /// Image search configuration for the backdrop
    pub background: BackgroundConfig,

    /// PDF export configuration
    pub export: ExportConfig,

    /// Form defaults
    pub defaults: FormDefaults,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        debug!(?config_path, "Config::load: called");
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for candidate in Self::candidate_paths() {
            if candidate.exists() {
                match Self::load_from_file(&candidate) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", candidate.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is initialized
    ///
    /// Errors are swallowed: a broken config file is reported later by [`Config::load`].
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let paths = match config_path {
            Some(path) => vec![path.clone()],
            None => Self::candidate_paths(),
        };

        paths
            .iter()
            .find(|p| p.exists())
            .and_then(|p| fs::read_to_string(p).ok())
            .and_then(|content| serde_yaml::from_str::<Self>(&content).ok())
            .and_then(|config| config.log_level)
    }

    /// Project-local config first, then the user config dir
    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".pocketpath.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("pocketpath").join("pocketpath.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Text generation provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("gemini" or "openai")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Output token cap; unset leaves the model's own limit
    #[serde(rename = "max-tokens")]
    pub max_tokens: Option<u32>,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            max_tokens: None,
            timeout_ms: 300_000,
        }
    }
}

impl LlmConfig {
    /// API key from the configured environment variable, if set and non-empty
    pub fn api_key(&self) -> Option<String> {
        debug!(api_key_env = %self.api_key_env, "LlmConfig::api_key: called");
        std::env::var(&self.api_key_env).ok().filter(|k| !k.trim().is_empty())
    }
}

/// Image search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Environment variable containing the Unsplash access key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Image used when the search fails
    #[serde(rename = "fallback-image")]
    pub fallback_image: String,

    /// Color used when the search fails
    #[serde(rename = "fallback-color")]
    pub fallback_color: String,

    /// Query used at session start and after reset
    #[serde(rename = "generic-query")]
    pub generic_query: String,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            api_key_env: "UNSPLASH_API_KEY".to_string(),
            base_url: "https://api.unsplash.com".to_string(),
            timeout_ms: 5_000,
            fallback_image: FALLBACK_IMAGE.to_string(),
            fallback_color: FALLBACK_COLOR.to_string(),
            generic_query: "landscape,adventure,travel,mountains".to_string(),
        }
    }
}

impl BackgroundConfig {
    /// Access key, if set and non-empty
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok().filter(|k| !k.trim().is_empty())
    }
}

/// PDF export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory the itinerary PDF is written to
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// Initial values for the trip form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    /// Departure city
    pub origin: String,

    /// Duration slider start position
    #[serde(rename = "duration-days")]
    pub duration_days: u32,

    /// Group size shown when switching to group travel
    #[serde(rename = "group-size")]
    pub group_size: u32,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            origin: "Mumbai".to_string(),
            duration_days: 4,
            group_size: 4,
        }
    }
}
