//! services/encyclopedia/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use tracing::Level;

pub const DEFAULT_CONTENT_API_URL: &str = "https://api.hadith.gading.dev";
pub const DEFAULT_BACKEND_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_AI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_AI_MODEL: &str = "gemini-2.5-flash";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub content_api_url: String,
    pub backend_api_url: String,
    pub gemini_api_key: Option<String>,
    pub ai_api_base: String,
    pub ai_model: String,
    pub storage_path: PathBuf,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Load API Endpoints ---
        let content_api_url = url_var(&lookup, "CONTENT_API_URL", DEFAULT_CONTENT_API_URL)?;
        let backend_api_url = url_var(&lookup, "BACKEND_API_URL", DEFAULT_BACKEND_API_URL)?;
        let ai_api_base = url_var(&lookup, "AI_API_BASE", DEFAULT_AI_API_BASE)?;

        // --- Load API Keys (as optional) ---
        let gemini_api_key = lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty());

        let ai_model = lookup("AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string());

        let storage_path = lookup("STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./.encyclopedia/storage.json"));

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            content_api_url,
            backend_api_url,
            gemini_api_key,
            ai_api_base,
            ai_model,
            storage_path,
            log_level,
        })
    }
}

/// Reads a base URL, falling back to `default`, and strips any trailing slash.
fn url_var<F>(lookup: &F, key: &str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_else(|| default.to_string());
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::InvalidValue(
            key.to_string(),
            format!("'{}' is not an http(s) URL", value),
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}
