//! `AppConfig` struct and TOML loading.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// `[api]` table.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// API root URL (e.g. `https://api.themoviedb.org/3`).
    pub root: Option<String>,
    /// Bearer token, used when `TMDB_API_TOKEN` is unset.
    pub token: Option<String>,
    /// Account ID (default: `null`).
    pub account_id: Option<String>,
    /// Response language for paged endpoints (default: `en-US`).
    pub language: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
}
