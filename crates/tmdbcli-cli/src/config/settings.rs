//! Effective settings: flags and environment first, then config file, then defaults.

use anyhow::{Context, Result, bail};
use url::Url;

use super::AppConfig;

/// Default TMDB API v3 root.
const DEFAULT_API_ROOT: &str = "https://api.themoviedb.org/3";

/// Account ID that TMDB resolves from the bearer token.
const DEFAULT_ACCOUNT_ID: &str = "null";

/// Default response language.
const DEFAULT_LANGUAGE: &str = "en-US";

/// Values taken from command line flags or the environment.
#[derive(Debug, Default)]
pub struct Overrides {
    /// `--api-root` / `TMDB_API_ROOT`.
    pub api_root: Option<Url>,
    /// `--account-id` / `TMDB_ACCOUNT_ID`.
    pub account_id: Option<String>,
    /// `TMDB_API_TOKEN`.
    pub token: Option<String>,
    /// `AUTH_TOKEN`, read only when `token` is unset or empty.
    pub auth_token: Option<String>,
}

/// Settings used to build the account client.
#[derive(Debug, PartialEq, Eq)]
pub struct Settings {
    /// API root URL.
    pub api_root: Url,
    /// Bearer token.
    pub token: String,
    /// Account ID placed in endpoint paths.
    pub account_id: String,
    /// Default response language for paged endpoints.
    pub language: String,
}

impl Settings {
    /// Merges overrides with the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is available or the configured API root
    /// is not a valid URL.
    pub fn resolve(overrides: Overrides, config: AppConfig) -> Result<Self> {
        let api = config.api;

        let Some(token) = non_empty(overrides.token)
            .or_else(|| non_empty(overrides.auth_token))
            .or_else(|| non_empty(api.token))
        else {
            bail!(
                "TMDB_API_TOKEN (or AUTH_TOKEN) environment variable, or api.token in config.toml, is required"
            );
        };

        let api_root = match overrides.api_root {
            Some(url) => url,
            None => {
                let root = api.root.as_deref().unwrap_or(DEFAULT_API_ROOT);
                Url::parse(root).with_context(|| format!("invalid API root: {root}"))?
            }
        };

        let account_id = non_empty(overrides.account_id)
            .or_else(|| non_empty(api.account_id))
            .unwrap_or_else(|| String::from(DEFAULT_ACCOUNT_ID));

        let language = non_empty(api.language).unwrap_or_else(|| String::from(DEFAULT_LANGUAGE));

        Ok(Self {
            api_root,
            token,
            account_id,
            language,
        })
    }
}

/// Treats an empty string as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
