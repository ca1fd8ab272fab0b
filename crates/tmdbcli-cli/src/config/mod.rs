//! Application configuration module.
//!
//! Reads the optional TOML config file and merges it with command line
//! flags and environment variables into the effective [`Settings`].

#[allow(clippy::module_inception)]
mod config;
mod paths;
mod settings;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use paths::resolve_config_path;
pub use settings::{Overrides, Settings};
