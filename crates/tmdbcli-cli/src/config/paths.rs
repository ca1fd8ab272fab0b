//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Directory name under the config base directory.
const APP_DIR: &str = "tmdbcli";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path from `--config-dir` and the environment.
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set (when `dir`
/// is `None`).
pub fn resolve_config_path(dir: Option<&Path>) -> Result<PathBuf> {
    config_path_from(
        dir,
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

/// Picks the first of `{dir}/config.toml`, `{xdg_config_home}/tmdbcli/config.toml`
/// and `{home}/.config/tmdbcli/config.toml`.
///
/// Empty or relative `XDG_CONFIG_HOME` values are ignored.
fn config_path_from(
    dir: Option<&Path>,
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    if let Some(base) = xdg_config_home.filter(|p| p.is_absolute()) {
        return Ok(base.join(APP_DIR).join(CONFIG_FILE));
    }

    match home.filter(|p| !p.as_os_str().is_empty()) {
        Some(home) => Ok(home.join(".config").join(APP_DIR).join(CONFIG_FILE)),
        None => bail!("neither XDG_CONFIG_HOME nor HOME environment variable is set"),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_dir_wins_over_environment() {
        // Arrange
        let dir = PathBuf::from("/tmp/tmdbcli-test");

        // Act
        let path = config_path_from(
            Some(&dir),
            Some(PathBuf::from("/xdg")),
            Some(PathBuf::from("/home/user")),
        )
        .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/tmdbcli-test/config.toml"));
    }

    #[test]
    fn test_xdg_config_home_wins_over_home() {
        // Arrange & Act
        let path = config_path_from(
            None,
            Some(PathBuf::from("/xdg")),
            Some(PathBuf::from("/home/user")),
        )
        .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/xdg/tmdbcli/config.toml"));
    }

    #[test]
    fn test_relative_xdg_config_home_is_ignored() {
        // Arrange & Act
        let path = config_path_from(
            None,
            Some(PathBuf::from("relative")),
            Some(PathBuf::from("/home/user")),
        )
        .unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/home/user/.config/tmdbcli/config.toml"));
    }

    #[test]
    fn test_no_base_directory_fails() {
        // Arrange & Act
        let result = config_path_from(None, None, None);

        // Assert
        assert!(result.unwrap_err().to_string().contains("HOME"));
    }

    #[test]
    fn test_resolve_default_ends_with_app_dir() {
        // Arrange & Act
        let path = resolve_config_path(None).unwrap();

        // Assert
        assert!(path.ends_with("tmdbcli/config.toml"));
    }
}
