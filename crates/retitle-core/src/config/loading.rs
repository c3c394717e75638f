//! Configuration loading and merging logic.
//!
//! This module handles loading configuration from files and merging
//! configurations from different sources (user config, project config).
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.retitle/config.toml` (global user preferences)
//! 3. **Project config** - `./.retitle/config.toml` (project-specific overrides)

use crate::config::types::{RetitleConfig, TitleSettings, WindowSettings};
use crate::config::validation::validate_config;
use std::fs;
use std::path::PathBuf;

/// Check if an error is a "file not found" error.
fn is_file_not_found(e: &(dyn std::error::Error + 'static)) -> bool {
    if let Some(io_err) = e.downcast_ref::<std::io::Error>() {
        return io_err.kind() == std::io::ErrorKind::NotFound;
    }

    let err_str = e.to_string();
    err_str.contains("No such file or directory") || err_str.contains("cannot find the path")
}

/// Load configuration from the hierarchy of config files.
///
/// Loads and merges configuration from:
/// 1. Default values
/// 2. User config (`~/.retitle/config.toml`)
/// 3. Project config (`./.retitle/config.toml`)
///
/// # Errors
///
/// Returns an error if validation fails. Missing config files are not errors.
pub fn load_hierarchy() -> Result<RetitleConfig, Box<dyn std::error::Error>> {
    let mut config = RetitleConfig::default();

    // Load user config (file not found is expected, parse errors fail)
    match load_user_config() {
        Ok(user_config) => config = merge_configs(config, user_config),
        Err(e) if !is_file_not_found(e.as_ref()) => return Err(e),
        Err(_) => {} // File not found - continue with defaults
    }

    // Load project config (file not found is expected, parse errors fail)
    match load_project_config() {
        Ok(project_config) => config = merge_configs(config, project_config),
        Err(e) if !is_file_not_found(e.as_ref()) => return Err(e),
        Err(_) => {} // File not found - continue with merged config
    }

    // Validate the final configuration
    validate_config(&config)?;

    Ok(config)
}

/// Load the user configuration from ~/.retitle/config.toml.
fn load_user_config() -> Result<RetitleConfig, Box<dyn std::error::Error>> {
    let home_dir = dirs::home_dir().ok_or("Could not find home directory")?;
    let config_path = home_dir.join(".retitle").join("config.toml");
    load_config_file(&config_path)
}

/// Load the project configuration from ./.retitle/config.toml.
fn load_project_config() -> Result<RetitleConfig, Box<dyn std::error::Error>> {
    let config_path = std::env::current_dir()?.join(".retitle").join("config.toml");
    load_config_file(&config_path)
}

/// Load a configuration file from the given path.
fn load_config_file(path: &PathBuf) -> Result<RetitleConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;
    let config: RetitleConfig = toml::from_str(&content)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;
    Ok(config)
}

/// Merge two configurations, with override_config taking precedence.
///
/// Title fields are replaced wholesale by the override config. Serde has
/// already filled defaults for keys missing from the override file, so we
/// cannot distinguish an explicit default from an omitted key; the override
/// file wins either way. Optional window fields merge with `or`.
pub fn merge_configs(base: RetitleConfig, override_config: RetitleConfig) -> RetitleConfig {
    RetitleConfig {
        title: TitleSettings {
            template: override_config.title.template,
            path_display: override_config.title.path_display,
            has_project_true: override_config.title.has_project_true,
            has_project_false: override_config.title.has_project_false,
            is_dirty_true: override_config.title.is_dirty_true,
            is_dirty_false: override_config.title.is_dirty_false,
            untitled: override_config.title.untitled,
            unregistered: override_config.title.unregistered,
            debug: override_config.title.debug,
        },
        window: WindowSettings {
            command_timeout_ms: override_config
                .window
                .command_timeout_ms
                .or(base.window.command_timeout_ms),
            script_path: override_config.window.script_path.or(base.window.script_path),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::PathDisplay;
    use std::io::Write;

    #[test]
    fn test_is_file_not_found_io_error() {
        let io_err: Box<dyn std::error::Error> =
            Box::new(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(is_file_not_found(io_err.as_ref()));
    }

    #[test]
    fn test_is_file_not_found_message() {
        let err: Box<dyn std::error::Error> =
            "Failed to read config file: No such file or directory".into();
        assert!(is_file_not_found(err.as_ref()));

        let other: Box<dyn std::error::Error> = "permission denied".into();
        assert!(!is_file_not_found(other.as_ref()));
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[title]\npath_display = \"full\"\n\n[window]\ncommand_timeout_ms = 2000"
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.title.path_display, PathDisplay::Full);
        assert_eq!(config.window.command_timeout_ms, Some(2000));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not [ valid toml").unwrap();

        let result = load_config_file(&path);
        assert!(result.is_err());
        assert!(!is_file_not_found(result.unwrap_err().as_ref()));
    }

    #[test]
    fn test_merge_prefers_override_title() {
        let base = RetitleConfig::default();
        let mut override_config = RetitleConfig::default();
        override_config.title.template = "{path}".to_string();
        override_config.title.unregistered = true;

        let merged = merge_configs(base, override_config);
        assert_eq!(merged.title.template, "{path}");
        assert!(merged.title.unregistered);
    }

    #[test]
    fn test_merge_window_options_fall_back_to_base() {
        let mut base = RetitleConfig::default();
        base.window.command_timeout_ms = Some(1000);
        let override_config = RetitleConfig::default();

        let merged = merge_configs(base, override_config);
        assert_eq!(merged.window.command_timeout_ms, Some(1000));
    }

    #[test]
    fn test_merge_window_options_prefer_override() {
        let mut base = RetitleConfig::default();
        base.window.command_timeout_ms = Some(1000);
        let mut override_config = RetitleConfig::default();
        override_config.window.command_timeout_ms = Some(250);

        let merged = merge_configs(base, override_config);
        assert_eq!(merged.window.command_timeout_ms, Some(250));
    }
}
