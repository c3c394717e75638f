//! Configuration type definitions for retitle.
//!
//! This module contains all configuration struct definitions used throughout
//! retitle. These types are serialized/deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [title]
//! template = "{is_dirty}{path}{has_project} - Sublime Text"
//! path_display = "shortest"
//! is_dirty_true = "* "
//!
//! [window]
//! command_timeout_ms = 3000
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration loaded from TOML config files.
///
/// This is the primary configuration structure that gets loaded from:
/// 1. User config: `~/.retitle/config.toml`
/// 2. Project config: `./.retitle/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RetitleConfig {
    /// Title rendering options
    #[serde(default)]
    pub title: TitleSettings,

    /// Native window lookup options
    #[serde(default)]
    pub window: WindowSettings,
}

/// How the `{path}` template token is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PathDisplay {
    /// Absolute path, home directory collapsed to `~`.
    Full,
    /// Path relative to the first project folder, falling back to full.
    #[default]
    Relative,
    /// Whichever of full/relative is shorter; relative wins ties.
    Shortest,
}

impl PathDisplay {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathDisplay::Full => "full",
            PathDisplay::Relative => "relative",
            PathDisplay::Shortest => "shortest",
        }
    }
}

impl std::fmt::Display for PathDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Title rendering configuration.
///
/// Every field has a default, so a missing key in the config file is never
/// an error. Replacement strings may be empty; an empty replacement removes
/// the conditional token from the rendered title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleSettings {
    /// Template for the rendered window title. Recognized tokens:
    /// `{path}`, `{project}`, `{file}`, `{folder}`, `{has_project}`,
    /// `{is_dirty}`. Unknown tokens are left as-is.
    #[serde(default = "super::defaults::default_template")]
    pub template: String,

    /// How `{path}` is rendered.
    #[serde(default)]
    pub path_display: PathDisplay,

    /// Replacement for `{has_project}` when the view belongs to a project.
    #[serde(default = "super::defaults::default_has_project_true")]
    pub has_project_true: String,

    /// Replacement for `{has_project}` when it does not.
    #[serde(default)]
    pub has_project_false: String,

    /// Replacement for `{is_dirty}` when the buffer has unsaved changes.
    #[serde(default = "super::defaults::default_is_dirty_true")]
    pub is_dirty_true: String,

    /// Replacement for `{is_dirty}` when the buffer is clean.
    #[serde(default)]
    pub is_dirty_false: String,

    /// Path shown for buffers that have never been saved.
    #[serde(default = "super::defaults::default_untitled")]
    pub untitled: String,

    /// Whether the host shows the " (UNREGISTERED)" marker in its titles.
    /// Must match the host or the search key will never match a window.
    #[serde(default)]
    pub unregistered: bool,

    /// Echo backend commands and their output at info level.
    #[serde(default)]
    pub debug: bool,
}

/// Native window lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WindowSettings {
    /// Timeout in milliseconds for each window-utility subprocess.
    /// Default: 5000ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_timeout_ms: Option<u64>,

    /// Override for the generated helper script location.
    /// Default: `<cache dir>/retitle/find_windows.sh`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_path: Option<PathBuf>,
}

impl WindowSettings {
    /// Subprocess timeout as a `Duration`, applying the default.
    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(
            self.command_timeout_ms
                .unwrap_or(super::defaults::default_command_timeout_ms()),
        )
    }
}
