//! Default implementations for configuration types.
//!
//! This module contains all `Default` implementations and helper functions
//! for providing default values in serde deserialization.

use crate::config::types::TitleSettings;

/// Returns the default title template.
///
/// Renders like `● main.rs (retitle) - Sublime Text` for a dirty file in a
/// project, and `main.rs - Sublime Text` for a clean file outside one.
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_template() -> String {
    "{is_dirty}{path}{has_project} - Sublime Text".to_string()
}

/// Returns the default `{has_project}` replacement for views in a project.
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_has_project_true() -> String {
    " ({project})".to_string()
}

/// Returns the default `{is_dirty}` replacement for modified buffers.
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_is_dirty_true() -> String {
    "\u{25cf} ".to_string()
}

/// Returns the default placeholder for never-saved buffers.
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_untitled() -> String {
    "untitled".to_string()
}

/// Returns the default subprocess timeout in milliseconds (5000ms).
///
/// Window enumeration shells out on Linux; five seconds is far beyond any
/// healthy `xdotool` run but bounds a hung X connection.
pub fn default_command_timeout_ms() -> u64 {
    5000
}

impl Default for TitleSettings {
    fn default() -> Self {
        Self {
            template: default_template(),
            path_display: Default::default(),
            has_project_true: default_has_project_true(),
            has_project_false: String::new(),
            is_dirty_true: default_is_dirty_true(),
            is_dirty_false: String::new(),
            untitled: default_untitled(),
            unregistered: false,
            debug: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_tokens() {
        let template = default_template();
        assert!(template.contains("{path}"));
        assert!(template.contains("{is_dirty}"));
        assert!(template.contains("{has_project}"));
    }

    #[test]
    fn test_title_settings_default_matches_fns() {
        let settings = TitleSettings::default();
        assert_eq!(settings.template, default_template());
        assert_eq!(settings.untitled, default_untitled());
        assert_eq!(settings.is_dirty_true, default_is_dirty_true());
    }
}
