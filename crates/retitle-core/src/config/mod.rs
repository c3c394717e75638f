//! # Configuration System
//!
//! Hierarchical TOML configuration system for retitle.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.retitle/config.toml` (global user preferences)
//! 3. **Project config** - `./.retitle/config.toml` (project-specific overrides)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.retitle/config.toml
//! [title]
//! template = "{is_dirty}{path}{has_project} - Sublime Text"
//! path_display = "shortest"
//! has_project_true = " [{project}]"
//!
//! [window]
//! command_timeout_ms = 3000
//! ```
//!
//! A Sublime plugin host usually bypasses the files and hands the engine a
//! [`RetitleConfig`] built from the host's own settings store.

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{PathDisplay, RetitleConfig, TitleSettings, WindowSettings};

impl RetitleConfig {
    /// Load configuration from the config file hierarchy.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
