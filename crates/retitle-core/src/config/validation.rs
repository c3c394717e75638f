//! Configuration validation.
//!
//! Validation runs once after the config hierarchy is merged, so the engine
//! can assume a well-formed config for the rest of the process.

use crate::config::types::RetitleConfig;
use crate::errors::ConfigError;
use crate::title::template::validate_template;

/// Validate a merged configuration.
///
/// Checks that the title template is well formed (every `{` has a matching
/// `}`) and that the subprocess timeout is usable. The conditional
/// replacement strings are validated too since they are spliced into the
/// template before value substitution.
pub fn validate_config(config: &RetitleConfig) -> Result<(), ConfigError> {
    validate_template(&config.title.template).map_err(|e| ConfigError::InvalidConfiguration {
        message: format!("template: {}", e),
    })?;

    for (key, replacement) in [
        ("has_project_true", &config.title.has_project_true),
        ("has_project_false", &config.title.has_project_false),
        ("is_dirty_true", &config.title.is_dirty_true),
        ("is_dirty_false", &config.title.is_dirty_false),
    ] {
        validate_template(replacement).map_err(|e| ConfigError::InvalidConfiguration {
            message: format!("{}: {}", key, e),
        })?;
    }

    if config.window.command_timeout_ms == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "command_timeout_ms must be greater than zero".to_string(),
        });
    }

    Ok(())
}
