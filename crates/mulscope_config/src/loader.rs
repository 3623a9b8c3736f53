//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::MulscopeConfig;
use std::path::Path;

/// File name looked up in the project directory.
pub const CONFIG_FILE: &str = "mulscope.toml";

/// Loads and validates a `mulscope.toml` configuration from a project directory.
///
/// Reads `<project_dir>/mulscope.toml`, parses it, and validates its values.
pub fn load_config(project_dir: &Path) -> Result<MulscopeConfig, ConfigError> {
    load_config_file(&project_dir.join(CONFIG_FILE))
}

/// Loads and validates a configuration from an explicit file path.
pub fn load_config_file(path: &Path) -> Result<MulscopeConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Loads the project configuration, falling back to the built-in defaults
/// when the directory has no `mulscope.toml`.
pub fn load_or_default(project_dir: &Path) -> Result<MulscopeConfig, ConfigError> {
    let path = project_dir.join(CONFIG_FILE);
    if path.is_file() {
        load_config_file(&path)
    } else {
        Ok(MulscopeConfig::default())
    }
}

/// Parses and validates a `mulscope.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<MulscopeConfig, ConfigError> {
    let config: MulscopeConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and model values are usable.
fn validate_config(config: &MulscopeConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }
    if config.tool.program.is_empty() {
        return Err(ConfigError::MissingField("tool.program".to_string()));
    }
    if config.tool.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "tool.timeout_secs must be positive".to_string(),
        ));
    }
    if config.variants.is_empty() {
        return Err(ConfigError::ValidationError(
            "at least one variant must be configured".to_string(),
        ));
    }
    for (name, variant) in &config.variants {
        if name.is_empty() {
            return Err(ConfigError::ValidationError(
                "variant names must not be empty".to_string(),
            ));
        }
        if variant.script.as_os_str().is_empty() {
            return Err(ConfigError::MissingField(format!("variants.{name}.script")));
        }
    }

    let model = &config.model;
    if !(model.frequency.hz() > 0.0) {
        return Err(ConfigError::ValidationError(format!(
            "model.frequency must be positive, got {}",
            model.frequency
        )));
    }
    if !(model.supply_voltage > 0.0) {
        return Err(ConfigError::ValidationError(format!(
            "model.supply_voltage must be positive, got {}",
            model.supply_voltage
        )));
    }
    if !(model.activity_factor > 0.0 && model.activity_factor <= 1.0) {
        return Err(ConfigError::ValidationError(format!(
            "model.activity_factor must be in (0, 1], got {}",
            model.activity_factor
        )));
    }
    Ok(())
}
