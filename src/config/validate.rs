// Configuration validation module

use super::types::Config;
use super::ConfigError;
use crate::identity::NodeId;
use crate::logger::Level;

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    NodeId::decode(&config.uuid)?;

    validate_segment("sub_path", &config.sub_path)?;
    validate_segment("xpath", &config.xpath)?;
    if config.sub_path == config.xpath {
        return Err(ConfigError::Validation(
            "sub_path and xpath must differ".into(),
        ));
    }

    if config.domain.trim().is_empty() {
        return Err(ConfigError::Validation("domain is empty".into()));
    }
    if config.name.trim().is_empty() {
        return Err(ConfigError::Validation("name is empty".into()));
    }
    if config.workers == Some(0) {
        return Err(ConfigError::Validation("workers must be > 0".into()));
    }

    config
        .logging
        .level
        .parse::<Level>()
        .map_err(ConfigError::Validation)?;

    config.socket_addr()?;
    Ok(())
}

/// A path segment must be non-empty and must not contain `/`
fn validate_segment(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{key} is empty")));
    }
    if value.contains('/') {
        return Err(ConfigError::Validation(format!(
            "{key} must be a single path segment, got '{value}'"
        )));
    }
    Ok(())
}
