//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{DormHubError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;
    validate_checkout_config(&settings.checkout)?;
    validate_seed_config(&settings.seed)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(DormHubError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(DormHubError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(DormHubError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(DormHubError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(DormHubError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

/// Validate checkout workflow configuration
fn validate_checkout_config(config: &super::CheckoutConfig) -> Result<()> {
    if config.default_clearance_items.is_empty() {
        return Err(DormHubError::Config(
            "At least one default clearance item is required".to_string()
        ));
    }

    if config.default_clearance_items.iter().any(|name| name.trim().is_empty()) {
        return Err(DormHubError::Config(
            "Default clearance item names cannot be empty".to_string()
        ));
    }

    Ok(())
}

/// Validate seeding configuration
fn validate_seed_config(config: &super::SeedConfig) -> Result<()> {
    if config.enabled && config.sample_residents == 0 {
        return Err(DormHubError::Config(
            "Sample resident count must be greater than 0 when seeding is enabled".to_string()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_rejects_empty_default_items() {
        let mut settings = Settings::default();
        settings.checkout.default_clearance_items.clear();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_bad_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
