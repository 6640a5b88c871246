//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub checkout: CheckoutConfig,
    pub seed: SeedConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
    pub max_files: u32,
}

/// Checkout workflow configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckoutConfig {
    /// Clearance item names used when a form is created without an explicit list
    pub default_clearance_items: Vec<String>,
}

/// Sample data seeding configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedConfig {
    pub enabled: bool,
    pub sample_residents: u32,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("DORMHUB"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::DormHubError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/dormhub".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/dormhub".to_string(),
                max_files: 5,
            },
            checkout: CheckoutConfig {
                default_clearance_items: vec![
                    "Room Inspection".to_string(),
                    "Property Inventory Check".to_string(),
                    "Key Return".to_string(),
                    "Payment Verification".to_string(),
                ],
            },
            seed: SeedConfig {
                enabled: false,
                sample_residents: 150,
            },
        }
    }
}
