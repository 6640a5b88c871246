//! DormHub dormitory management core
//!
//! A library for tracking dormitory residents and their checkout requests.
//! Checkout forms carry a clearance checklist; the clearance engine derives
//! form status from item completion and keeps the resident's mirrored
//! checkout status consistent.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod filters;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{DormHubError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
