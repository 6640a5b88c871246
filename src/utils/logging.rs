//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the DormHub application.

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "dormhub.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log resident record actions with structured data
pub fn log_resident_action(resident_id: i64, action: &str, details: Option<&str>) {
    info!(
        resident_id = resident_id,
        action = action,
        details = details,
        "Resident action performed"
    );
}

/// Log checkout form actions with structured data
pub fn log_form_action(form_id: i64, action: &str, actor: Option<&str>, details: Option<&str>) {
    info!(
        form_id = form_id,
        action = action,
        actor = actor,
        details = details,
        "Checkout form action performed"
    );
}

/// Log status transitions applied to a checkout form
pub fn log_status_transition(form_id: i64, from: &str, to: &str, actor: &str) {
    info!(
        form_id = form_id,
        from = from,
        to = to,
        actor = actor,
        "Checkout form status changed"
    );
}

/// Log rejected operations that were blocked by a business rule
pub fn log_blocked_operation(entity: &str, entity_id: i64, reason: &str) {
    warn!(
        entity = entity,
        entity_id = entity_id,
        reason = reason,
        "Operation blocked"
    );
}
