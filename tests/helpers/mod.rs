//! Shared helpers for integration tests

pub mod database_helper;
pub mod test_data;

pub use database_helper::TestDatabase;
pub use test_data::*;

use DormHub::config::Settings;
use DormHub::database::DatabaseService;
use DormHub::services::ServiceFactory;

/// Build the full service stack against a test database
pub fn build_services(db: &TestDatabase) -> ServiceFactory {
    let database = DatabaseService::new(db.pool.clone());
    ServiceFactory::new(Settings::default(), database)
}
