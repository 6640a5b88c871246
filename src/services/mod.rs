//! Services module
//!
//! This module contains business logic services

pub mod checkout;
pub mod clearance;
pub mod resident;

// Re-export commonly used services
pub use checkout::CheckoutService;
pub use clearance::ClearanceService;
pub use resident::ResidentService;

use crate::config::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub resident_service: ResidentService,
    pub clearance_service: ClearanceService,
    pub checkout_service: CheckoutService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings, database: DatabaseService) -> Self {
        let resident_service = ResidentService::new(
            database.residents.clone(),
            database.checkout_forms.clone(),
        );
        let clearance_service = ClearanceService::new(database.checkout_forms.clone());
        let checkout_service = CheckoutService::new(
            database.checkout_forms,
            database.residents,
            settings,
        );

        Self {
            resident_service,
            clearance_service,
            checkout_service,
        }
    }
}
