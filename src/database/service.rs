//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{CheckoutFormRepository, DatabasePool, ResidentRepository};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub residents: ResidentRepository,
    pub checkout_forms: CheckoutFormRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            residents: ResidentRepository::new(pool.clone()),
            checkout_forms: CheckoutFormRepository::new(pool),
        }
    }
}
