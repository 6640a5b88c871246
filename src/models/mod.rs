//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod actor;
pub mod checkout;
pub mod resident;

// Re-export commonly used models
pub use actor::{Actor, ActorRole};
pub use checkout::{
    CheckoutForm, ClearanceItem, ClearanceProgress, CreateCheckoutFormRequest, FormStatus,
    UpdateCheckoutFormRequest,
};
pub use resident::{
    CheckoutStatus, CreateResidentRequest, GradeLevel, Resident, UpdateResidentRequest,
};
