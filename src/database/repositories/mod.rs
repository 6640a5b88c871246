//! Repository implementations

pub mod checkout;
pub mod resident;

pub use checkout::{CheckoutFormRepository, ItemCompletionChange, StatusAdvance};
pub use resident::ResidentRepository;
