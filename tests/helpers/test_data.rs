//! Test data helpers for creating test objects
//!
//! This module provides helper functions for building residents, checkout
//! form requests, and actors used across the integration tests.

use chrono::NaiveDate;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;

use DormHub::models::actor::{Actor, ActorRole};
use DormHub::models::checkout::CreateCheckoutFormRequest;
use DormHub::models::resident::{CreateResidentRequest, GradeLevel};

/// Build a resident registration request with a given student ID
pub fn resident_request(student_id: &str) -> CreateResidentRequest {
    CreateResidentRequest {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        student_id: student_id.to_string(),
        strand: "Instrumentation".to_string(),
        grade_level: GradeLevel::Grade11,
        contact_number: "09123456789".to_string(),
        room_number: "A101".to_string(),
    }
}

/// Build a checkout form request for a resident
pub fn form_request(
    resident_id: i64,
    clearance_items: Option<Vec<String>>,
) -> CreateCheckoutFormRequest {
    CreateCheckoutFormRequest {
        resident_id,
        reason: "Family visit".to_string(),
        intended_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        intended_time: "08:00".to_string(),
        return_date: NaiveDate::from_ymd_opt(2024, 3, 12).unwrap(),
        return_time: "18:00".to_string(),
        notes: None,
        clearance_items,
    }
}

/// Staff actor used for approvals
pub fn staff_actor(name: &str) -> Actor {
    Actor::new(name, ActorRole::Staff)
}

/// Admin actor
pub fn admin_actor() -> Actor {
    Actor::new("admin", ActorRole::Admin)
}

/// Resident-role actor linked to a resident record
pub fn resident_actor(name: &str, resident_id: i64) -> Actor {
    Actor::new(name, ActorRole::Resident { resident_id })
}
