//! Query and filter predicates
//!
//! Pure, stateless predicate functions used by list views: free-text search,
//! status filtering, and role-scoped visibility of checkout forms. These
//! operate on in-memory collections already loaded from the store.

use crate::models::actor::Actor;
use crate::models::checkout::CheckoutForm;
use crate::models::resident::{CheckoutStatus, Resident};

/// Status filter applied to list views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(CheckoutStatus),
}

impl StatusFilter {
    fn accepts(&self, status: CheckoutStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => status == *wanted,
        }
    }
}

/// Whether a resident matches the free-text query and status filter.
///
/// The query matches case-insensitively against first name, last name,
/// student ID, or room number; an empty query matches everything.
pub fn resident_matches(resident: &Resident, query: &str, status_filter: StatusFilter) -> bool {
    if !status_filter.accepts(resident.checkout_status) {
        return false;
    }

    let query = query.to_lowercase();
    if query.is_empty() {
        return true;
    }

    resident.first_name.to_lowercase().contains(&query)
        || resident.last_name.to_lowercase().contains(&query)
        || resident.student_id.to_lowercase().contains(&query)
        || resident.room_number.to_lowercase().contains(&query)
}

/// Whether a checkout form is visible to the actor and matches the filters.
///
/// Admins and staff see every form; a resident-role actor only sees forms
/// linked to their own resident record. The free-text query matches against
/// the resident's name, student ID, and room number plus the form's reason.
pub fn form_matches(
    form: &CheckoutForm,
    resident: &Resident,
    actor: &Actor,
    query: &str,
    status_filter: StatusFilter,
) -> bool {
    if !actor.is_staff_level() {
        match actor.linked_resident_id() {
            Some(resident_id) if form.resident_id == resident_id => {}
            _ => return false,
        }
    }

    if !status_filter.accepts(form.status.into()) {
        return false;
    }

    let query = query.to_lowercase();
    if query.is_empty() {
        return true;
    }

    let haystack = format!(
        "{} {} {} {} {}",
        resident.first_name, resident.last_name, resident.student_id, form.reason, resident.room_number
    )
    .to_lowercase();

    haystack.contains(&query)
}
