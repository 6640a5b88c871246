//! Clearance engine implementation
//!
//! Maintains per-form aggregate completion and enforces the checkout status
//! state machine. Completing the last outstanding item of an in-progress form
//! auto-advances the form to approved; explicit status changes are validated
//! against the transition table. Every mutation mirrors the resulting status
//! onto the referenced resident inside the same transaction.

use tracing::{debug, info, warn};

use crate::database::repositories::{CheckoutFormRepository, ItemCompletionChange, StatusAdvance};
use crate::models::actor::Actor;
use crate::models::checkout::{CheckoutForm, ClearanceItem, ClearanceProgress, FormStatus};
use crate::utils::errors::{DormHubError, Result};
use crate::utils::helpers;
use crate::utils::logging;

/// Clearance engine for item completion and status transitions
#[derive(Clone)]
pub struct ClearanceService {
    form_repository: CheckoutFormRepository,
}

impl ClearanceService {
    /// Create a new ClearanceService instance
    pub fn new(form_repository: CheckoutFormRepository) -> Self {
        Self { form_repository }
    }

    /// Mark a clearance item complete or incomplete.
    ///
    /// Completing requires the completing actor's name; the completion date is
    /// stamped alongside. Un-completing clears both fields and never reverts
    /// the form status. When the update leaves every item complete and the
    /// form is in-progress, the form auto-advances to approved: the approval
    /// date is stamped once (repeat completions leave it untouched) and the
    /// resident's checkout status follows.
    pub async fn set_item_completion(
        &self,
        form_id: i64,
        item_id: i64,
        is_completed: bool,
        completed_by: Option<String>,
    ) -> Result<CheckoutForm> {
        debug!(
            form_id = form_id,
            item_id = item_id,
            is_completed = is_completed,
            "Updating clearance item completion"
        );

        let form = self
            .form_repository
            .find_by_id(form_id)
            .await?
            .ok_or(DormHubError::FormNotFound { form_id })?;

        if !form.clearance_items.iter().any(|item| item.id == item_id) {
            return Err(DormHubError::ClearanceItemNotFound { item_id });
        }

        let completed_by = completed_by.filter(|by| !by.trim().is_empty());
        if is_completed && completed_by.is_none() {
            return Err(DormHubError::Validation(
                "completedBy is required when marking an item complete".to_string(),
            ));
        }

        let today = helpers::current_date();
        let change = if is_completed {
            ItemCompletionChange {
                item_id,
                is_completed: true,
                completed_by,
                completed_date: Some(today),
            }
        } else {
            ItemCompletionChange {
                item_id,
                is_completed: false,
                completed_by: None,
                completed_date: None,
            }
        };

        let advance = if form.status == FormStatus::InProgress
            && all_complete_after_change(&form.clearance_items, &change)
        {
            Some(StatusAdvance {
                form_id,
                resident_id: form.resident_id,
                status: FormStatus::Approved,
                approval_date: form.approval_date.unwrap_or(today),
            })
        } else {
            None
        };

        let auto_approved = advance.is_some();
        self.form_repository.set_item_completion(change, advance).await?;

        if auto_approved {
            info!(
                form_id = form_id,
                "All clearance items complete, form auto-approved"
            );
            logging::log_status_transition(
                form_id,
                FormStatus::InProgress.as_str(),
                FormStatus::Approved.as_str(),
                "auto",
            );
        }

        self.form_repository
            .find_by_id(form_id)
            .await?
            .ok_or(DormHubError::FormNotFound { form_id })
    }

    /// Apply an explicit status change requested by an actor.
    ///
    /// Illegal transitions are rejected; the override into approved requires
    /// the whole checklist to be complete. Transitions that record an
    /// approver stamp the approval date only if it is not already set;
    /// rejecting a form clears the approver and approval date. The new status
    /// is always mirrored onto the resident.
    pub async fn request_status_change(
        &self,
        form_id: i64,
        target: FormStatus,
        actor: &Actor,
    ) -> Result<CheckoutForm> {
        debug!(
            form_id = form_id,
            target = %target,
            actor = %actor.name,
            "Requesting status change"
        );

        let form = self
            .form_repository
            .find_by_id(form_id)
            .await?
            .ok_or(DormHubError::FormNotFound { form_id })?;

        if !form.status.can_transition_to(target) {
            warn!(
                form_id = form_id,
                from = %form.status,
                to = %target,
                "Illegal status transition rejected"
            );
            return Err(DormHubError::InvalidStatusTransition {
                from: form.status.to_string(),
                to: target.to_string(),
            });
        }

        if target == FormStatus::Approved && !form.all_items_complete() {
            return Err(DormHubError::Validation(
                "All clearance items must be complete before approval".to_string(),
            ));
        }

        let (approved_by, approval_date) = if target.records_approver() {
            (
                Some(actor.name.clone()),
                Some(form.approval_date.unwrap_or_else(helpers::current_date)),
            )
        } else {
            (None, None)
        };

        let updated = self
            .form_repository
            .update_status(form_id, form.resident_id, target, approved_by, approval_date)
            .await?;

        logging::log_status_transition(form_id, form.status.as_str(), target.as_str(), &actor.name);

        Ok(updated)
    }

    /// Aggregate completion of a form's checklist
    pub fn compute_progress(&self, form: &CheckoutForm) -> ClearanceProgress {
        ClearanceProgress {
            completed: form.completed_item_count(),
            total: form.clearance_items.len(),
        }
    }

    /// Clearance items of a form, in creation order
    pub async fn items_for_form(&self, form_id: i64) -> Result<Vec<ClearanceItem>> {
        self.form_repository
            .find_by_id(form_id)
            .await?
            .ok_or(DormHubError::FormNotFound { form_id })
            .map(|form| form.clearance_items)
    }

    /// Add a clearance item to an existing form; the new item starts
    /// incomplete and does not trigger any status recomputation
    pub async fn add_item(&self, form_id: i64, name: &str) -> Result<ClearanceItem> {
        helpers::require_field("Clearance item name", name)?;

        self.form_repository
            .find_by_id(form_id)
            .await?
            .ok_or(DormHubError::FormNotFound { form_id })?;

        let item = self.form_repository.add_item(form_id, name).await?;
        info!(form_id = form_id, item_id = item.id, "Clearance item added");

        Ok(item)
    }

    /// Remove a clearance item from a form; no status recomputation
    pub async fn remove_item(&self, form_id: i64, item_id: i64) -> Result<()> {
        let form = self
            .form_repository
            .find_by_id(form_id)
            .await?
            .ok_or(DormHubError::FormNotFound { form_id })?;

        if !form.clearance_items.iter().any(|item| item.id == item_id) {
            return Err(DormHubError::ClearanceItemNotFound { item_id });
        }

        self.form_repository.remove_item(item_id).await?;
        info!(form_id = form_id, item_id = item_id, "Clearance item removed");

        Ok(())
    }
}

/// Aggregate completion as it would stand after applying the pending change
fn all_complete_after_change(items: &[ClearanceItem], change: &ItemCompletionChange) -> bool {
    items.iter().all(|item| {
        if item.id == change.item_id {
            change.is_completed
                && change
                    .completed_by
                    .as_deref()
                    .map_or(false, |by| !by.is_empty())
        } else {
            item.is_complete()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(id: i64, is_completed: bool, completed_by: Option<&str>) -> ClearanceItem {
        ClearanceItem {
            id,
            checkout_form_id: 1,
            name: format!("Item {}", id),
            is_completed,
            completed_by: completed_by.map(|s| s.to_string()),
            completed_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn completing(item_id: i64, by: &str) -> ItemCompletionChange {
        ItemCompletionChange {
            item_id,
            is_completed: true,
            completed_by: Some(by.to_string()),
            completed_date: Some(helpers::current_date()),
        }
    }

    #[test]
    fn test_all_complete_after_completing_last_item() {
        let items = vec![
            item(1, true, Some("staff1")),
            item(2, true, Some("staff2")),
            item(3, false, None),
        ];
        assert!(all_complete_after_change(&items, &completing(3, "staff1")));
    }

    #[test]
    fn test_not_all_complete_with_outstanding_item() {
        let items = vec![
            item(1, true, Some("staff1")),
            item(2, false, None),
            item(3, false, None),
        ];
        assert!(!all_complete_after_change(&items, &completing(3, "staff1")));
    }

    #[test]
    fn test_uncompleting_breaks_aggregate() {
        let items = vec![item(1, true, Some("staff1")), item(2, true, Some("staff2"))];
        let change = ItemCompletionChange {
            item_id: 2,
            is_completed: false,
            completed_by: None,
            completed_date: None,
        };
        assert!(!all_complete_after_change(&items, &change));
    }

    #[test]
    fn test_empty_checklist_is_vacuously_complete() {
        // A zero-item form only matters for explicit approval; auto-advance
        // fires on item completion events, which an empty checklist never has.
        let items: Vec<ClearanceItem> = vec![];
        let change = completing(99, "staff1");
        assert!(all_complete_after_change(&items, &change));
    }
}
