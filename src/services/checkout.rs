//! Checkout workflow coordinator implementation
//!
//! Orchestrates the cross-entity side effects of checkout form lifecycle
//! events: submitting a form puts the resident in-progress straight away
//! (the form itself starts pending), and deleting a resident's last form
//! resets their checkout status to pending.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::database::repositories::{CheckoutFormRepository, ResidentRepository};
use crate::models::checkout::{CheckoutForm, CreateCheckoutFormRequest, FormStatus, UpdateCheckoutFormRequest};
use crate::models::resident::CheckoutStatus;
use crate::utils::errors::{DormHubError, Result};
use crate::utils::helpers;
use crate::utils::logging;

/// Checkout service coordinating forms and resident status
#[derive(Clone)]
pub struct CheckoutService {
    form_repository: CheckoutFormRepository,
    resident_repository: ResidentRepository,
    settings: Settings,
}

impl CheckoutService {
    /// Create a new CheckoutService instance
    pub fn new(
        form_repository: CheckoutFormRepository,
        resident_repository: ResidentRepository,
        settings: Settings,
    ) -> Self {
        Self {
            form_repository,
            resident_repository,
            settings,
        }
    }

    /// Submit a new checkout form.
    ///
    /// The form starts at `pending` with its clearance items (the caller's
    /// list, or the configured defaults when none are given), the submission
    /// date is stamped, and the resident's checkout status is set to
    /// `in-progress` immediately.
    pub async fn create_form(&self, request: CreateCheckoutFormRequest) -> Result<CheckoutForm> {
        debug!(resident_id = request.resident_id, "Creating checkout form");

        helpers::require_field("Reason", &request.reason)?;
        validate_times(&request.intended_time, &request.return_time)?;
        helpers::validate_checkout_window(request.intended_date, request.return_date)?;

        let resident_id = request.resident_id;
        self.resident_repository
            .find_by_id(resident_id)
            .await?
            .ok_or(DormHubError::ResidentNotFound { resident_id })?;

        let item_names = match request.clearance_items {
            Some(names) if !names.is_empty() => {
                for name in &names {
                    helpers::require_field("Clearance item name", name)?;
                }
                names
            }
            _ => self.settings.checkout.default_clearance_items.clone(),
        };

        let form = self
            .form_repository
            .create_with_items(
                resident_id,
                &request.reason,
                request.intended_date,
                &request.intended_time,
                request.return_date,
                &request.return_time,
                request.notes.as_deref(),
                helpers::current_date(),
                &item_names,
                CheckoutStatus::InProgress,
            )
            .await?;

        info!(
            form_id = form.id,
            resident_id = resident_id,
            item_count = form.clearance_items.len(),
            "Checkout form submitted"
        );
        logging::log_form_action(form.id, "created", None, None);

        Ok(form)
    }

    /// Update editable form details (reason, dates, times, notes).
    ///
    /// Status, submission date, and approval fields are never touched here.
    pub async fn update_details(
        &self,
        form_id: i64,
        request: UpdateCheckoutFormRequest,
    ) -> Result<CheckoutForm> {
        debug!(form_id = form_id, "Updating checkout form details");

        let form = self
            .form_repository
            .find_by_id(form_id)
            .await?
            .ok_or(DormHubError::FormNotFound { form_id })?;

        if let Some(ref reason) = request.reason {
            helpers::require_field("Reason", reason)?;
        }
        if let Some(ref intended_time) = request.intended_time {
            validate_time("Intended time", intended_time)?;
        }
        if let Some(ref return_time) = request.return_time {
            validate_time("Return time", return_time)?;
        }

        let intended_date = request.intended_date.unwrap_or(form.intended_date);
        let return_date = request.return_date.unwrap_or(form.return_date);
        helpers::validate_checkout_window(intended_date, return_date)?;

        let updated = self.form_repository.update_details(form_id, request).await?;
        info!(form_id = form_id, "Checkout form details updated");

        Ok(updated)
    }

    /// Delete a checkout form.
    ///
    /// Only pending or rejected forms may be deleted. When the deleted form
    /// was the resident's last, the resident's checkout status resets to
    /// `pending`.
    pub async fn delete_form(&self, form_id: i64) -> Result<()> {
        debug!(form_id = form_id, "Deleting checkout form");

        let form = self
            .form_repository
            .find_by_id(form_id)
            .await?
            .ok_or(DormHubError::FormNotFound { form_id })?;

        if !matches!(form.status, FormStatus::Pending | FormStatus::Rejected) {
            warn!(
                form_id = form_id,
                status = %form.status,
                "Cannot delete form that is in progress, approved, or completed"
            );
            logging::log_blocked_operation("checkout_form", form_id, "delete on active form");
            return Err(DormHubError::FormNotDeletable {
                form_id,
                status: form.status.to_string(),
            });
        }

        self.form_repository.delete(form_id, form.resident_id).await?;
        info!(
            form_id = form_id,
            resident_id = form.resident_id,
            "Checkout form deleted"
        );

        Ok(())
    }

    /// Get a form by ID with its clearance items
    pub async fn get_form(&self, form_id: i64) -> Result<Option<CheckoutForm>> {
        debug!(form_id = form_id, "Getting checkout form");
        self.form_repository.find_by_id(form_id).await
    }

    /// List all forms, newest submission first
    pub async fn list_forms(&self) -> Result<Vec<CheckoutForm>> {
        debug!("Listing checkout forms");
        self.form_repository.list().await
    }

    /// List one resident's forms, newest submission first
    pub async fn list_forms_by_resident(&self, resident_id: i64) -> Result<Vec<CheckoutForm>> {
        debug!(resident_id = resident_id, "Listing checkout forms by resident");
        self.form_repository.list_by_resident(resident_id).await
    }

    /// Form counts keyed by status, for dashboard counters
    pub async fn count_by_status(&self) -> Result<HashMap<String, i64>> {
        let counts = self.form_repository.count_by_status().await?;

        let mut stats = HashMap::new();
        for (status, count) in counts {
            stats.insert(status.as_str().to_string(), count);
        }

        Ok(stats)
    }
}

fn validate_time(field: &str, value: &str) -> Result<()> {
    if !helpers::is_valid_time(value) {
        return Err(DormHubError::Validation(format!(
            "{} must be a 24-hour HH:MM value, got {}",
            field, value
        )));
    }
    Ok(())
}

fn validate_times(intended_time: &str, return_time: &str) -> Result<()> {
    validate_time("Intended time", intended_time)?;
    validate_time("Return time", return_time)?;
    Ok(())
}
