//! Checkout form and clearance item models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

use super::resident::CheckoutStatus;

/// Status of a checkout form.
///
/// Forms move `pending -> in-progress -> {approved, rejected}` and
/// `approved -> completed`; `pending` may also be rejected directly.
/// `rejected` and `completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum FormStatus {
    Pending,
    InProgress,
    Approved,
    Rejected,
    Completed,
}

impl FormStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormStatus::Pending => "pending",
            FormStatus::InProgress => "in-progress",
            FormStatus::Approved => "approved",
            FormStatus::Rejected => "rejected",
            FormStatus::Completed => "completed",
        }
    }

    /// Terminal states admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, FormStatus::Rejected | FormStatus::Completed)
    }

    /// Whether `target` is a legal next status from this one
    pub fn can_transition_to(&self, target: FormStatus) -> bool {
        matches!(
            (self, target),
            (FormStatus::Pending, FormStatus::InProgress)
                | (FormStatus::Pending, FormStatus::Rejected)
                | (FormStatus::InProgress, FormStatus::Approved)
                | (FormStatus::InProgress, FormStatus::Rejected)
                | (FormStatus::Approved, FormStatus::Completed)
        )
    }

    /// Statuses that record an approver and stamp the approval date
    pub fn records_approver(&self) -> bool {
        matches!(
            self,
            FormStatus::InProgress | FormStatus::Approved | FormStatus::Completed
        )
    }
}

impl std::fmt::Display for FormStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<FormStatus> for CheckoutStatus {
    fn from(status: FormStatus) -> Self {
        match status {
            FormStatus::Pending => CheckoutStatus::Pending,
            FormStatus::InProgress => CheckoutStatus::InProgress,
            FormStatus::Approved => CheckoutStatus::Approved,
            FormStatus::Rejected => CheckoutStatus::Rejected,
            FormStatus::Completed => CheckoutStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClearanceItem {
    pub id: i64,
    pub checkout_form_id: i64,
    pub name: String,
    pub is_completed: bool,
    pub completed_by: Option<String>,
    pub completed_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClearanceItem {
    /// An item counts as complete only when it is checked off and carries
    /// the name of whoever completed it.
    pub fn is_complete(&self) -> bool {
        self.is_completed && self.completed_by.as_deref().map_or(false, |by| !by.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CheckoutForm {
    pub id: i64,
    pub resident_id: i64,
    pub reason: String,
    pub intended_date: NaiveDate,
    pub intended_time: String,
    pub return_date: NaiveDate,
    pub return_time: String,
    pub submission_date: NaiveDate,
    pub status: FormStatus,
    pub notes: Option<String>,
    pub approved_by: Option<String>,
    pub approval_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    pub clearance_items: Vec<ClearanceItem>,
}

impl CheckoutForm {
    pub fn all_items_complete(&self) -> bool {
        self.clearance_items.iter().all(|item| item.is_complete())
    }

    pub fn completed_item_count(&self) -> usize {
        self.clearance_items
            .iter()
            .filter(|item| item.is_complete())
            .count()
    }
}

/// Aggregate completion of a form's clearance checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearanceProgress {
    pub completed: usize,
    pub total: usize,
}

impl ClearanceProgress {
    /// Completion percentage for display; an empty checklist reads as 0%
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.completed as f64 / self.total as f64) * 100.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckoutFormRequest {
    pub resident_id: i64,
    pub reason: String,
    pub intended_date: NaiveDate,
    pub intended_time: String,
    pub return_date: NaiveDate,
    pub return_time: String,
    pub notes: Option<String>,
    /// Clearance item names; when absent the configured defaults are used
    pub clearance_items: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCheckoutFormRequest {
    pub reason: Option<String>,
    pub intended_date: Option<NaiveDate>,
    pub intended_time: Option<String>,
    pub return_date: Option<NaiveDate>,
    pub return_time: Option<String>,
    pub notes: Option<String>,
}
