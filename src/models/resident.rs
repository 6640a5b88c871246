//! Resident model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Checkout status mirrored onto a resident record.
///
/// Tracks the resident's current checkout form status, with `None` as the
/// resident-only sentinel for "no checkout activity".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CheckoutStatus {
    None,
    Pending,
    InProgress,
    Approved,
    Rejected,
    Completed,
}

impl CheckoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStatus::None => "none",
            CheckoutStatus::Pending => "pending",
            CheckoutStatus::InProgress => "in-progress",
            CheckoutStatus::Approved => "approved",
            CheckoutStatus::Rejected => "rejected",
            CheckoutStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for CheckoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Senior-high grade level of a resident
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum GradeLevel {
    #[sqlx(rename = "11")]
    #[serde(rename = "11")]
    Grade11,
    #[sqlx(rename = "12")]
    #[serde(rename = "12")]
    Grade12,
}

impl std::fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeLevel::Grade11 => f.write_str("11"),
            GradeLevel::Grade12 => f.write_str("12"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resident {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub student_id: String,
    pub strand: String,
    pub grade_level: GradeLevel,
    pub contact_number: String,
    pub room_number: String,
    pub checkout_status: CheckoutStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resident {
    /// Full display name, first name first
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResidentRequest {
    pub first_name: String,
    pub last_name: String,
    pub student_id: String,
    pub strand: String,
    pub grade_level: GradeLevel,
    pub contact_number: String,
    pub room_number: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateResidentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub student_id: Option<String>,
    pub strand: Option<String>,
    pub grade_level: Option<GradeLevel>,
    pub contact_number: Option<String>,
    pub room_number: Option<String>,
}
