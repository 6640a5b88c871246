//! Checkout form repository implementation
//!
//! Every mutating operation that touches a form together with its clearance
//! items or its parent resident runs inside a single transaction, so a status
//! change, its timestamps, and the mirrored resident status either all apply
//! or none do.

use sqlx::PgPool;
use chrono::{NaiveDate, Utc};
use crate::models::checkout::{CheckoutForm, ClearanceItem, FormStatus, UpdateCheckoutFormRequest};
use crate::models::resident::CheckoutStatus;
use crate::utils::errors::DormHubError;

/// Field changes for a single clearance item, computed by the engine
#[derive(Debug, Clone)]
pub struct ItemCompletionChange {
    pub item_id: i64,
    pub is_completed: bool,
    pub completed_by: Option<String>,
    pub completed_date: Option<NaiveDate>,
}

/// Status advance applied alongside an item update when the checklist fills up
#[derive(Debug, Clone)]
pub struct StatusAdvance {
    pub form_id: i64,
    pub resident_id: i64,
    pub status: FormStatus,
    pub approval_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct CheckoutFormRepository {
    pool: PgPool,
}

impl CheckoutFormRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a checkout form with its clearance items and mirror the given
    /// status onto the resident, all in one transaction
    pub async fn create_with_items(
        &self,
        resident_id: i64,
        reason: &str,
        intended_date: NaiveDate,
        intended_time: &str,
        return_date: NaiveDate,
        return_time: &str,
        notes: Option<&str>,
        submission_date: NaiveDate,
        item_names: &[String],
        resident_status: CheckoutStatus,
    ) -> Result<CheckoutForm, DormHubError> {
        let mut tx = self.pool.begin().await?;

        let mut form = sqlx::query_as::<_, CheckoutForm>(
            r#"
            INSERT INTO checkout_forms (resident_id, reason, intended_date, intended_time, return_date, return_time, submission_date, status, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, resident_id, reason, intended_date, intended_time, return_date, return_time, submission_date, status, notes, approved_by, approval_date, created_at, updated_at
            "#
        )
        .bind(resident_id)
        .bind(reason)
        .bind(intended_date)
        .bind(intended_time)
        .bind(return_date)
        .bind(return_time)
        .bind(submission_date)
        .bind(FormStatus::Pending)
        .bind(notes)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for name in item_names {
            let item = sqlx::query_as::<_, ClearanceItem>(
                r#"
                INSERT INTO clearance_items (checkout_form_id, name, is_completed, created_at, updated_at)
                VALUES ($1, $2, FALSE, $3, $4)
                RETURNING id, checkout_form_id, name, is_completed, completed_by, completed_date, created_at, updated_at
                "#
            )
            .bind(form.id)
            .bind(name)
            .bind(Utc::now())
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

            form.clearance_items.push(item);
        }

        sqlx::query("UPDATE residents SET checkout_status = $2, updated_at = $3 WHERE id = $1")
            .bind(resident_id)
            .bind(resident_status)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(form)
    }

    /// Find a form by ID with its clearance items attached
    pub async fn find_by_id(&self, form_id: i64) -> Result<Option<CheckoutForm>, DormHubError> {
        let form = sqlx::query_as::<_, CheckoutForm>(
            "SELECT id, resident_id, reason, intended_date, intended_time, return_date, return_time, submission_date, status, notes, approved_by, approval_date, created_at, updated_at FROM checkout_forms WHERE id = $1"
        )
        .bind(form_id)
        .fetch_optional(&self.pool)
        .await?;

        match form {
            Some(mut form) => {
                form.clearance_items = self.items_for_form(form.id).await?;
                Ok(Some(form))
            }
            None => Ok(None),
        }
    }

    /// List all forms, newest submission first, items attached
    pub async fn list(&self) -> Result<Vec<CheckoutForm>, DormHubError> {
        let mut forms = sqlx::query_as::<_, CheckoutForm>(
            "SELECT id, resident_id, reason, intended_date, intended_time, return_date, return_time, submission_date, status, notes, approved_by, approval_date, created_at, updated_at FROM checkout_forms ORDER BY submission_date DESC, id DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        for form in &mut forms {
            form.clearance_items = self.items_for_form(form.id).await?;
        }

        Ok(forms)
    }

    /// List forms for one resident, newest submission first, items attached
    pub async fn list_by_resident(&self, resident_id: i64) -> Result<Vec<CheckoutForm>, DormHubError> {
        let mut forms = sqlx::query_as::<_, CheckoutForm>(
            "SELECT id, resident_id, reason, intended_date, intended_time, return_date, return_time, submission_date, status, notes, approved_by, approval_date, created_at, updated_at FROM checkout_forms WHERE resident_id = $1 ORDER BY submission_date DESC, id DESC"
        )
        .bind(resident_id)
        .fetch_all(&self.pool)
        .await?;

        for form in &mut forms {
            form.clearance_items = self.items_for_form(form.id).await?;
        }

        Ok(forms)
    }

    /// Count forms referencing a resident
    pub async fn count_for_resident(&self, resident_id: i64) -> Result<i64, DormHubError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM checkout_forms WHERE resident_id = $1")
            .bind(resident_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// Update editable form details; status and approval fields are untouched
    pub async fn update_details(&self, form_id: i64, request: UpdateCheckoutFormRequest) -> Result<CheckoutForm, DormHubError> {
        let mut form = sqlx::query_as::<_, CheckoutForm>(
            r#"
            UPDATE checkout_forms
            SET reason = COALESCE($2, reason),
                intended_date = COALESCE($3, intended_date),
                intended_time = COALESCE($4, intended_time),
                return_date = COALESCE($5, return_date),
                return_time = COALESCE($6, return_time),
                notes = COALESCE($7, notes),
                updated_at = $8
            WHERE id = $1
            RETURNING id, resident_id, reason, intended_date, intended_time, return_date, return_time, submission_date, status, notes, approved_by, approval_date, created_at, updated_at
            "#
        )
        .bind(form_id)
        .bind(request.reason)
        .bind(request.intended_date)
        .bind(request.intended_time)
        .bind(request.return_date)
        .bind(request.return_time)
        .bind(request.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        form.clearance_items = self.items_for_form(form.id).await?;
        Ok(form)
    }

    /// Apply a status change and mirror it onto the resident in one transaction.
    /// `approved_by` and `approval_date` are written verbatim as computed by
    /// the engine.
    pub async fn update_status(
        &self,
        form_id: i64,
        resident_id: i64,
        status: FormStatus,
        approved_by: Option<String>,
        approval_date: Option<NaiveDate>,
    ) -> Result<CheckoutForm, DormHubError> {
        let mut tx = self.pool.begin().await?;

        let mut form = sqlx::query_as::<_, CheckoutForm>(
            r#"
            UPDATE checkout_forms
            SET status = $2, approved_by = $3, approval_date = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, resident_id, reason, intended_date, intended_time, return_date, return_time, submission_date, status, notes, approved_by, approval_date, created_at, updated_at
            "#
        )
        .bind(form_id)
        .bind(status)
        .bind(approved_by)
        .bind(approval_date)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE residents SET checkout_status = $2, updated_at = $3 WHERE id = $1")
            .bind(resident_id)
            .bind(CheckoutStatus::from(status))
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        form.clearance_items = self.items_for_form(form.id).await?;
        Ok(form)
    }

    /// Apply an item completion change and, when the checklist filled up, the
    /// auto-advance to approved plus the resident mirror, in one transaction.
    /// The advance leaves `approved_by` as recorded by the transition into
    /// in-progress.
    pub async fn set_item_completion(
        &self,
        change: ItemCompletionChange,
        advance: Option<StatusAdvance>,
    ) -> Result<ClearanceItem, DormHubError> {
        let mut tx = self.pool.begin().await?;

        let item = sqlx::query_as::<_, ClearanceItem>(
            r#"
            UPDATE clearance_items
            SET is_completed = $2, completed_by = $3, completed_date = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, checkout_form_id, name, is_completed, completed_by, completed_date, created_at, updated_at
            "#
        )
        .bind(change.item_id)
        .bind(change.is_completed)
        .bind(change.completed_by)
        .bind(change.completed_date)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        if let Some(advance) = advance {
            sqlx::query("UPDATE checkout_forms SET status = $2, approval_date = $3, updated_at = $4 WHERE id = $1")
                .bind(advance.form_id)
                .bind(advance.status)
                .bind(advance.approval_date)
                .bind(Utc::now())
                .execute(&mut *tx)
                .await?;

            sqlx::query("UPDATE residents SET checkout_status = $2, updated_at = $3 WHERE id = $1")
                .bind(advance.resident_id)
                .bind(CheckoutStatus::from(advance.status))
                .bind(Utc::now())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(item)
    }

    /// Clearance items for a form, in creation order
    pub async fn items_for_form(&self, form_id: i64) -> Result<Vec<ClearanceItem>, DormHubError> {
        let items = sqlx::query_as::<_, ClearanceItem>(
            "SELECT id, checkout_form_id, name, is_completed, completed_by, completed_date, created_at, updated_at FROM clearance_items WHERE checkout_form_id = $1 ORDER BY id ASC"
        )
        .bind(form_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Add a clearance item to an existing form, initially incomplete
    pub async fn add_item(&self, form_id: i64, name: &str) -> Result<ClearanceItem, DormHubError> {
        let item = sqlx::query_as::<_, ClearanceItem>(
            r#"
            INSERT INTO clearance_items (checkout_form_id, name, is_completed, created_at, updated_at)
            VALUES ($1, $2, FALSE, $3, $4)
            RETURNING id, checkout_form_id, name, is_completed, completed_by, completed_date, created_at, updated_at
            "#
        )
        .bind(form_id)
        .bind(name)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Remove a clearance item
    pub async fn remove_item(&self, item_id: i64) -> Result<(), DormHubError> {
        sqlx::query("DELETE FROM clearance_items WHERE id = $1")
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Delete a form and its items; when the resident has no forms left,
    /// reset their checkout status to `pending`. One transaction.
    pub async fn delete(&self, form_id: i64, resident_id: i64) -> Result<(), DormHubError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM clearance_items WHERE checkout_form_id = $1")
            .bind(form_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM checkout_forms WHERE id = $1")
            .bind(form_id)
            .execute(&mut *tx)
            .await?;

        let remaining: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM checkout_forms WHERE resident_id = $1")
            .bind(resident_id)
            .fetch_one(&mut *tx)
            .await?;

        if remaining.0 == 0 {
            sqlx::query("UPDATE residents SET checkout_status = $2, updated_at = $3 WHERE id = $1")
                .bind(resident_id)
                .bind(CheckoutStatus::Pending)
                .bind(Utc::now())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Count forms per status
    pub async fn count_by_status(&self) -> Result<Vec<(FormStatus, i64)>, DormHubError> {
        let counts: Vec<(FormStatus, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM checkout_forms GROUP BY status"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }
}
