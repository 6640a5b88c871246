//! Resident repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::resident::{CheckoutStatus, CreateResidentRequest, Resident, UpdateResidentRequest};
use crate::utils::errors::DormHubError;

#[derive(Debug, Clone)]
pub struct ResidentRepository {
    pool: PgPool,
}

impl ResidentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new resident; checkout status starts at `none`
    pub async fn create(&self, request: CreateResidentRequest) -> Result<Resident, DormHubError> {
        let resident = sqlx::query_as::<_, Resident>(
            r#"
            INSERT INTO residents (first_name, last_name, student_id, strand, grade_level, contact_number, room_number, checkout_status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, first_name, last_name, student_id, strand, grade_level, contact_number, room_number, checkout_status, created_at, updated_at
            "#
        )
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.student_id)
        .bind(request.strand)
        .bind(request.grade_level)
        .bind(request.contact_number)
        .bind(request.room_number)
        .bind(CheckoutStatus::None)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(resident)
    }

    /// Find resident by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Resident>, DormHubError> {
        let resident = sqlx::query_as::<_, Resident>(
            "SELECT id, first_name, last_name, student_id, strand, grade_level, contact_number, room_number, checkout_status, created_at, updated_at FROM residents WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(resident)
    }

    /// Find resident by student ID
    pub async fn find_by_student_id(&self, student_id: &str) -> Result<Option<Resident>, DormHubError> {
        let resident = sqlx::query_as::<_, Resident>(
            "SELECT id, first_name, last_name, student_id, strand, grade_level, contact_number, room_number, checkout_status, created_at, updated_at FROM residents WHERE student_id = $1"
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(resident)
    }

    /// Check whether a student ID is already taken, optionally excluding one resident
    pub async fn student_id_taken(&self, student_id: &str, exclude_id: Option<i64>) -> Result<bool, DormHubError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM residents WHERE student_id = $1 AND ($2::BIGINT IS NULL OR id != $2)"
        )
        .bind(student_id)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// Update resident
    pub async fn update(&self, id: i64, request: UpdateResidentRequest) -> Result<Resident, DormHubError> {
        let resident = sqlx::query_as::<_, Resident>(
            r#"
            UPDATE residents
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                student_id = COALESCE($4, student_id),
                strand = COALESCE($5, strand),
                grade_level = COALESCE($6, grade_level),
                contact_number = COALESCE($7, contact_number),
                room_number = COALESCE($8, room_number),
                updated_at = $9
            WHERE id = $1
            RETURNING id, first_name, last_name, student_id, strand, grade_level, contact_number, room_number, checkout_status, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(request.student_id)
        .bind(request.strand)
        .bind(request.grade_level)
        .bind(request.contact_number)
        .bind(request.room_number)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(resident)
    }

    /// Delete resident
    pub async fn delete(&self, id: i64) -> Result<(), DormHubError> {
        sqlx::query("DELETE FROM residents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List all residents ordered by last name
    pub async fn list(&self) -> Result<Vec<Resident>, DormHubError> {
        let residents = sqlx::query_as::<_, Resident>(
            "SELECT id, first_name, last_name, student_id, strand, grade_level, contact_number, room_number, checkout_status, created_at, updated_at FROM residents ORDER BY last_name ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(residents)
    }

    /// Count total residents
    pub async fn count(&self) -> Result<i64, DormHubError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM residents")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
