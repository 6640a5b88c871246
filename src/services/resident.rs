//! Resident service implementation
//!
//! This service handles resident registration, record maintenance, and the
//! business rules guarding resident data: student IDs stay unique, and a
//! resident referenced by checkout forms cannot be deleted.

use tracing::{debug, info, warn};

use crate::database::repositories::{CheckoutFormRepository, ResidentRepository};
use crate::models::resident::{CreateResidentRequest, Resident, UpdateResidentRequest};
use crate::utils::errors::{DormHubError, Result};
use crate::utils::helpers;
use crate::utils::logging;

/// Resident service for managing resident records
#[derive(Clone)]
pub struct ResidentService {
    resident_repository: ResidentRepository,
    form_repository: CheckoutFormRepository,
}

impl ResidentService {
    /// Create a new ResidentService instance
    pub fn new(
        resident_repository: ResidentRepository,
        form_repository: CheckoutFormRepository,
    ) -> Self {
        Self {
            resident_repository,
            form_repository,
        }
    }

    /// Register a new resident; checkout status starts at `none`
    pub async fn register(&self, request: CreateResidentRequest) -> Result<Resident> {
        debug!(student_id = %request.student_id, "Registering new resident");

        validate_resident_fields(
            &request.first_name,
            &request.last_name,
            &request.student_id,
            &request.strand,
            &request.contact_number,
            &request.room_number,
        )?;

        if self
            .resident_repository
            .student_id_taken(&request.student_id, None)
            .await?
        {
            warn!(student_id = %request.student_id, "Student ID already exists");
            return Err(DormHubError::DuplicateStudentId {
                student_id: request.student_id,
            });
        }

        let resident = self.resident_repository.create(request).await?;
        info!(
            resident_id = resident.id,
            student_id = %resident.student_id,
            "New resident registered successfully"
        );
        logging::log_resident_action(resident.id, "registered", Some(&resident.full_name()));

        Ok(resident)
    }

    /// Get resident by ID
    pub async fn get(&self, resident_id: i64) -> Result<Option<Resident>> {
        debug!(resident_id = resident_id, "Getting resident by ID");
        self.resident_repository.find_by_id(resident_id).await
    }

    /// Get resident by student ID
    pub async fn get_by_student_id(&self, student_id: &str) -> Result<Option<Resident>> {
        debug!(student_id = %student_id, "Getting resident by student ID");
        self.resident_repository.find_by_student_id(student_id).await
    }

    /// Update resident record fields.
    ///
    /// The student-ID uniqueness check excludes the resident itself, so
    /// re-submitting the current student ID succeeds.
    pub async fn update(&self, resident_id: i64, request: UpdateResidentRequest) -> Result<Resident> {
        debug!(resident_id = resident_id, "Updating resident");

        self.resident_repository
            .find_by_id(resident_id)
            .await?
            .ok_or(DormHubError::ResidentNotFound { resident_id })?;

        validate_resident_update(&request)?;

        if let Some(ref student_id) = request.student_id {
            if self
                .resident_repository
                .student_id_taken(student_id, Some(resident_id))
                .await?
            {
                warn!(
                    resident_id = resident_id,
                    student_id = %student_id,
                    "Student ID already exists for another resident"
                );
                return Err(DormHubError::DuplicateStudentId {
                    student_id: student_id.clone(),
                });
            }
        }

        let resident = self.resident_repository.update(resident_id, request).await?;
        info!(resident_id = resident_id, "Resident updated successfully");

        Ok(resident)
    }

    /// Delete a resident; fails while any checkout form references them
    pub async fn delete(&self, resident_id: i64) -> Result<()> {
        debug!(resident_id = resident_id, "Deleting resident");

        self.resident_repository
            .find_by_id(resident_id)
            .await?
            .ok_or(DormHubError::ResidentNotFound { resident_id })?;

        let form_count = self.form_repository.count_for_resident(resident_id).await?;
        if form_count > 0 {
            warn!(
                resident_id = resident_id,
                form_count = form_count,
                "Cannot delete resident with checkout forms"
            );
            return Err(DormHubError::ResidentHasForms { resident_id });
        }

        self.resident_repository.delete(resident_id).await?;
        info!(resident_id = resident_id, "Resident deleted successfully");
        logging::log_resident_action(resident_id, "deleted", None);

        Ok(())
    }

    /// List all residents ordered by last name
    pub async fn list(&self) -> Result<Vec<Resident>> {
        debug!("Listing residents");
        self.resident_repository.list().await
    }

    /// Count total residents
    pub async fn count(&self) -> Result<i64> {
        self.resident_repository.count().await
    }
}

fn validate_resident_fields(
    first_name: &str,
    last_name: &str,
    student_id: &str,
    strand: &str,
    contact_number: &str,
    room_number: &str,
) -> Result<()> {
    helpers::require_field("First name", first_name)?;
    helpers::require_field("Last name", last_name)?;
    helpers::require_field("Student ID", student_id)?;
    helpers::require_field("Strand", strand)?;
    helpers::require_field("Room number", room_number)?;

    if !helpers::is_valid_contact_number(contact_number) {
        return Err(DormHubError::Validation(format!(
            "Invalid contact number: {}",
            contact_number
        )));
    }

    Ok(())
}

fn validate_resident_update(request: &UpdateResidentRequest) -> Result<()> {
    if let Some(ref first_name) = request.first_name {
        helpers::require_field("First name", first_name)?;
    }
    if let Some(ref last_name) = request.last_name {
        helpers::require_field("Last name", last_name)?;
    }
    if let Some(ref student_id) = request.student_id {
        helpers::require_field("Student ID", student_id)?;
    }
    if let Some(ref strand) = request.strand {
        helpers::require_field("Strand", strand)?;
    }
    if let Some(ref room_number) = request.room_number {
        helpers::require_field("Room number", room_number)?;
    }
    if let Some(ref contact_number) = request.contact_number {
        if !helpers::is_valid_contact_number(contact_number) {
            return Err(DormHubError::Validation(format!(
                "Invalid contact number: {}",
                contact_number
            )));
        }
    }

    Ok(())
}
