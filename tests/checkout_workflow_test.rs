//! Checkout workflow coordinator integration tests
//!
//! Covers form creation side effects, deletion rules, and the resident
//! status mirroring behavior.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serial_test::serial;

use chrono::NaiveDate;
use DormHub::filters::{form_matches, StatusFilter};
use DormHub::models::checkout::{FormStatus, UpdateCheckoutFormRequest};
use DormHub::models::resident::CheckoutStatus;
use DormHub::DormHubError;

#[tokio::test]
#[serial]
async fn test_create_form_defaults_and_side_effects() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let services = build_services(&db);

    let resident = services
        .resident_service
        .register(resident_request("S20001"))
        .await
        .unwrap();

    let form = services
        .checkout_service
        .create_form(form_request(resident.id, None))
        .await
        .unwrap();

    // Default checklist applies when no items are supplied
    let names: Vec<&str> = form.clearance_items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Room Inspection",
            "Property Inventory Check",
            "Key Return",
            "Payment Verification"
        ]
    );

    assert_eq!(form.status, FormStatus::Pending);
    assert!(form.approved_by.is_none());
    assert!(form.approval_date.is_none());

    // The resident goes in-progress the moment the form is submitted
    let resident = services
        .resident_service
        .get(resident.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resident.checkout_status, CheckoutStatus::InProgress);

    db.cleanup().await.expect("Failed to cleanup");
}

#[tokio::test]
#[serial]
async fn test_create_form_with_custom_items() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let services = build_services(&db);

    let resident = services
        .resident_service
        .register(resident_request("S20002"))
        .await
        .unwrap();

    let items = vec!["Bed Frame Check".to_string(), "Locker Return".to_string()];
    let form = services
        .checkout_service
        .create_form(form_request(resident.id, Some(items)))
        .await
        .unwrap();

    assert_eq!(form.clearance_items.len(), 2);
    assert!(form.clearance_items.iter().all(|item| !item.is_completed));

    db.cleanup().await.expect("Failed to cleanup");
}

#[tokio::test]
#[serial]
async fn test_create_form_validation() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let services = build_services(&db);

    let resident = services
        .resident_service
        .register(resident_request("S20003"))
        .await
        .unwrap();

    // Return date before the intended date is refused
    let mut request = form_request(resident.id, None);
    request.return_date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let err = services.checkout_service.create_form(request).await.unwrap_err();
    assert_matches!(err, DormHubError::Validation(_));

    // Malformed time is refused
    let mut request = form_request(resident.id, None);
    request.intended_time = "8am".to_string();
    let err = services.checkout_service.create_form(request).await.unwrap_err();
    assert_matches!(err, DormHubError::Validation(_));

    // Unknown resident is refused
    let request = form_request(999_999, None);
    let err = services.checkout_service.create_form(request).await.unwrap_err();
    assert_matches!(err, DormHubError::ResidentNotFound { .. });

    db.cleanup().await.expect("Failed to cleanup");
}

#[tokio::test]
#[serial]
async fn test_update_details_leaves_status_untouched() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let services = build_services(&db);

    let resident = services
        .resident_service
        .register(resident_request("S20004"))
        .await
        .unwrap();
    let form = services
        .checkout_service
        .create_form(form_request(resident.id, None))
        .await
        .unwrap();

    let updated = services
        .checkout_service
        .update_details(
            form.id,
            UpdateCheckoutFormRequest {
                reason: Some("Medical appointment".to_string()),
                notes: Some("Escort arranged".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.reason, "Medical appointment");
    assert_eq!(updated.notes.as_deref(), Some("Escort arranged"));
    assert_eq!(updated.status, FormStatus::Pending);
    assert_eq!(updated.submission_date, form.submission_date);

    // Shrinking the window below the intended date is refused
    let err = services
        .checkout_service
        .update_details(
            form.id,
            UpdateCheckoutFormRequest {
                return_date: NaiveDate::from_ymd_opt(2024, 3, 1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, DormHubError::Validation(_));

    db.cleanup().await.expect("Failed to cleanup");
}

#[tokio::test]
#[serial]
async fn test_delete_pending_form_resets_resident_status() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let services = build_services(&db);

    let resident = services
        .resident_service
        .register(resident_request("S20005"))
        .await
        .unwrap();
    let form = services
        .checkout_service
        .create_form(form_request(resident.id, None))
        .await
        .unwrap();

    services.checkout_service.delete_form(form.id).await.unwrap();

    assert!(services
        .checkout_service
        .get_form(form.id)
        .await
        .unwrap()
        .is_none());

    // Deleting the resident's only form resets their status to pending
    let resident = services
        .resident_service
        .get(resident.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resident.checkout_status, CheckoutStatus::Pending);

    db.cleanup().await.expect("Failed to cleanup");
}

#[tokio::test]
#[serial]
async fn test_delete_form_keeps_status_while_other_forms_remain() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let services = build_services(&db);

    let resident = services
        .resident_service
        .register(resident_request("S20006"))
        .await
        .unwrap();
    let first = services
        .checkout_service
        .create_form(form_request(resident.id, None))
        .await
        .unwrap();
    let _second = services
        .checkout_service
        .create_form(form_request(resident.id, None))
        .await
        .unwrap();

    services.checkout_service.delete_form(first.id).await.unwrap();

    let resident = services
        .resident_service
        .get(resident.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resident.checkout_status, CheckoutStatus::InProgress);

    db.cleanup().await.expect("Failed to cleanup");
}

#[tokio::test]
#[serial]
async fn test_delete_active_form_is_blocked() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let services = build_services(&db);

    let resident = services
        .resident_service
        .register(resident_request("S20007"))
        .await
        .unwrap();
    let items = vec!["Key Return".to_string()];
    let form = services
        .checkout_service
        .create_form(form_request(resident.id, Some(items)))
        .await
        .unwrap();

    let staff = staff_actor("staff1");
    services
        .clearance_service
        .request_status_change(form.id, FormStatus::InProgress, &staff)
        .await
        .unwrap();

    // In-progress forms cannot be deleted
    let err = services.checkout_service.delete_form(form.id).await.unwrap_err();
    assert_matches!(err, DormHubError::FormNotDeletable { .. });

    // Approved forms cannot be deleted either
    let form = services
        .clearance_service
        .set_item_completion(form.id, form.clearance_items[0].id, true, Some("staff1".to_string()))
        .await
        .unwrap();
    assert_eq!(form.status, FormStatus::Approved);
    let err = services.checkout_service.delete_form(form.id).await.unwrap_err();
    assert_matches!(err, DormHubError::FormNotDeletable { .. });

    db.cleanup().await.expect("Failed to cleanup");
}

#[tokio::test]
#[serial]
async fn test_delete_rejected_form_is_allowed() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let services = build_services(&db);

    let resident = services
        .resident_service
        .register(resident_request("S20008"))
        .await
        .unwrap();
    let form = services
        .checkout_service
        .create_form(form_request(resident.id, None))
        .await
        .unwrap();

    let staff = staff_actor("staff1");
    services
        .clearance_service
        .request_status_change(form.id, FormStatus::Rejected, &staff)
        .await
        .unwrap();

    services.checkout_service.delete_form(form.id).await.unwrap();
    assert!(services
        .checkout_service
        .get_form(form.id)
        .await
        .unwrap()
        .is_none());

    db.cleanup().await.expect("Failed to cleanup");
}

#[tokio::test]
#[serial]
async fn test_list_forms_newest_first_and_status_counts() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let services = build_services(&db);

    let resident = services
        .resident_service
        .register(resident_request("S20009"))
        .await
        .unwrap();
    let first = services
        .checkout_service
        .create_form(form_request(resident.id, None))
        .await
        .unwrap();
    let second = services
        .checkout_service
        .create_form(form_request(resident.id, None))
        .await
        .unwrap();

    let forms = services.checkout_service.list_forms().await.unwrap();
    assert_eq!(forms.len(), 2);
    assert_eq!(forms[0].id, second.id);
    assert_eq!(forms[1].id, first.id);

    let by_resident = services
        .checkout_service
        .list_forms_by_resident(resident.id)
        .await
        .unwrap();
    assert_eq!(by_resident.len(), 2);

    let staff = staff_actor("staff1");
    services
        .clearance_service
        .request_status_change(first.id, FormStatus::Rejected, &staff)
        .await
        .unwrap();

    let stats = services.checkout_service.count_by_status().await.unwrap();
    assert_eq!(stats.get("pending"), Some(&1));
    assert_eq!(stats.get("rejected"), Some(&1));

    db.cleanup().await.expect("Failed to cleanup");
}

#[tokio::test]
#[serial]
async fn test_role_scoped_form_listing() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let services = build_services(&db);

    let first = services
        .resident_service
        .register(resident_request("S20010"))
        .await
        .unwrap();
    let second = services
        .resident_service
        .register(resident_request("S20011"))
        .await
        .unwrap();

    services
        .checkout_service
        .create_form(form_request(first.id, None))
        .await
        .unwrap();
    services
        .checkout_service
        .create_form(form_request(second.id, None))
        .await
        .unwrap();

    let forms = services.checkout_service.list_forms().await.unwrap();
    let residents = services.resident_service.list().await.unwrap();
    let resident_for = |resident_id: i64| {
        residents
            .iter()
            .find(|r| r.id == resident_id)
            .expect("form references a resident")
    };

    // Staff see every form
    let staff = staff_actor("staff1");
    let visible: Vec<_> = forms
        .iter()
        .filter(|f| form_matches(f, resident_for(f.resident_id), &staff, "", StatusFilter::All))
        .collect();
    assert_eq!(visible.len(), 2);

    // A resident-role actor only sees their own form
    let own = resident_actor(&first.full_name(), first.id);
    let visible: Vec<_> = forms
        .iter()
        .filter(|f| form_matches(f, resident_for(f.resident_id), &own, "", StatusFilter::All))
        .collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].resident_id, first.id);

    // Free-text search joins the resident's denormalized fields
    let visible: Vec<_> = forms
        .iter()
        .filter(|f| {
            form_matches(
                f,
                resident_for(f.resident_id),
                &staff,
                &second.student_id.to_lowercase(),
                StatusFilter::All,
            )
        })
        .collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].resident_id, second.id);

    db.cleanup().await.expect("Failed to cleanup");
}
