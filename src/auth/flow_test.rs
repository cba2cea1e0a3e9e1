use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::memory::{MemoryAuth, MemoryStore};
use crate::net::types::FederatedPrincipal;

fn customer_form() -> CustomerRegistration {
    CustomerRegistration {
        first_name: "Asha".to_owned(),
        last_name: "Rao".to_owned(),
        mobile: "0123456789".to_owned(),
        email: "a@b.com".to_owned(),
        password: "secret1".to_owned(),
        confirm_password: "secret1".to_owned(),
    }
}

fn provider_form(kind: ProviderKind) -> ProviderRegistration {
    ProviderRegistration {
        first_name: "Meera".to_owned(),
        last_name: "Iyer".to_owned(),
        mobile: "9876543210".to_owned(),
        company_name: "Seaview Stays".to_owned(),
        kind: Some(kind),
        license_number: "LIC-204".to_owned(),
        hotel_registration_id: "HR-991".to_owned(),
        vehicle_fleet_size: "12".to_owned(),
        email: "p@q.com".to_owned(),
        password: "secret1".to_owned(),
        confirm_password: "secret1".to_owned(),
    }
}

// -----------------------------------------------------------------------------
// Submit guard
// -----------------------------------------------------------------------------

#[test]
fn submit_phase_ignores_reentrant_begin() {
    let mut phase = SubmitPhase::default();
    assert!(phase.try_begin());
    assert!(phase.is_submitting());
    assert!(!phase.try_begin());

    phase.finish(false);
    assert_eq!(phase, SubmitPhase::Idle);
    assert!(phase.try_begin());
    phase.finish(true);
    assert_eq!(phase, SubmitPhase::Done);
}

// -----------------------------------------------------------------------------
// Customer registration
// -----------------------------------------------------------------------------

#[test]
fn customer_registration_writes_pending_profile() {
    let auth = MemoryAuth::new();
    let store = MemoryStore::new();

    let principal =
        block_on(register_customer(&auth, &store, &customer_form(), 1_000)).unwrap();

    let doc = store.get(&format!("users/{}", principal.uid)).unwrap();
    assert_eq!(doc["email"], "a@b.com");
    assert_eq!(doc["role"], "customer");
    assert_eq!(doc["status"], "pending");
    assert_eq!(doc["first_name"], "Asha");
    assert_eq!(doc["registered_at"], 1_000);
}

#[test]
fn customer_registration_rejects_password_mismatch_locally() {
    let auth = MemoryAuth::new();
    let store = MemoryStore::new();
    let mut form = customer_form();
    form.confirm_password = "different".to_owned();

    let result = block_on(register_customer(&auth, &store, &form, 0));

    match result {
        Err(FlowError::Invalid(errors)) => {
            assert_eq!(errors.confirm_password, Some("Passwords do not match."));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert_eq!(auth.create_calls(), 0);
}

#[test]
fn duplicate_email_surfaces_mapped_message() {
    let auth = MemoryAuth::new();
    auth.seed_account("a@b.com", "whatever");
    let store = MemoryStore::new();

    let result = block_on(register_customer(&auth, &store, &customer_form(), 0));

    match result {
        Err(FlowError::Platform(error)) => {
            assert_eq!(error, PlatformError::EmailInUse);
            assert_eq!(error.user_message(), "An account with this email already exists.");
        }
        other => panic!("expected platform failure, got {other:?}"),
    }
}

#[test]
fn profile_write_failure_deletes_the_fresh_credential() {
    let auth = MemoryAuth::new();
    let store = MemoryStore::new();
    store.fail_write(Some(PlatformError::PermissionDenied));

    let result = block_on(register_customer(&auth, &store, &customer_form(), 0));

    assert_eq!(result, Err(FlowError::Platform(PlatformError::PermissionDenied)));
    assert!(!auth.account_exists("a@b.com"));
    assert_eq!(auth.deleted_uids().len(), 1);
    assert_eq!(store.get(&format!("users/{}", auth.deleted_uids()[0])), None);
}

#[test]
fn failed_compensating_delete_still_surfaces_the_write_error() {
    let auth = MemoryAuth::new();
    let store = MemoryStore::new();
    store.fail_write(Some(PlatformError::PermissionDenied));
    auth.fail_delete(Some(PlatformError::Unavailable));

    let result = block_on(register_customer(&auth, &store, &customer_form(), 0));

    // The write error wins; the orphaned credential is an accepted gap.
    assert_eq!(result, Err(FlowError::Platform(PlatformError::PermissionDenied)));
    assert!(auth.account_exists("a@b.com"));
}

// -----------------------------------------------------------------------------
// Provider registration
// -----------------------------------------------------------------------------

#[test]
fn hotel_provider_without_registration_id_aborts_before_network() {
    let auth = MemoryAuth::new();
    let store = MemoryStore::new();
    let mut form = provider_form(ProviderKind::Hotel);
    form.hotel_registration_id = String::new();

    let result = block_on(register_provider(&auth, &store, &form, 0));

    match result {
        Err(FlowError::Invalid(errors)) => {
            assert_eq!(errors.hotel_registration_id, Some("Hotel registration ID is required."));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert_eq!(auth.create_calls(), 0);
}

#[test]
fn provider_registration_writes_subtyped_role() {
    let auth = MemoryAuth::new();
    let store = MemoryStore::new();

    let principal =
        block_on(register_provider(&auth, &store, &provider_form(ProviderKind::Hotel), 5)).unwrap();

    let doc = store.get(&format!("users/{}", principal.uid)).unwrap();
    assert_eq!(doc["role"], "hotel_provider");
    assert_eq!(doc["provider_kind"], "hotel");
    assert_eq!(doc["company_name"], "Seaview Stays");
    assert_eq!(doc["hotel_registration_id"], "HR-991");
    assert_eq!(doc["status"], "pending");
    assert!(doc.get("license_number").is_none());
}

#[test]
fn transport_provider_requires_numeric_fleet_size() {
    let mut form = provider_form(ProviderKind::Transport);
    form.vehicle_fleet_size = "many".to_owned();
    let errors = form.validate_step(ProviderStep::Service);
    assert_eq!(errors.vehicle_fleet_size, Some("Fleet size must be a positive number."));

    form.vehicle_fleet_size = "0".to_owned();
    let errors = form.validate_step(ProviderStep::Service);
    assert_eq!(errors.vehicle_fleet_size, Some("Fleet size must be a positive number."));
}

#[test]
fn transport_provider_profile_carries_license_and_fleet() {
    let auth = MemoryAuth::new();
    let store = MemoryStore::new();

    let principal =
        block_on(register_provider(&auth, &store, &provider_form(ProviderKind::Transport), 0))
            .unwrap();

    let doc = store.get(&format!("users/{}", principal.uid)).unwrap();
    assert_eq!(doc["role"], "transport_provider");
    assert_eq!(doc["license_number"], "LIC-204");
    assert_eq!(doc["vehicle_fleet_size"], 12);
}

#[test]
fn missing_kind_fails_the_service_step() {
    let mut form = provider_form(ProviderKind::Guide);
    form.kind = None;
    let errors = form.validate_step(ProviderStep::Service);
    assert_eq!(errors.kind, Some("Select a service category."));
}

#[test]
fn contact_step_uses_strict_mobile_rule() {
    let mut form = provider_form(ProviderKind::Guide);
    form.mobile = "0123456789".to_owned(); // valid generally, bad prefix
    let errors = form.validate_step(ProviderStep::Contact);
    assert_eq!(errors.mobile, Some("Mobile number must be 10-15 digits starting with 6-9."));
}

// -----------------------------------------------------------------------------
// Login
// -----------------------------------------------------------------------------

#[test]
fn login_resolves_role_and_destination() {
    let auth = MemoryAuth::new();
    let uid = auth.seed_account("a@b.com", "secret1");
    let store = MemoryStore::new();
    store.seed(&format!("users/{uid}"), json!({ "role": "admin" }));

    let form = LoginForm { email: "a@b.com".to_owned(), password: "secret1".to_owned() };
    let success = block_on(login(&auth, &store, &form)).unwrap();

    assert_eq!(success.role, RoleTag::Admin);
    assert_eq!(success.destination(None), "/admin-dashboard");
    assert_eq!(success.destination(Some("/my-bookings".to_owned())), "/my-bookings");
}

#[test]
fn wrong_password_maps_to_fixed_sentence_and_no_session() {
    let auth = MemoryAuth::new();
    auth.seed_account("a@b.com", "secret1");
    let store = MemoryStore::new();

    let form = LoginForm { email: "a@b.com".to_owned(), password: "nope123".to_owned() };
    let result = block_on(login(&auth, &store, &form));

    match result {
        Err(FlowError::Platform(error)) => {
            assert_eq!(error.user_message(), "Invalid email or password.");
        }
        other => panic!("expected platform failure, got {other:?}"),
    }
    assert_eq!(auth.current_principal(), None);
}

#[test]
fn malformed_email_fails_login_locally() {
    let auth = MemoryAuth::new();
    let store = MemoryStore::new();
    let form = LoginForm { email: "not-an-email".to_owned(), password: "secret1".to_owned() };

    match block_on(login(&auth, &store, &form)) {
        Err(FlowError::Invalid(errors)) => assert!(errors.email.is_some()),
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn login_with_missing_profile_defaults_to_customer() {
    let auth = MemoryAuth::new();
    auth.seed_account("new@b.com", "secret1");
    let store = MemoryStore::new();

    let form = LoginForm { email: "new@b.com".to_owned(), password: "secret1".to_owned() };
    let success = block_on(login(&auth, &store, &form)).unwrap();
    assert_eq!(success.role, RoleTag::Customer);
}

// -----------------------------------------------------------------------------
// Federated sign-in
// -----------------------------------------------------------------------------

fn federated(uid: &str, display_name: &str) -> FederatedPrincipal {
    FederatedPrincipal {
        principal: Principal { uid: uid.to_owned(), email: format!("{uid}@gmail.example") },
        display_name: display_name.to_owned(),
    }
}

#[test]
fn federated_first_time_creates_profile_from_display_name() {
    let auth = MemoryAuth::new();
    auth.script_federated(Ok(federated("g1", "Asha Devi Rao")));
    let store = MemoryStore::new();

    let success = block_on(federated_login(&auth, &store, RoleTag::Customer, 9)).unwrap();

    assert_eq!(success.role, RoleTag::Customer);
    let doc = store.get("users/g1").unwrap();
    assert_eq!(doc["first_name"], "Asha");
    assert_eq!(doc["last_name"], "Devi Rao");
    assert_eq!(doc["role"], "customer");
}

#[test]
fn federated_existing_profile_role_wins_over_selection() {
    let auth = MemoryAuth::new();
    auth.script_federated(Ok(federated("g2", "Admin Person")));
    let store = MemoryStore::new();
    store.seed("users/g2", json!({ "role": "admin" }));

    let success = block_on(federated_login(&auth, &store, RoleTag::Customer, 0)).unwrap();

    assert_eq!(success.role, RoleTag::Admin);
    // The stored document is untouched.
    assert_eq!(store.get("users/g2").unwrap(), json!({ "role": "admin" }));
}

#[test]
fn split_display_name_first_token_then_remainder() {
    assert_eq!(
        split_display_name("Asha Devi Rao"),
        (Some("Asha".to_owned()), Some("Devi Rao".to_owned()))
    );
    assert_eq!(split_display_name("Cher"), (Some("Cher".to_owned()), None));
    assert_eq!(split_display_name(""), (None, None));
    assert_eq!(split_display_name("   "), (None, None));
}

// -----------------------------------------------------------------------------
// Profile deletion
// -----------------------------------------------------------------------------

#[test]
fn delete_profile_removes_document_then_credential() {
    let auth = MemoryAuth::new();
    let store = MemoryStore::new();
    let principal =
        block_on(register_customer(&auth, &store, &customer_form(), 0)).unwrap();

    block_on(delete_profile(&auth, &store, &principal.uid)).unwrap();

    assert_eq!(store.get(&format!("users/{}", principal.uid)), None);
    assert!(!auth.account_exists("a@b.com"));
    assert_eq!(auth.current_principal(), None);
}

#[test]
fn delete_profile_keeps_credential_when_document_delete_fails() {
    let auth = MemoryAuth::new();
    let store = MemoryStore::new();
    let principal =
        block_on(register_customer(&auth, &store, &customer_form(), 0)).unwrap();
    store.fail_write(Some(PlatformError::PermissionDenied));

    let result = block_on(delete_profile(&auth, &store, &principal.uid));

    assert_eq!(result, Err(PlatformError::PermissionDenied));
    assert!(auth.account_exists("a@b.com"));
}

// -----------------------------------------------------------------------------
// Password reset
// -----------------------------------------------------------------------------

#[test]
fn forgot_password_with_empty_field_is_local_error() {
    let auth = MemoryAuth::new();
    let result = block_on(forgot_password(&auth, "   "));
    assert_eq!(result, Err(FlowError::Invalid("Enter your email address first.")));
    assert!(auth.reset_emails().is_empty());
}

#[test]
fn forgot_password_sends_to_typed_address() {
    let auth = MemoryAuth::new();
    block_on(forgot_password(&auth, " a@b.com ")).unwrap();
    assert_eq!(auth.reset_emails(), vec!["a@b.com".to_owned()]);
}
