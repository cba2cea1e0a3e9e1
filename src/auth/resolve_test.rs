use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::memory::MemoryStore;

#[test]
fn returns_stored_role_verbatim() {
    let store = MemoryStore::new();
    store.seed("users/u1", json!({ "email": "a@b.com", "role": "hotel_provider" }));
    assert_eq!(block_on(resolve_role(&store, "u1")), Ok(RoleTag::HotelProvider));
}

#[test]
fn missing_document_defaults_to_customer() {
    let store = MemoryStore::new();
    assert_eq!(block_on(resolve_role(&store, "nobody")), Ok(RoleTag::Customer));
}

#[test]
fn unrecognized_role_string_defaults_to_customer() {
    let store = MemoryStore::new();
    store.seed("users/u1", json!({ "role": "wizard" }));
    assert_eq!(block_on(resolve_role(&store, "u1")), Ok(RoleTag::Customer));
}

#[test]
fn document_without_role_field_defaults_to_customer() {
    let store = MemoryStore::new();
    store.seed("users/u1", json!({ "email": "a@b.com" }));
    assert_eq!(block_on(resolve_role(&store, "u1")), Ok(RoleTag::Customer));
}

#[test]
fn transport_failure_propagates() {
    let store = MemoryStore::new();
    store.fail_read(Some(PlatformError::Unavailable));
    assert_eq!(block_on(resolve_role(&store, "u1")), Err(PlatformError::Unavailable));
}

#[test]
fn permission_failure_propagates() {
    let store = MemoryStore::new();
    store.fail_read(Some(PlatformError::PermissionDenied));
    assert_eq!(block_on(resolve_role(&store, "u1")), Err(PlatformError::PermissionDenied));
}
