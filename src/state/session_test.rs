use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::memory::{MemoryAuth, MemoryStore};
use crate::net::platform::PlatformError;

fn platform_with(store: MemoryStore) -> Platform {
    Platform { auth: Rc::new(MemoryAuth::new()), store: Rc::new(store) }
}

fn collect() -> (Rc<RefCell<Vec<SessionState>>>, impl Fn(SessionState)) {
    let states = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&states);
    (states, move |state| sink.borrow_mut().push(state))
}

fn principal(uid: &str) -> Principal {
    Principal { uid: uid.to_owned(), email: format!("{uid}@example.com") }
}

#[test]
fn initial_state_is_loading() {
    let state = SessionState::initial();
    assert!(state.loading);
    assert_eq!(state.user, None);
    assert_eq!(state.role, None);
}

#[test]
fn null_principal_settles_signed_out_immediately() {
    let controller = SessionController::new(platform_with(MemoryStore::new()));
    let (states, emit) = collect();

    block_on(controller.apply_event(None, &emit));

    assert_eq!(states.borrow().as_slice(), &[SessionState::signed_out()]);
}

#[test]
fn resolved_role_settles_signed_in() {
    let store = MemoryStore::new();
    store.seed("users/u1", json!({ "role": "admin" }));
    let controller = SessionController::new(platform_with(store));
    let (states, emit) = collect();

    block_on(controller.apply_event(Some(principal("u1")), &emit));

    let states = states.borrow();
    assert_eq!(states.len(), 2);
    assert!(states[0].loading);
    assert_eq!(states[0].user, Some(principal("u1")));
    assert_eq!(
        states[1],
        SessionState { user: Some(principal("u1")), role: Some(RoleTag::Admin), loading: false }
    );
}

#[test]
fn missing_profile_defaults_to_customer() {
    let controller = SessionController::new(platform_with(MemoryStore::new()));
    let (states, emit) = collect();

    block_on(controller.apply_event(Some(principal("u1")), &emit));

    assert_eq!(states.borrow().last().unwrap().role, Some(RoleTag::Customer));
}

#[test]
fn resolver_failure_fails_closed() {
    let store = MemoryStore::new();
    store.fail_read(Some(PlatformError::Unavailable));
    let controller = SessionController::new(platform_with(store));
    let (states, emit) = collect();

    block_on(controller.apply_event(Some(principal("u1")), &emit));

    assert_eq!(*states.borrow().last().unwrap(), SessionState::signed_out());
}

#[test]
fn sequencer_discards_superseded_events() {
    let mut sequencer = SessionSequencer::default();
    let first = sequencer.begin();
    let second = sequencer.begin();
    assert!(!sequencer.is_current(first));
    assert!(sequencer.is_current(second));
}

#[test]
fn stale_resolution_is_not_applied() {
    // A sign-out event lands while the role lookup for an earlier sign-in is
    // still in flight. The lookup's result must be discarded.
    block_on(async {
        let store = MemoryStore::new();
        store.seed("users/u1", json!({ "role": "customer" }));
        store.delay_reads(1);
        let controller = SessionController::new(platform_with(store));
        let (states, emit) = collect();

        let stale = controller.apply_event(Some(principal("u1")), &emit);
        futures::pin_mut!(stale);
        // First poll emits the loading state and parks on the store read.
        assert!(futures::poll!(stale.as_mut()).is_pending());
        assert!(states.borrow().last().unwrap().loading);

        controller.apply_event(None, &emit).await;
        stale.await;

        assert_eq!(*states.borrow().last().unwrap(), SessionState::signed_out());
        assert!(states.borrow().iter().all(|s| s.role.is_none()));
    });
}
