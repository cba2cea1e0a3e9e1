//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `RwSignal<SessionState>` is provided at the app root. The session
//! controller is its only writer, driven by the platform's session-change
//! events; route guards and dashboards only read.
//!
//! TRADE-OFFS
//! ==========
//! Session events can arrive faster than role lookups resolve (rapid
//! sign-out/sign-in). Each event takes a monotonic sequence number and a
//! lookup result is applied only if its number is still the latest, so a
//! stale in-flight resolution can never clobber a newer session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::auth::resolve::resolve_role;
use crate::auth::role::RoleTag;
use crate::net::platform::{DocumentStore, Platform};
use crate::net::types::Principal;

/// Session snapshot read by guards and dashboards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<Principal>,
    pub role: Option<RoleTag>,
    pub loading: bool,
}

impl SessionState {
    /// State before the first session event resolves.
    #[must_use]
    pub fn initial() -> Self {
        Self { user: None, role: None, loading: true }
    }

    /// Signed-out (or fail-closed) state.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    fn signed_in(user: Principal, role: RoleTag) -> Self {
        Self { user: Some(user), role: Some(role), loading: false }
    }
}

/// Issues event sequence numbers and decides whether a result is current.
#[derive(Debug, Default)]
pub struct SessionSequencer {
    issued: u64,
}

impl SessionSequencer {
    /// Start a new event, superseding any in-flight one.
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Whether `seq` is still the latest issued event.
    #[must_use]
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.issued
    }
}

/// Applies platform session events to the session signal.
///
/// Owns the sequencer; the Leptos layer wires
/// [`SessionController::apply_event`] to the platform subscription and feeds
/// emitted states into the signal.
#[derive(Clone)]
pub struct SessionController {
    platform: Platform,
    sequencer: Rc<RefCell<SessionSequencer>>,
}

impl SessionController {
    #[must_use]
    pub fn new(platform: Platform) -> Self {
        Self { platform, sequencer: Rc::new(RefCell::new(SessionSequencer::default())) }
    }

    /// Handle one session-change event, emitting intermediate and final
    /// states through `emit`.
    ///
    /// A non-null principal emits a loading state, resolves the role, and
    /// emits the signed-in state; a failed resolution emits the signed-out
    /// state instead (an unresolvable role is never trusted with a route).
    /// Stale completions (superseded by a later event) emit nothing.
    pub async fn apply_event(&self, principal: Option<Principal>, emit: &dyn Fn(SessionState)) {
        let Some(principal) = principal else {
            self.sequencer.borrow_mut().begin();
            emit(SessionState::signed_out());
            return;
        };

        let seq = self.sequencer.borrow_mut().begin();
        emit(SessionState { user: Some(principal.clone()), role: None, loading: true });

        let resolved = resolve_role(self.store(), &principal.uid).await;
        if !self.sequencer.borrow().is_current(seq) {
            return;
        }
        match resolved {
            Ok(role) => emit(SessionState::signed_in(principal, role)),
            Err(error) => {
                log::warn!("role resolution failed for {}: {error}", principal.uid);
                emit(SessionState::signed_out());
            }
        }
    }

    fn store(&self) -> &dyn DocumentStore {
        &*self.platform.store
    }
}
