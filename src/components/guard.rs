//! Route-guard wrapper components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Thin executors for the decisions in `auth::guard`: they watch the session
//! signal, navigate on redirect decisions, and render children only when the
//! decision is `Render`. The remembered login origin lives here so the login
//! page can bounce the user back after signing in.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::auth::guard::{RouteDecision, decide_auth_page, decide_protected};
use crate::auth::role::RoleClass;
use crate::state::session::SessionState;

/// Where an unauthenticated visitor was headed before being sent to login.
/// Set by [`Protected`], consumed once by the login page.
#[derive(Clone, Copy)]
pub struct LoginOrigin(RwSignal<Option<String>>);

impl LoginOrigin {
    #[must_use]
    pub fn new() -> Self {
        Self(RwSignal::new(None))
    }

    pub fn remember(&self, from: String) {
        self.0.set(Some(from));
    }

    /// Take the remembered location, clearing it.
    #[must_use]
    pub fn take(&self) -> Option<String> {
        self.0.try_update(Option::take).flatten()
    }
}

impl Default for LoginOrigin {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap a route that only the given role buckets may see.
#[component]
pub fn Protected(allowed: &'static [RoleClass], children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let origin = expect_context::<LoginOrigin>();
    let location = use_location();
    let navigate = use_navigate();

    let decision =
        Memo::new(move |_| decide_protected(&session.get(), allowed, &location.pathname.get()));

    Effect::new(move || match decision.get() {
        RouteDecision::RedirectToLogin { from } => {
            origin.remember(from);
            navigate("/login", NavigateOptions::default());
        }
        RouteDecision::Redirect(path) => navigate(path, NavigateOptions::default()),
        RouteDecision::Loading | RouteDecision::Render => {}
    });

    view! {
        <Show
            when=move || decision.get() == RouteDecision::Render
            fallback=|| {
                view! {
                    <div class="guard-placeholder">
                        <p>"Loading..."</p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}

/// Wrap the login/registration routes: signed-in users with a known role are
/// sent to their dashboard instead.
#[component]
pub fn AuthGate(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| decide_auth_page(&session.get()));

    Effect::new(move || {
        if let RouteDecision::Redirect(path) = decision.get() {
            navigate(path, NavigateOptions::default());
        }
    });

    view! {
        <Show
            when=move || decision.get() == RouteDecision::Render
            fallback=|| {
                view! {
                    <div class="guard-placeholder">
                        <p>"Loading..."</p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}
