//! Route-guard decision logic.
//!
//! DESIGN
//! ======
//! Guards are pure functions from session state and route metadata to a
//! [`RouteDecision`]; the wrapper components in `components::guard` only
//! execute the decision. Re-evaluation happens solely when session state
//! changes, so calling a guard twice with the same inputs always yields the
//! same decision.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::auth::role::RoleClass;
use crate::state::session::SessionState;

/// Outcome of evaluating a guard for one render pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session not yet resolved; show a placeholder.
    Loading,
    /// Not signed in; go to login and remember where we came from.
    RedirectToLogin { from: String },
    /// Signed in but not allowed here; go to this path instead.
    Redirect(&'static str),
    /// Allowed; render the requested view.
    Render,
}

/// Gate for a protected route. `allowed` is the set of coarse role buckets
/// the route admits; `location` is the path being visited, kept for the
/// post-login bounce-back.
#[must_use]
pub fn decide_protected(
    session: &SessionState,
    allowed: &[RoleClass],
    location: &str,
) -> RouteDecision {
    if session.loading {
        return RouteDecision::Loading;
    }
    if session.user.is_none() {
        return RouteDecision::RedirectToLogin { from: location.to_owned() };
    }
    match session.role {
        Some(role) if allowed.contains(&role.coarsen()) => RouteDecision::Render,
        Some(role) => RouteDecision::Redirect(role.dashboard_path()),
        // Signed in but no resolvable role: nothing to authorize against.
        None => RouteDecision::Redirect("/"),
    }
}

/// Gate for the login/registration pages: an authenticated user with a known
/// role is sent to their dashboard instead of being allowed to re-register
/// or re-log-in.
#[must_use]
pub fn decide_auth_page(session: &SessionState) -> RouteDecision {
    if session.loading {
        return RouteDecision::Loading;
    }
    match (&session.user, session.role) {
        (Some(_), Some(role)) => RouteDecision::Redirect(role.dashboard_path()),
        _ => RouteDecision::Render,
    }
}
