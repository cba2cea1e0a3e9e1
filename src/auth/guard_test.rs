use super::*;
use crate::auth::role::RoleTag;
use crate::net::types::Principal;

fn signed_in(role: RoleTag) -> SessionState {
    SessionState {
        user: Some(Principal { uid: "u1".to_owned(), email: "u1@example.com".to_owned() }),
        role: Some(role),
        loading: false,
    }
}

const CUSTOMER_ONLY: &[RoleClass] = &[RoleClass::Customer];
const ADMIN_ONLY: &[RoleClass] = &[RoleClass::Admin];
const PROVIDER_ONLY: &[RoleClass] = &[RoleClass::Provider];

#[test]
fn loading_session_shows_loader() {
    let session = SessionState::initial();
    assert_eq!(decide_protected(&session, CUSTOMER_ONLY, "/flights"), RouteDecision::Loading);
    assert_eq!(decide_auth_page(&session), RouteDecision::Loading);
}

#[test]
fn unauthenticated_visitor_is_sent_to_login_with_origin() {
    let session = SessionState::signed_out();
    assert_eq!(
        decide_protected(&session, CUSTOMER_ONLY, "/my-bookings"),
        RouteDecision::RedirectToLogin { from: "/my-bookings".to_owned() }
    );
}

#[test]
fn matching_role_renders() {
    assert_eq!(
        decide_protected(&signed_in(RoleTag::Customer), CUSTOMER_ONLY, "/customer-dashboard"),
        RouteDecision::Render
    );
    assert_eq!(
        decide_protected(&signed_in(RoleTag::Admin), ADMIN_ONLY, "/admin-dashboard"),
        RouteDecision::Render
    );
}

#[test]
fn provider_variants_all_reach_provider_routes() {
    for role in [
        RoleTag::ServiceProvider,
        RoleTag::GuideProvider,
        RoleTag::HotelProvider,
        RoleTag::TransportProvider,
    ] {
        assert_eq!(
            decide_protected(&signed_in(role), PROVIDER_ONLY, "/service-dashboard"),
            RouteDecision::Render
        );
    }
}

#[test]
fn mismatched_role_redirects_to_own_dashboard() {
    // An admin visiting the customer area lands on the admin dashboard.
    assert_eq!(
        decide_protected(&signed_in(RoleTag::Admin), CUSTOMER_ONLY, "/customer-dashboard"),
        RouteDecision::Redirect("/admin-dashboard")
    );
    assert_eq!(
        decide_protected(&signed_in(RoleTag::GuideProvider), CUSTOMER_ONLY, "/flights"),
        RouteDecision::Redirect("/service-dashboard")
    );
}

#[test]
fn authenticated_user_without_role_falls_back_to_root() {
    let session = SessionState {
        user: Some(Principal { uid: "u1".to_owned(), email: "u1@example.com".to_owned() }),
        role: None,
        loading: false,
    };
    assert_eq!(decide_protected(&session, CUSTOMER_ONLY, "/flights"), RouteDecision::Redirect("/"));
}

#[test]
fn decisions_are_idempotent_for_unchanged_state() {
    let session = signed_in(RoleTag::Customer);
    let first = decide_protected(&session, ADMIN_ONLY, "/admin-dashboard");
    let second = decide_protected(&session, ADMIN_ONLY, "/admin-dashboard");
    assert_eq!(first, second);

    let session = SessionState::signed_out();
    assert_eq!(decide_auth_page(&session), decide_auth_page(&session));
}

#[test]
fn auth_pages_bounce_signed_in_users_to_their_dashboard() {
    assert_eq!(
        decide_auth_page(&signed_in(RoleTag::Customer)),
        RouteDecision::Redirect("/customer-dashboard")
    );
    assert_eq!(
        decide_auth_page(&signed_in(RoleTag::HotelProvider)),
        RouteDecision::Redirect("/service-dashboard")
    );
}

#[test]
fn auth_pages_render_for_visitors() {
    assert_eq!(decide_auth_page(&SessionState::signed_out()), RouteDecision::Render);
}

#[test]
fn fail_closed_session_redirects_every_protected_route_to_login() {
    // After a resolver failure the controller settles on signed_out; any
    // protected route then goes to login.
    let session = SessionState::signed_out();
    for (allowed, path) in [
        (CUSTOMER_ONLY, "/customer-dashboard"),
        (PROVIDER_ONLY, "/service-dashboard"),
        (ADMIN_ONLY, "/admin-dashboard"),
    ] {
        assert_eq!(
            decide_protected(&session, allowed, path),
            RouteDecision::RedirectToLogin { from: path.to_owned() }
        );
    }
}
