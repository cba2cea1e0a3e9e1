//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::auth::role::RoleClass;
use crate::components::guard::{AuthGate, LoginOrigin, Protected};
use crate::pages::admin_dashboard::AdminDashboardPage;
use crate::pages::customer_dashboard::CustomerDashboardPage;
use crate::pages::landing::LandingPage;
use crate::pages::login::LoginPage;
use crate::pages::provider_dashboard::ProviderDashboardPage;
use crate::pages::provider_register::ProviderRegisterPage;
use crate::pages::register::RegisterPage;
use crate::pages::select_role::SelectRolePage;
use crate::state::session::SessionState;

const CUSTOMER: &[RoleClass] = &[RoleClass::Customer];
const PROVIDER: &[RoleClass] = &[RoleClass::Provider];
const ADMIN: &[RoleClass] = &[RoleClass::Admin];

/// Root application component.
///
/// Installs the platform handles, provides the session signal (single
/// writer: the session subscription installed here), and declares the route
/// table with its guards.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::initial());
    provide_context(session);
    provide_context(LoginOrigin::new());

    #[cfg(feature = "csr")]
    {
        let platform =
            crate::net::rest::rest_platform(&crate::config::PlatformConfig::from_build_env());
        crate::net::active::install(platform.clone());

        let controller = crate::state::session::SessionController::new(platform.clone());
        let listener: crate::net::platform::SessionListener =
            std::rc::Rc::new(move |principal| {
                let controller = controller.clone();
                leptos::task::spawn_local(async move {
                    controller.apply_event(principal, &|state| session.set(state)).await;
                });
            });
        let subscription = platform.auth.subscribe_sessions(listener);
        on_cleanup(move || drop(subscription));
    }
    #[cfg(not(feature = "csr"))]
    {
        // No platform subscription off the browser; settle as signed out.
        session.set(SessionState::signed_out());
    }

    view! {
        <Stylesheet id="tripdeck" href="/styles.css"/>
        <Title text="Tripdeck"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route
                    path=StaticSegment("")
                    view=|| view! { <AuthGate><LandingPage/></AuthGate> }
                />
                <Route
                    path=StaticSegment("login")
                    view=|| view! { <AuthGate><LoginPage/></AuthGate> }
                />
                <Route
                    path=StaticSegment("register")
                    view=|| view! { <AuthGate><RegisterPage/></AuthGate> }
                />
                <Route
                    path=StaticSegment("select-provider-role")
                    view=|| view! { <AuthGate><SelectRolePage/></AuthGate> }
                />
                <Route
                    path=StaticSegment("register-provider")
                    view=|| view! { <AuthGate><ProviderRegisterPage/></AuthGate> }
                />

                <Route
                    path=StaticSegment("customer-dashboard")
                    view=|| view! { <Protected allowed=CUSTOMER><CustomerDashboardPage/></Protected> }
                />
                <Route
                    path=StaticSegment("my-bookings")
                    view=|| view! { <Protected allowed=CUSTOMER><CustomerDashboardPage/></Protected> }
                />
                <Route
                    path=StaticSegment("flights")
                    view=|| view! { <Protected allowed=CUSTOMER><CustomerDashboardPage/></Protected> }
                />
                <Route
                    path=StaticSegment("hotels")
                    view=|| view! { <Protected allowed=CUSTOMER><CustomerDashboardPage/></Protected> }
                />
                <Route
                    path=StaticSegment("trains")
                    view=|| view! { <Protected allowed=CUSTOMER><CustomerDashboardPage/></Protected> }
                />
                <Route
                    path=StaticSegment("buses")
                    view=|| view! { <Protected allowed=CUSTOMER><CustomerDashboardPage/></Protected> }
                />
                <Route
                    path=StaticSegment("packages")
                    view=|| view! { <Protected allowed=CUSTOMER><CustomerDashboardPage/></Protected> }
                />
                <Route
                    path=StaticSegment("activities")
                    view=|| view! { <Protected allowed=CUSTOMER><CustomerDashboardPage/></Protected> }
                />

                <Route
                    path=StaticSegment("service-dashboard")
                    view=|| view! { <Protected allowed=PROVIDER><ProviderDashboardPage/></Protected> }
                />
                <Route
                    path=StaticSegment("admin-dashboard")
                    view=|| view! { <Protected allowed=ADMIN><AdminDashboardPage/></Protected> }
                />
            </Routes>
        </Router>
    }
}
