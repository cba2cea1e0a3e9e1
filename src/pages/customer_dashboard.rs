//! Customer dashboard with service panels and the bookings list.
//!
//! SYSTEM CONTEXT
//! ==============
//! All customer deep links (`/flights`, `/hotels`, ..., `/my-bookings`)
//! resolve to this one guarded view; the active panel derives from the path
//! so the route table stays flat.

#[cfg(test)]
#[path = "customer_dashboard_test.rs"]
mod customer_dashboard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::net::types::Booking;
use crate::state::session::SessionState;

/// Service panels of the customer area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Panel {
    Flights,
    Hotels,
    Trains,
    Buses,
    Packages,
    Activities,
    Bookings,
}

impl Panel {
    pub const ALL: [Self; 7] = [
        Self::Flights,
        Self::Hotels,
        Self::Trains,
        Self::Buses,
        Self::Packages,
        Self::Activities,
        Self::Bookings,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Flights => "Flights",
            Self::Hotels => "Hotels",
            Self::Trains => "Trains",
            Self::Buses => "Buses",
            Self::Packages => "Packages",
            Self::Activities => "Activities",
            Self::Bookings => "My Bookings",
        }
    }

    fn path(self) -> &'static str {
        match self {
            Self::Flights => "/flights",
            Self::Hotels => "/hotels",
            Self::Trains => "/trains",
            Self::Buses => "/buses",
            Self::Packages => "/packages",
            Self::Activities => "/activities",
            Self::Bookings => "/my-bookings",
        }
    }
}

/// Which panel a path opens. `/customer-dashboard` and anything unrecognized
/// land on flights.
fn panel_for_path(path: &str) -> Panel {
    let path = path.trim_end_matches('/');
    Panel::ALL.into_iter().find(|panel| panel.path() == path).unwrap_or(Panel::Flights)
}

#[component]
pub fn CustomerDashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let location = use_location();
    let navigate = use_navigate();

    let panel = Memo::new(move |_| panel_for_path(&location.pathname.get()));

    let identity = move || {
        session
            .get()
            .user
            .map(|user| user.email)
            .unwrap_or_else(|| "traveler".to_owned())
    };

    view! {
        <div class="dashboard-page dashboard-page--customer">
            <header class="dashboard-page__header toolbar">
                <span class="toolbar__brand">"Tripdeck"</span>
                <span class="toolbar__divider" aria-hidden="true"></span>
                <nav class="toolbar__tabs">
                    {Panel::ALL
                        .into_iter()
                        .map(|tab| {
                            let navigate = navigate.clone();
                            view! {
                                <button
                                    class=move || {
                                        if panel.get() == tab {
                                            "toolbar__tab toolbar__tab--active"
                                        } else {
                                            "toolbar__tab"
                                        }
                                    }
                                    on:click=move |_| navigate(tab.path(), NavigateOptions::default())
                                >
                                    {tab.label()}
                                </button>
                            }
                        })
                        .collect::<Vec<_>>()}
                </nav>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__self">{identity}</span>
                <SignOutButton/>
            </header>

            <div class="dashboard-page__body">
                <Show
                    when=move || panel.get() == Panel::Bookings
                    fallback=move || view! { <SearchPanel panel=panel/> }
                >
                    <BookingsPanel/>
                </Show>
            </div>
        </div>
    }
}

/// Placeholder search surface for a service panel.
#[component]
fn SearchPanel(panel: Memo<Panel>) -> impl IntoView {
    view! {
        <section class="search-panel">
            <h2>{move || panel.get().label()}</h2>
            <p class="search-panel__hint">
                {move || format!("Search {} and book in a few clicks.", panel.get().label().to_lowercase())}
            </p>
            <div class="search-panel__form">
                <input class="search-panel__input" type="text" placeholder="From / destination"/>
                <input class="search-panel__input" type="date"/>
                <button class="btn btn--primary">"Search"</button>
            </div>
        </section>
    }
}

/// The signed-in customer's bookings, straight from the document store.
#[component]
fn BookingsPanel() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let bookings = RwSignal::new(Vec::<(String, Booking)>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    #[cfg(feature = "csr")]
    {
        let requested = RwSignal::new(false);
        Effect::new(move || {
            if requested.get() {
                return;
            }
            let Some(user) = session.get().user else {
                return;
            };
            requested.set(true);
            let platform = crate::net::active::platform();
            leptos::task::spawn_local(async move {
                match platform.store.list(&crate::net::paths::user_bookings(&user.uid)).await {
                    Ok(entries) => bookings.set(crate::net::types::parse_entries(entries)),
                    Err(e) => error.set(Some(e.user_message().to_owned())),
                }
                loading.set(false);
            });
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = &session;
        loading.set(false);
    }

    view! {
        <section class="bookings-panel">
            <h2>"My Bookings"</h2>
            <Show when=move || error.get().is_some()>
                <p class="bookings-panel__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show
                when=move || !loading.get()
                fallback=|| view! { <p>"Loading bookings..."</p> }
            >
                <Show
                    when=move || !bookings.get().is_empty()
                    fallback=|| view! { <p class="bookings-panel__empty">"No bookings yet."</p> }
                >
                    <ul class="bookings-panel__list">
                        {move || {
                            bookings
                                .get()
                                .into_iter()
                                .map(|(id, booking)| {
                                    view! {
                                        <li class="bookings-panel__item" data-booking-id=id>
                                            <span class="bookings-panel__kind">{booking.kind.clone()}</span>
                                            <span class="bookings-panel__title">{booking.title.clone()}</span>
                                            <span class="bookings-panel__date">{booking.date.clone()}</span>
                                            <span class="bookings-panel__status">{booking.status.clone()}</span>
                                        </li>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </ul>
                </Show>
            </Show>
        </section>
    }
}

/// Shared sign-out control for dashboard headers.
#[component]
pub fn SignOutButton() -> impl IntoView {
    let navigate = use_navigate();

    let on_sign_out = move |_| {
        #[cfg(feature = "csr")]
        {
            let platform = crate::net::active::platform();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                if let Err(error) = crate::auth::flow::sign_out(&*platform.auth).await {
                    log::warn!("sign-out failed: {error}");
                }
                navigate("/login", NavigateOptions::default());
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = &navigate;
        }
    };

    view! {
        <button class="btn toolbar__logout" on:click=on_sign_out title="Sign out">
            "Sign Out"
        </button>
    }
}
