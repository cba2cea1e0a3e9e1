//! Admin dashboard: user directory with status control.

use leptos::prelude::*;

use crate::net::types::{AccountStatus, UserProfile};
use crate::pages::customer_dashboard::SignOutButton;
use crate::state::session::SessionState;

fn status_label(status: AccountStatus) -> &'static str {
    match status {
        AccountStatus::Pending => "pending",
        AccountStatus::Active => "active",
    }
}

fn toggled(status: AccountStatus) -> AccountStatus {
    match status {
        AccountStatus::Pending => AccountStatus::Active,
        AccountStatus::Active => AccountStatus::Pending,
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    let users = RwSignal::new(Vec::<(String, UserProfile)>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let refresh = RwSignal::new(0u32);

    #[cfg(feature = "csr")]
    {
        Effect::new(move || {
            refresh.get();
            loading.set(true);
            let platform = crate::net::active::platform();
            leptos::task::spawn_local(async move {
                match platform.store.list(crate::net::paths::USERS).await {
                    Ok(entries) => {
                        users.set(crate::net::types::parse_entries(entries));
                        error.set(None);
                    }
                    Err(e) => error.set(Some(e.user_message().to_owned())),
                }
                loading.set(false);
            });
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = &refresh;
        loading.set(false);
    }

    let identity = move || {
        session.get().user.map(|user| user.email).unwrap_or_else(|| "admin".to_owned())
    };

    let on_toggle_status = Callback::new(move |(uid, status): (String, AccountStatus)| {
        let next = toggled(status);
        #[cfg(feature = "csr")]
        {
            let platform = crate::net::active::platform();
            leptos::task::spawn_local(async move {
                let patch = serde_json::json!({ "status": next });
                let path = crate::net::paths::user_profile(&uid);
                match platform.store.write(&path, patch, true).await {
                    Ok(()) => refresh.update(|n| *n += 1),
                    Err(e) => error.set(Some(e.user_message().to_owned())),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (uid, next);
        }
    });

    view! {
        <div class="dashboard-page dashboard-page--admin">
            <header class="dashboard-page__header toolbar">
                <span class="toolbar__brand">"Tripdeck Admin"</span>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__self">{identity}</span>
                <SignOutButton/>
            </header>

            <div class="dashboard-page__body">
                <h2>"Users"</h2>
                <Show when=move || error.get().is_some()>
                    <p class="dashboard-page__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || !loading.get() fallback=|| view! { <p>"Loading users..."</p> }>
                    <table class="user-table">
                        <thead>
                            <tr>
                                <th>"Email"</th>
                                <th>"Role"</th>
                                <th>"Status"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                users
                                    .get()
                                    .into_iter()
                                    .map(|(uid, profile)| {
                                        let status = profile.status;
                                        view! {
                                            <tr class="user-table__row">
                                                <td>{profile.email.clone()}</td>
                                                <td>{profile.role.as_str()}</td>
                                                <td class="user-table__status">
                                                    {status_label(status)}
                                                </td>
                                                <td>
                                                    <button
                                                        class="btn user-table__toggle"
                                                        on:click=move |_| on_toggle_status.run((uid.clone(), status))
                                                    >
                                                        {move || {
                                                            if status == AccountStatus::Pending {
                                                                "Approve"
                                                            } else {
                                                                "Suspend"
                                                            }
                                                        }}
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </tbody>
                    </table>
                </Show>
            </div>
        </div>
    }
}
