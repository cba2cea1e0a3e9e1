//! Provider dashboard: listings management and profile deletion.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::Listing;
use crate::pages::customer_dashboard::SignOutButton;
use crate::state::session::SessionState;

#[component]
pub fn ProviderDashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();

    let listings = RwSignal::new(Vec::<(String, Listing)>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let show_create = RwSignal::new(false);
    let show_delete_profile = RwSignal::new(false);
    // Bumped to re-run the listing fetch after a mutation.
    let refresh = RwSignal::new(0u32);

    #[cfg(feature = "csr")]
    {
        Effect::new(move || {
            refresh.get();
            let Some(user) = session.get().user else {
                return;
            };
            loading.set(true);
            let platform = crate::net::active::platform();
            leptos::task::spawn_local(async move {
                match platform.store.list(&crate::net::paths::provider_listings(&user.uid)).await {
                    Ok(entries) => {
                        listings.set(crate::net::types::parse_entries(entries));
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
        session
            .get()
            .user
            .map(|user| user.email)
            .unwrap_or_else(|| "provider".to_owned())
    };

    let on_delete_listing = Callback::new(move |listing_id: String| {
        #[cfg(feature = "csr")]
        {
            let Some(user) = session.get_untracked().user else {
                return;
            };
            let platform = crate::net::active::platform();
            leptos::task::spawn_local(async move {
                let path = crate::net::paths::provider_listing(&user.uid, &listing_id);
                match platform.store.delete(&path).await {
                    Ok(()) => refresh.update(|n| *n += 1),
                    Err(e) => error.set(Some(e.user_message().to_owned())),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = listing_id;
        }
    });

    let on_delete_profile = Callback::new(move |()| {
        #[cfg(feature = "csr")]
        {
            let Some(user) = session.get_untracked().user else {
                return;
            };
            let platform = crate::net::active::platform();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = crate::auth::flow::delete_profile(
                    &*platform.auth,
                    &*platform.store,
                    &user.uid,
                )
                .await;
                match result {
                    Ok(()) => navigate("/", NavigateOptions::default()),
                    Err(e) => {
                        error.set(Some(e.user_message().to_owned()));
                        show_delete_profile.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = &navigate;
        }
    });

    view! {
        <div class="dashboard-page dashboard-page--provider">
            <header class="dashboard-page__header toolbar">
                <span class="toolbar__brand">"Tripdeck Partners"</span>
                <span class="toolbar__divider" aria-hidden="true"></span>
                <button class="btn toolbar__new-listing" on:click=move |_| show_create.set(true)>
                    "+ New Listing"
                </button>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__self">{identity}</span>
                <button
                    class="btn btn--danger toolbar__delete-profile"
                    on:click=move |_| show_delete_profile.set(true)
                >
                    "Delete Profile"
                </button>
                <SignOutButton/>
            </header>

            <div class="dashboard-page__body">
                <Show when=move || error.get().is_some()>
                    <p class="dashboard-page__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <p>"Loading listings..."</p> }
                >
                    <Show
                        when=move || !listings.get().is_empty()
                        fallback=|| {
                            view! {
                                <p class="dashboard-page__empty">
                                    "No listings yet. Create your first one."
                                </p>
                            }
                        }
                    >
                        <ul class="listings">
                            {move || {
                                listings
                                    .get()
                                    .into_iter()
                                    .map(|(id, listing)| {
                                        view! {
                                            <li class="listings__item">
                                                <span class="listings__title">{listing.title.clone()}</span>
                                                <span class="listings__meta">
                                                    {format!("{} - {}", listing.category, listing.city)}
                                                </span>
                                                <span class="listings__price">
                                                    {format!("{} / day", listing.price_per_day)}
                                                </span>
                                                <button
                                                    class="btn btn--danger listings__delete"
                                                    on:click=move |_| on_delete_listing.run(id.clone())
                                                >
                                                    "Delete"
                                                </button>
                                            </li>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                            }}
                        </ul>
                    </Show>
                </Show>
            </div>

            <Show when=move || show_create.get()>
                <CreateListingDialog
                    on_done=Callback::new(move |created| {
                        show_create.set(false);
                        if created {
                            refresh.update(|n| *n += 1);
                        }
                    })
                />
            </Show>
            <Show when=move || show_delete_profile.get()>
                <div class="dialog-backdrop" on:click=move |_| show_delete_profile.set(false)>
                    <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                        <h2>"Delete Profile"</h2>
                        <p class="dialog__danger">
                            "This permanently removes your provider profile and sign-in. Your listings become unreachable."
                        </p>
                        <div class="dialog__actions">
                            <button class="btn" on:click=move |_| show_delete_profile.set(false)>
                                "Cancel"
                            </button>
                            <button class="btn btn--danger" on:click=move |_| on_delete_profile.run(())>
                                "Delete"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

/// Modal dialog collecting a new listing.
#[component]
fn CreateListingDialog(on_done: Callback<bool>) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    let title = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let city = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let dialog_error = RwSignal::new(None::<&'static str>);

    let submit = move |_| {
        let parsed_price = price.get().trim().parse::<u64>().ok();
        if title.get().trim().is_empty()
            || category.get().trim().is_empty()
            || city.get().trim().is_empty()
        {
            dialog_error.set(Some("Fill in every field."));
            return;
        }
        let Some(parsed_price) = parsed_price else {
            dialog_error.set(Some("Price must be a whole number."));
            return;
        };

        #[cfg(feature = "csr")]
        {
            let Some(user) = session.get_untracked().user else {
                return;
            };
            let listing = Listing {
                title: title.get().trim().to_owned(),
                category: category.get().trim().to_lowercase(),
                city: city.get().trim().to_owned(),
                price_per_day: parsed_price,
                created_at: crate::util::time::now_millis(),
            };
            let platform = crate::net::active::platform();
            leptos::task::spawn_local(async move {
                let path = crate::net::paths::provider_listing(
                    &user.uid,
                    &uuid::Uuid::new_v4().to_string(),
                );
                let doc = match serde_json::to_value(&listing) {
                    Ok(doc) => doc,
                    Err(e) => {
                        log::warn!("listing encode failed: {e}");
                        return;
                    }
                };
                match platform.store.write(&path, doc, false).await {
                    Ok(()) => on_done.run(true),
                    Err(e) => {
                        log::warn!("listing write failed: {e}");
                        dialog_error.set(Some("Could not save the listing. Try again."));
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&session, parsed_price);
            on_done.run(false);
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_done.run(false)>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"New Listing"</h2>
                <Show when=move || dialog_error.get().is_some()>
                    <p class="dialog__danger">{move || dialog_error.get().unwrap_or_default()}</p>
                </Show>
                <label class="dialog__label">
                    "Title"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Category"
                    <input
                        class="dialog__input"
                        type="text"
                        placeholder="hotel, guide, transport..."
                        prop:value=move || category.get()
                        on:input=move |ev| category.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "City"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || city.get()
                        on:input=move |ev| city.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Price per day"
                    <input
                        class="dialog__input"
                        type="number"
                        prop:value=move || price.get()
                        on:input=move |ev| price.set(event_target_value(&ev))
                    />
                </label>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_done.run(false)>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=submit>
                        "Create"
                    </button>
                </div>
            </div>
        </div>
    }
}
