//! Multi-step provider registration wizard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Three steps: contact and company details, service category with
//! kind-specific credentials, then account credentials. Each transition
//! validates the current step; the final submit re-validates everything
//! before any platform call.

#[cfg(test)]
#[path = "provider_register_test.rs"]
mod provider_register_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::auth::flow::{ProviderErrors, ProviderRegistration, ProviderStep, SubmitPhase};
use crate::auth::role::ProviderKind;
use crate::components::field::FormField;

fn step_number(step: ProviderStep) -> usize {
    match step {
        ProviderStep::Contact => 1,
        ProviderStep::Service => 2,
        ProviderStep::Credentials => 3,
    }
}

fn step_title(step: ProviderStep) -> &'static str {
    match step {
        ProviderStep::Contact => "Contact details",
        ProviderStep::Service => "Your service",
        ProviderStep::Credentials => "Account credentials",
    }
}

fn next_step(step: ProviderStep) -> Option<ProviderStep> {
    match step {
        ProviderStep::Contact => Some(ProviderStep::Service),
        ProviderStep::Service => Some(ProviderStep::Credentials),
        ProviderStep::Credentials => None,
    }
}

fn prev_step(step: ProviderStep) -> Option<ProviderStep> {
    match step {
        ProviderStep::Contact => None,
        ProviderStep::Service => Some(ProviderStep::Contact),
        ProviderStep::Credentials => Some(ProviderStep::Service),
    }
}

#[component]
pub fn ProviderRegisterPage() -> impl IntoView {
    let navigate = use_navigate();

    let step = RwSignal::new(ProviderStep::Contact);
    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let mobile = RwSignal::new(String::new());
    let company_name = RwSignal::new(String::new());
    let kind = RwSignal::new(None::<ProviderKind>);
    let license_number = RwSignal::new(String::new());
    let hotel_registration_id = RwSignal::new(String::new());
    let vehicle_fleet_size = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let errors = RwSignal::new(ProviderErrors::default());
    let form_error = RwSignal::new(None::<String>);
    let phase = RwSignal::new(SubmitPhase::default());

    let collect = move || ProviderRegistration {
        first_name: first_name.get(),
        last_name: last_name.get(),
        mobile: mobile.get(),
        company_name: company_name.get(),
        kind: kind.get(),
        license_number: license_number.get(),
        hotel_registration_id: hotel_registration_id.get(),
        vehicle_fleet_size: vehicle_fleet_size.get(),
        email: email.get(),
        password: password.get(),
        confirm_password: confirm_password.get(),
    };

    let on_next = move |_| {
        let current = step.get();
        let local = collect().validate_step(current);
        if !local.ok() {
            errors.set(local);
            return;
        }
        errors.set(ProviderErrors::default());
        if let Some(next) = next_step(current) {
            step.set(next);
        }
    };

    let on_back = move |_| {
        if let Some(prev) = prev_step(step.get()) {
            errors.set(ProviderErrors::default());
            step.set(prev);
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if step.get() != ProviderStep::Credentials {
            return;
        }
        if !phase.try_update(SubmitPhase::try_begin).unwrap_or(false) {
            return;
        }
        form_error.set(None);

        let form = collect();
        let local = form.validate();
        if !local.ok() {
            errors.set(local);
            phase.update(|p| p.finish(false));
            return;
        }
        errors.set(ProviderErrors::default());

        #[cfg(feature = "csr")]
        {
            let platform = crate::net::active::platform();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = crate::auth::flow::register_provider(
                    &*platform.auth,
                    &*platform.store,
                    &form,
                    crate::util::time::now_millis(),
                )
                .await;
                match result {
                    Ok(_) => {
                        phase.update(|p| p.finish(true));
                        navigate("/login?registered=1", NavigateOptions::default());
                    }
                    Err(crate::auth::flow::FlowError::Invalid(local)) => {
                        errors.set(local);
                        phase.update(|p| p.finish(false));
                    }
                    Err(crate::auth::flow::FlowError::Platform(error)) => {
                        form_error.set(Some(error.user_message().to_owned()));
                        phase.update(|p| p.finish(false));
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&navigate, form);
            phase.update(|p| p.finish(false));
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--wide">
                <h1>"Become a provider"</h1>
                <p class="auth-card__subtitle">
                    {move || format!("Step {} of 3 - {}", step_number(step.get()), step_title(step.get()))}
                </p>

                <Show when=move || form_error.get().is_some()>
                    <p class="auth-banner auth-banner--error">
                        {move || form_error.get().unwrap_or_default()}
                    </p>
                </Show>

                <form class="auth-form" on:submit=on_submit>
                    <Show when=move || step.get() == ProviderStep::Contact>
                        <FormField
                            label="First name"
                            value=first_name
                            error=Signal::derive(move || errors.get().first_name)
                        />
                        <FormField
                            label="Last name"
                            value=last_name
                            error=Signal::derive(move || errors.get().last_name)
                        />
                        <FormField
                            label="Mobile"
                            value=mobile
                            error=Signal::derive(move || errors.get().mobile)
                            input_type="tel"
                        />
                        <FormField
                            label="Company name"
                            value=company_name
                            error=Signal::derive(move || errors.get().company_name)
                        />
                    </Show>

                    <Show when=move || step.get() == ProviderStep::Service>
                        <div class="provider-kinds">
                            {ProviderKind::ALL
                                .into_iter()
                                .map(|candidate| {
                                    view! {
                                        <button
                                            type="button"
                                            class=move || {
                                                if kind.get() == Some(candidate) {
                                                    "provider-kinds__option provider-kinds__option--selected"
                                                } else {
                                                    "provider-kinds__option"
                                                }
                                            }
                                            on:click=move |_| kind.set(Some(candidate))
                                        >
                                            {candidate.label()}
                                        </button>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </div>
                        <Show when=move || errors.get().kind.is_some()>
                            <span class="form-field__error">
                                {move || errors.get().kind.unwrap_or_default()}
                            </span>
                        </Show>

                        <Show when=move || {
                            matches!(kind.get(), Some(ProviderKind::Guide | ProviderKind::Transport))
                        }>
                            <FormField
                                label="License number"
                                value=license_number
                                error=Signal::derive(move || errors.get().license_number)
                            />
                        </Show>
                        <Show when=move || kind.get() == Some(ProviderKind::Hotel)>
                            <FormField
                                label="Hotel registration ID"
                                value=hotel_registration_id
                                error=Signal::derive(move || errors.get().hotel_registration_id)
                            />
                        </Show>
                        <Show when=move || kind.get() == Some(ProviderKind::Transport)>
                            <FormField
                                label="Vehicle fleet size"
                                value=vehicle_fleet_size
                                error=Signal::derive(move || errors.get().vehicle_fleet_size)
                            />
                        </Show>
                    </Show>

                    <Show when=move || step.get() == ProviderStep::Credentials>
                        <FormField
                            label="Email"
                            value=email
                            error=Signal::derive(move || errors.get().email)
                            input_type="email"
                            placeholder="you@company.com"
                        />
                        <FormField
                            label="Password"
                            value=password
                            error=Signal::derive(move || errors.get().password)
                            input_type="password"
                        />
                        <FormField
                            label="Confirm password"
                            value=confirm_password
                            error=Signal::derive(move || errors.get().confirm_password)
                            input_type="password"
                        />
                    </Show>

                    <div class="auth-form__actions">
                        <Show when=move || prev_step(step.get()).is_some()>
                            <button class="btn" type="button" on:click=on_back>
                                "Back"
                            </button>
                        </Show>
                        <Show when=move || next_step(step.get()).is_some()>
                            <button class="btn btn--primary" type="button" on:click=on_next>
                                "Next"
                            </button>
                        </Show>
                        <Show when=move || step.get() == ProviderStep::Credentials>
                            <button
                                class="btn btn--primary"
                                type="submit"
                                disabled=move || phase.get().is_submitting()
                            >
                                {move || {
                                    if phase.get().is_submitting() {
                                        "Registering..."
                                    } else {
                                        "Register"
                                    }
                                }}
                            </button>
                        </Show>
                    </div>
                </form>

                <p class="auth-card__footer">
                    "Already registered? "
                    <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
