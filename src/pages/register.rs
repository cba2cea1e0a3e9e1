//! Customer registration page.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::auth::flow::{CustomerErrors, CustomerRegistration, SubmitPhase};
use crate::components::field::FormField;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let navigate = use_navigate();

    let first_name = RwSignal::new(String::new());
    let last_name = RwSignal::new(String::new());
    let mobile = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let errors = RwSignal::new(CustomerErrors::default());
    let form_error = RwSignal::new(None::<String>);
    let phase = RwSignal::new(SubmitPhase::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !phase.try_update(SubmitPhase::try_begin).unwrap_or(false) {
            return;
        }
        form_error.set(None);

        let form = CustomerRegistration {
            first_name: first_name.get(),
            last_name: last_name.get(),
            mobile: mobile.get(),
            email: email.get(),
            password: password.get(),
            confirm_password: confirm_password.get(),
        };
        let local = form.validate();
        if !local.ok() {
            errors.set(local);
            phase.update(|p| p.finish(false));
            return;
        }
        errors.set(CustomerErrors::default());

        #[cfg(feature = "csr")]
        {
            let platform = crate::net::active::platform();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let result = crate::auth::flow::register_customer(
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
            <div class="auth-card">
                <h1>"Create your account"</h1>
                <p class="auth-card__subtitle">"Book flights, hotels, and more"</p>

                <Show when=move || form_error.get().is_some()>
                    <p class="auth-banner auth-banner--error">
                        {move || form_error.get().unwrap_or_default()}
                    </p>
                </Show>

                <form class="auth-form" on:submit=on_submit>
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
                        label="Phone"
                        value=mobile
                        error=Signal::derive(move || errors.get().mobile)
                        input_type="tel"
                    />
                    <FormField
                        label="Email"
                        value=email
                        error=Signal::derive(move || errors.get().email)
                        input_type="email"
                        placeholder="you@example.com"
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
                    <button
                        class="btn btn--primary auth-form__submit"
                        type="submit"
                        disabled=move || phase.get().is_submitting()
                    >
                        {move || {
                            if phase.get().is_submitting() { "Creating..." } else { "Create Account" }
                        }}
                    </button>
                </form>

                <p class="auth-card__footer">
                    "Already registered? "
                    <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
