//! Login page: email/password sign-in, federated sign-in, password reset.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::auth::flow::{LoginErrors, LoginForm, SubmitPhase};
use crate::components::field::FormField;
use crate::components::guard::LoginOrigin;

#[cfg(feature = "csr")]
const RESET_COOLDOWN_SECS: u64 = 30;

/// Banner text for the post-registration handoff (`/login?registered=1`).
fn registered_banner(search: &str) -> Option<&'static str> {
    search
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair == "registered=1")
        .then_some("Account created. Sign in to continue.")
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let origin = expect_context::<LoginOrigin>();
    let location = use_location();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(LoginErrors::default());
    let form_error = RwSignal::new(None::<String>);
    let info = RwSignal::new(None::<String>);
    let phase = RwSignal::new(SubmitPhase::default());
    let reset_waiting = RwSignal::new(false);

    let registered = Memo::new(move |_| registered_banner(&location.search.get()));

    let submit_navigate = navigate.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !phase.try_update(SubmitPhase::try_begin).unwrap_or(false) {
            return;
        }
        form_error.set(None);
        info.set(None);

        let form = LoginForm { email: email.get(), password: password.get() };
        let local = form.validate();
        if !local.ok() {
            errors.set(local);
            phase.update(|p| p.finish(false));
            return;
        }
        errors.set(LoginErrors::default());

        #[cfg(feature = "csr")]
        {
            let platform = crate::net::active::platform();
            let navigate = submit_navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::auth::flow::login(&*platform.auth, &*platform.store, &form).await {
                    Ok(success) => {
                        phase.update(|p| p.finish(true));
                        let destination = success.destination(origin.take());
                        navigate(&destination, NavigateOptions::default());
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
            let _ = (&submit_navigate, &origin, form);
            phase.update(|p| p.finish(false));
        }
    };

    let on_forgot = move |_| {
        if reset_waiting.get() {
            return;
        }
        form_error.set(None);

        #[cfg(feature = "csr")]
        {
            let platform = crate::net::active::platform();
            let address = email.get();
            leptos::task::spawn_local(async move {
                match crate::auth::flow::forgot_password(&*platform.auth, &address).await {
                    Ok(()) => {
                        info.set(Some("Password reset email sent.".to_owned()));
                        reset_waiting.set(true);
                        gloo_timers::future::sleep(std::time::Duration::from_secs(
                            RESET_COOLDOWN_SECS,
                        ))
                        .await;
                        reset_waiting.set(false);
                    }
                    Err(crate::auth::flow::FlowError::Invalid(message)) => {
                        form_error.set(Some(message.to_owned()));
                    }
                    Err(crate::auth::flow::FlowError::Platform(error)) => {
                        form_error.set(Some(error.user_message().to_owned()));
                    }
                }
            });
        }
    };

    let federated_navigate = navigate.clone();
    let on_federated = move |_| {
        if !phase.try_update(SubmitPhase::try_begin).unwrap_or(false) {
            return;
        }
        form_error.set(None);

        #[cfg(feature = "csr")]
        {
            let platform = crate::net::active::platform();
            let navigate = federated_navigate.clone();
            leptos::task::spawn_local(async move {
                let result = crate::auth::flow::federated_login(
                    &*platform.auth,
                    &*platform.store,
                    crate::auth::role::RoleTag::Customer,
                    crate::util::time::now_millis(),
                )
                .await;
                match result {
                    Ok(success) => {
                        phase.update(|p| p.finish(true));
                        let destination = success.destination(origin.take());
                        navigate(&destination, NavigateOptions::default());
                    }
                    Err(error) => {
                        form_error.set(Some(error.user_message().to_owned()));
                        phase.update(|p| p.finish(false));
                    }
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = &federated_navigate;
            phase.update(|p| p.finish(false));
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Tripdeck"</h1>
                <p class="auth-card__subtitle">"Sign in to your account"</p>

                <Show when=move || registered.get().is_some()>
                    <p class="auth-banner auth-banner--success">
                        {move || registered.get().unwrap_or_default()}
                    </p>
                </Show>
                <Show when=move || info.get().is_some()>
                    <p class="auth-banner auth-banner--success">
                        {move || info.get().unwrap_or_default()}
                    </p>
                </Show>
                <Show when=move || form_error.get().is_some()>
                    <p class="auth-banner auth-banner--error">
                        {move || form_error.get().unwrap_or_default()}
                    </p>
                </Show>

                <form class="auth-form" on:submit=on_submit>
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
                    <button
                        class="btn btn--primary auth-form__submit"
                        type="submit"
                        disabled=move || phase.get().is_submitting()
                    >
                        {move || if phase.get().is_submitting() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>

                <button
                    class="auth-card__link"
                    on:click=on_forgot
                    disabled=move || reset_waiting.get()
                >
                    {move || {
                        if reset_waiting.get() { "Reset email sent" } else { "Forgot password?" }
                    }}
                </button>

                <div class="auth-divider"></div>

                <button
                    class="btn auth-card__federated"
                    on:click=on_federated
                    disabled=move || phase.get().is_submitting()
                >
                    "Continue with Google"
                </button>

                <p class="auth-card__footer">
                    "New here? "
                    <a href="/register">"Create an account"</a>
                    " or "
                    <a href="/select-provider-role">"join as a provider"</a>
                </p>
            </div>
        </div>
    }
}
