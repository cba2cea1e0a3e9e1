//! Account-type chooser shown before registration.

use leptos::prelude::*;

#[component]
pub fn SelectRolePage() -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="auth-card auth-card--wide">
                <h1>"Join Tripdeck"</h1>
                <p class="auth-card__subtitle">"How will you use Tripdeck?"</p>

                <div class="role-choice">
                    <a class="role-choice__card" href="/register">
                        <h2>"I'm a traveler"</h2>
                        <p>"Book flights, hotels, trains, buses, packages, and activities."</p>
                    </a>
                    <a class="role-choice__card" href="/register-provider">
                        <h2>"I'm a service provider"</h2>
                        <p>"List your hotel, tours, or transport fleet and manage bookings."</p>
                    </a>
                </div>

                <p class="auth-card__footer">
                    "Already registered? "
                    <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
