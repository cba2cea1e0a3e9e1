//! Public landing page.

use leptos::prelude::*;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <div class="landing-page">
            <header class="landing-page__header toolbar">
                <span class="toolbar__brand">"Tripdeck"</span>
                <span class="toolbar__spacer"></span>
                <a class="btn" href="/login">"Sign In"</a>
                <a class="btn btn--primary" href="/select-provider-role">"Get Started"</a>
            </header>

            <section class="landing-page__hero">
                <h1>"One account for every trip"</h1>
                <p>
                    "Flights, hotels, trains, buses, holiday packages, and local activities - "
                    "booked in one place, managed from one dashboard."
                </p>
                <div class="landing-page__links">
                    <a class="btn btn--primary" href="/flights">"Search flights"</a>
                    <a class="btn" href="/hotels">"Find hotels"</a>
                    <a class="btn" href="/packages">"Browse packages"</a>
                </div>
            </section>
        </div>
    }
}
