//! Public landing page.

use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <header class="home-page__header toolbar">
                <span class="toolbar__brand">"SehatNama"</span>
                <span class="toolbar__spacer"></span>
                <a class="btn" href="/login">"Log in"</a>
                <a class="btn btn--primary" href="/register">"Register"</a>
            </header>
            <main class="home-page__hero">
                <h1>"Your Complete Medical History in One Place"</h1>
                <p>
                    "SehatNama stores and manages patient information, medical history, prescriptions, "
                    "and lab reports in a secure digital environment."
                </p>
                <a class="btn btn--primary" href="/register">"Get Started"</a>
            </main>
        </div>
    }
}
