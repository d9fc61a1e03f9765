//! Clinical dashboard home for doctors and admins.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted behind `ProtectedRoute` with the staff roles, so the session is
//! settled and a staff user is present whenever this renders.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use session::{AuthUser, Role};

use crate::state::auth::use_auth;

/// Dashboard sections, in display order. Shown as an overview; none of them
/// has a page of its own yet.
pub const SECTIONS: [&str; 7] = [
    "Appointments",
    "Patients",
    "Lab Reports",
    "Prescriptions",
    "Medicines",
    "Hospitals",
    "Document Scanner",
];

fn role_title(user: Option<&AuthUser>) -> &'static str {
    match user.map(|u| &u.role) {
        Some(Role::Admin) => "Admin",
        Some(Role::Doctor) => "Doctor",
        _ => "User",
    }
}

/// "Welcome back" line: full name (or role title) plus a doctor's specialty.
fn greeting(user: Option<&AuthUser>) -> String {
    let name = user
        .map(AuthUser::full_name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| role_title(user).to_owned());
    let specialty = user
        .and_then(|u| u.specialty.as_deref())
        .filter(|s| !s.trim().is_empty())
        .map(|s| format!(" - {s}"))
        .unwrap_or_default();
    format!("Welcome back, {name}{specialty}")
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let state = auth.state;
    let store = auth.store.clone();

    let on_logout = move |_| store.logout();

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header toolbar">
                <a href="/" class="toolbar__brand">"SehatNama"</a>
                <span class="toolbar__divider" aria-hidden="true"></span>
                <span class="toolbar__role">{move || state.with(|s| role_title(s.user.as_ref()))}</span>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__self">
                    {move || state.with(|s| s.user.as_ref().map(|u| u.email.clone()).unwrap_or_default())}
                </span>
                <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </header>

            <main class="dashboard-page__body">
                <h1>"Dashboard"</h1>
                <p class="dashboard-page__greeting">{move || state.with(|s| greeting(s.user.as_ref()))}</p>
                <section class="dashboard-page__sections" aria-label="Sections">
                    {SECTIONS
                        .iter()
                        .map(|section| view! { <div class="dashboard-card">{*section}</div> })
                        .collect_view()}
                </section>
            </main>
        </div>
    }
}
