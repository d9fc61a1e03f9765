//! Role-aware wrapper for protected pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route renders through this component. It reads the
//! mirrored session signal, asks `session::decide` what to do, and then shows
//! a loading screen, the wrapped page, or nothing once a redirect is issued.

#[cfg(test)]
#[path = "protected_route_test.rs"]
mod protected_route_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::{GuardDecision, Role, decide};

use crate::state::auth::use_auth;
use crate::util::auth::{GuardRedirect, install_guard_redirect};

/// What a guard mount shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GuardView {
    Loading,
    Page,
    Nothing,
}

fn guard_view(decision: &GuardDecision, redirected: bool) -> GuardView {
    if redirected {
        return GuardView::Nothing;
    }
    match decision {
        GuardDecision::Pending => GuardView::Loading,
        GuardDecision::Render => GuardView::Page,
        GuardDecision::Redirect(_) => GuardView::Nothing,
    }
}

/// Neutral placeholder shown until the session has been restored.
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen" role="status" aria-live="polite">
            <div class="loading-screen__spinner" aria-hidden="true"></div>
            <p class="loading-screen__label">"Loading..."</p>
        </div>
    }
}

/// Render `children` only for a signed-in user whose role is allowed.
///
/// An empty `allowed_roles` admits any signed-in user.
#[component]
pub fn ProtectedRoute(#[prop(optional)] allowed_roles: Vec<Role>, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let decision = Memo::new(move |_| decide(&auth.state.get(), &allowed_roles));
    let redirect = GuardRedirect::new(use_navigate());
    let redirected = redirect.redirected();
    install_guard_redirect(decision, redirect);

    move || match decision.with(|d| guard_view(d, redirected.get())) {
        GuardView::Loading => view! { <LoadingScreen/> }.into_any(),
        GuardView::Page => children().into_any(),
        GuardView::Nothing => ().into_any(),
    }
}
