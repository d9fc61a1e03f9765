//! Login page with email and password.
//!
//! SYSTEM CONTEXT
//! ==============
//! Signs in through the session store, then routes by role: staff to the
//! dashboard, patients to their portal once their patient record id is known.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use session::AuthError;

use crate::config::ApiConfig;
use crate::state::auth::use_auth;

/// Reject obviously incomplete input before contacting the backend.
fn validate_login_input(email: &str, password: &str) -> Result<(), &'static str> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Email and password are required");
    }
    Ok(())
}

fn submit_label(submitting: bool, session_loading: bool) -> &'static str {
    if submitting {
        "Logging in..."
    } else if session_loading {
        "Loading..."
    } else {
        "Login"
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let config = expect_context::<ApiConfig>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let submitting = RwSignal::new(false);
    let session_loading = Memo::new(move |_| auth.state.get().loading);

    let on_submit = {
        let auth = auth.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if submitting.get_untracked() {
                return;
            }
            let email_value = email.get_untracked().trim().to_owned();
            let password_value = password.get_untracked();
            if let Err(message) = validate_login_input(&email_value, &password_value) {
                error.set(message.to_owned());
                return;
            }
            error.set(String::new());
            submitting.set(true);

            let auth = auth.clone();
            let config = config.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match auth.store.login(&email_value, &password_value).await {
                    Ok(user) => {
                        let target = auth.landing_route(&config, &user).await;
                        navigate(&target, NavigateOptions::default());
                    }
                    Err(AuthError::Superseded { .. }) => {}
                    Err(e) => error.set(e.to_string()),
                }
                submitting.set(false);
            });
        }
    };

    view! {
        <div class="login-page">
            <a href="/" class="login-page__brand">"SehatNama"</a>
            <div class="login-card">
                <h1>"Login"</h1>
                <p class="login-card__subtitle">"Enter your credentials to access your account"</p>
                <form class="login-form" on:submit=on_submit>
                    <Show when=move || !error.get().is_empty()>
                        <p class="login-message login-message--error">{move || error.get()}</p>
                    </Show>
                    <label for="email">"Email"</label>
                    <input
                        id="email"
                        class="login-input"
                        type="email"
                        placeholder="m@example.com"
                        required
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        class="login-input"
                        type="password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button
                        class="login-button"
                        type="submit"
                        disabled=move || submitting.get() || session_loading.get()
                    >
                        {move || submit_label(submitting.get(), session_loading.get())}
                    </button>
                </form>
                <p class="login-card__footer">
                    "Don't have an account? "
                    <a href="/register">"Register"</a>
                </p>
            </div>
        </div>
    }
}
