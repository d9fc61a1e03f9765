//! Patient portal: the signed-in patient's own record.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted behind `ProtectedRoute` for the patient role at both
//! `/patient-portal` and `/patient-portal/:id`. The record id comes from the
//! URL, then the session user, then a backend lookup by email.

#[cfg(test)]
#[path = "patient_portal_test.rs"]
mod patient_portal_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use session::AuthUser;

use crate::config::ApiConfig;
use crate::net::api::{self, ApiError};
use crate::net::types::PatientRecord;
use crate::state::auth::{AuthContext, use_auth};

const MISSING_PATIENT_ID: &str = "Patient ID not available. Please contact support.";

#[derive(Clone, Debug, PartialEq, Eq)]
enum PortalLoad {
    Loading,
    Loaded(Box<PatientRecord>),
    Failed(String),
}

/// Numbers record loads so only the most recent one publishes its result.
#[derive(Clone, Debug, Default)]
struct LoadSequence(Arc<AtomicU64>);

impl LoadSequence {
    fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}

/// Record id known without a backend lookup.
fn known_patient_id(route_id: Option<&str>, user: Option<&AuthUser>) -> Option<String> {
    let from_user = user.and_then(|u| u.patient_id.as_deref());
    [route_id, from_user]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|id| !id.is_empty())
        .map(str::to_owned)
}

fn welcome_name(record: Option<&PatientRecord>, user: Option<&AuthUser>) -> String {
    let from_record = record.and_then(|r| r.first_name.as_deref());
    let from_user = user.map(|u| u.first_name.as_str());
    [from_record, from_user]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .unwrap_or("Patient")
        .to_owned()
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

async fn load_record(auth: &AuthContext, config: &ApiConfig, route_id: Option<&str>) -> Result<PatientRecord, String> {
    let token = auth.store.token().ok_or_else(|| ApiError::Unauthenticated.to_string())?;
    let user = auth.state.get_untracked().user.ok_or_else(|| "User not authenticated".to_owned())?;

    let patient_id = match known_patient_id(route_id, Some(&user)) {
        Some(id) => id,
        None => {
            let resolved = api::resolve_patient_id(config, &token, &user).await.map_err(|e| e.to_string())?;
            let id = resolved.ok_or_else(|| MISSING_PATIENT_ID.to_owned())?;
            if let Err(e) = auth.store.attach_patient_id(&id) {
                log::warn!("could not record patient id: {e}");
            }
            id
        }
    };

    api::fetch_patient(config, &token, &patient_id).await.map_err(|e| e.to_string())
}

#[component]
pub fn PatientPortalPage() -> impl IntoView {
    let auth = use_auth();
    let config = expect_context::<ApiConfig>();
    let params = use_params_map();
    let state = auth.state;

    let load = RwSignal::new(PortalLoad::Loading);
    let attempt = RwSignal::new(0_u32);
    let sequence = LoadSequence::default();

    {
        let auth = auth.clone();
        Effect::new(move || {
            attempt.track();
            let route_id = params.with(|p| p.get("id"));
            let ticket = sequence.begin();
            load.set(PortalLoad::Loading);
            let auth = auth.clone();
            let config = config.clone();
            let sequence = sequence.clone();
            leptos::task::spawn_local(async move {
                let next = match load_record(&auth, &config, route_id.as_deref()).await {
                    Ok(record) => PortalLoad::Loaded(Box::new(record)),
                    Err(message) => {
                        log::warn!("patient portal load failed: {message}");
                        PortalLoad::Failed(message)
                    }
                };
                if sequence.is_current(ticket) {
                    load.set(next);
                } else {
                    log::debug!("dropping stale patient record load");
                }
            });
        });
    }

    let store = auth.store.clone();
    let on_logout = move |_| store.logout();
    let on_retry = move |_| attempt.update(|n| *n += 1);

    let welcome = move || {
        let record = load.with(|l| match l {
            PortalLoad::Loaded(record) => Some(record.as_ref().clone()),
            _ => None,
        });
        state.with(|s| welcome_name(record.as_ref(), s.user.as_ref()))
    };

    view! {
        <div class="portal-page">
            <header class="portal-page__header toolbar">
                <a href="/" class="toolbar__brand">"Patient Portal"</a>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__self">"Welcome, " {welcome}</span>
                <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </header>
            <main class="portal-page__body">
                {move || match load.get() {
                    PortalLoad::Loading => view! {
                        <p class="portal-page__status">"Loading patient information..."</p>
                    }
                    .into_any(),
                    PortalLoad::Failed(message) => view! {
                        <div class="portal-page__error">
                            <h2>"Error Loading Data"</h2>
                            <p>{message}</p>
                            <button class="btn" on:click=on_retry>"Try Again"</button>
                            <a class="btn" href="/login">"Back to Login"</a>
                        </div>
                    }
                    .into_any(),
                    PortalLoad::Loaded(record) => view! { <PatientSummary record=*record/> }.into_any(),
                }}
            </main>
        </div>
    }
}

#[component]
fn PatientSummary(record: PatientRecord) -> impl IntoView {
    let name = record.display_name();
    let avatar = initials(&name);
    let patient_id = record.portal_id().unwrap_or_default().to_owned();
    let detail = |value: Option<String>| value.filter(|v| !v.trim().is_empty()).unwrap_or_else(|| "-".to_owned());
    let allergies = if record.allergies.is_empty() { "None recorded".to_owned() } else { record.allergies.join(", ") };

    view! {
        <section class="portal-summary">
            <div class="portal-summary__identity">
                <span class="portal-summary__avatar">{avatar}</span>
                <h2>{name}</h2>
                <p class="portal-summary__id">"Patient ID: " {patient_id}</p>
            </div>
            <dl class="portal-summary__details">
                <dt>"Age"</dt>
                <dd>{detail(record.age.map(|a| a.to_string()))}</dd>
                <dt>"Gender"</dt>
                <dd>{detail(record.gender)}</dd>
                <dt>"Blood Group"</dt>
                <dd>{detail(record.blood_group)}</dd>
                <dt>"Contact"</dt>
                <dd>{detail(record.contact)}</dd>
                <dt>"Condition"</dt>
                <dd>{detail(record.condition)}</dd>
                <dt>"Allergies"</dt>
                <dd>{allergies}</dd>
            </dl>
        </section>
    }
}
