//! Auth-session context for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store is the source of truth; this module mirrors its
//! snapshots into an `RwSignal` so route guards and user-aware components
//! re-render on every change. Pages call the store directly for login,
//! registration and logout.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;
use session::{AuthState, AuthUser, Role, SessionStore, guard, routes};

use crate::config::ApiConfig;
use crate::net::api::{self, HttpAuthBackend};
use crate::util::auth::BrowserNavigator;
use crate::util::storage::BrowserStorage;

pub type AppSessionStore = SessionStore<HttpAuthBackend, BrowserStorage, BrowserNavigator>;

/// Shared handle provided through Leptos context.
#[derive(Clone)]
pub struct AuthContext {
    pub state: RwSignal<AuthState>,
    pub store: Arc<AppSessionStore>,
}

impl AuthContext {
    /// Wrap `store` and mirror every broadcast into [`AuthContext::state`].
    pub fn new(store: AppSessionStore) -> Self {
        let store = Arc::new(store);
        let state = RwSignal::new(store.snapshot());
        store.subscribe(move |snapshot| state.set(snapshot.clone()));
        Self { state, store }
    }

    /// Store wired to the browser for `config`.
    pub fn for_browser(config: &ApiConfig) -> Self {
        Self::new(SessionStore::new(
            HttpAuthBackend::new(config.clone()),
            BrowserStorage,
            BrowserNavigator,
        ))
    }

    /// Where `user` should land after signing in.
    ///
    /// Patients without a known record id are resolved against the backend
    /// first; a resolved id is attached to the session.
    pub async fn landing_route(&self, config: &ApiConfig, user: &AuthUser) -> String {
        if user.role != Role::Patient || user.patient_id.as_deref().is_some_and(|id| !id.is_empty()) {
            return guard::role_home(user);
        }
        let Some(token) = self.store.token() else {
            return routes::PATIENT_PORTAL.to_owned();
        };
        match api::resolve_patient_id(config, &token, user).await {
            Ok(Some(patient_id)) => {
                if let Err(e) = self.store.attach_patient_id(&patient_id) {
                    log::warn!("could not record patient id: {e}");
                }
                routes::patient_portal(&patient_id)
            }
            Ok(None) => {
                log::warn!("no patient record found for signed-in patient");
                routes::PATIENT_PORTAL.to_owned()
            }
            Err(e) => {
                log::warn!("patient id lookup failed: {e}");
                routes::PATIENT_PORTAL.to_owned()
            }
        }
    }
}

/// Create the auth context and provide it to descendants.
pub fn provide_auth(config: &ApiConfig) -> AuthContext {
    let auth = AuthContext::for_browser(config);
    provide_context(auth.clone());
    auth
}

/// Auth context provided by the root component.
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}
