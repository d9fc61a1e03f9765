//! Session store: the single authority on "who is logged in".
//!
//! ARCHITECTURE
//! ============
//! The store owns the in-memory [`AuthState`] and its persisted mirror. Pages
//! reach it through context; nothing else writes the `token`/`user` keys.
//! Every change is broadcast to subscribers as a full snapshot.
//!
//! CONCURRENCY
//! ===========
//! Login, registration and logout each take a new request generation. A
//! backend response is committed only while its generation is still the
//! latest, so a slow earlier call can never overwrite the result of a later
//! one, and a login resolving after logout cannot bring the session back.
//!
//! TRADE-OFFS
//! ==========
//! `restore` trusts whatever is in storage and does not call the backend. A
//! stale or forged record stays signed in until a protected API call fails.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::backend::{AuthBackend, AuthResponse, Credentials, RegistrationProfile};
use crate::error::{AuthAction, AuthError, BackendError, StorageError};
use crate::routes::{self, Navigator};
use crate::state::AuthState;
use crate::storage::{SessionStorage, TOKEN_KEY, USER_KEY};
use crate::user::AuthUser;

type Subscriber = Box<dyn Fn(&AuthState) + Send + Sync>;

struct Inner {
    state: AuthState,
    /// Bumped by every login, register and logout.
    generation: u64,
    /// Generation of the exchange currently holding `loading`, if any.
    pending: Option<u64>,
}

/// Session store over an injected backend, storage area and navigator.
pub struct SessionStore<B, S, N> {
    backend: B,
    storage: S,
    navigator: N,
    inner: Mutex<Inner>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl<B, S, N> SessionStore<B, S, N>
where
    B: AuthBackend,
    S: SessionStorage,
    N: Navigator,
{
    /// Create an uninitialized store. Call [`restore`](Self::restore) once at
    /// startup before trusting any role decision.
    pub fn new(backend: B, storage: S, navigator: N) -> Self {
        Self {
            backend,
            storage,
            navigator,
            inner: Mutex::new(Inner { state: AuthState::default(), generation: 0, pending: None }),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Current session snapshot.
    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.lock_inner().state.clone()
    }

    /// Register a callback invoked with the new snapshot after every change.
    pub fn subscribe(&self, subscriber: impl Fn(&AuthState) + Send + Sync + 'static) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(subscriber));
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Restore the session persisted by an earlier page load.
    ///
    /// Runs at most once per store; later calls are no-ops. Never fails: a
    /// missing or unreadable record leaves the session anonymous.
    pub fn restore(&self) {
        let snapshot = {
            let mut inner = self.lock_inner();
            if inner.state.initialized {
                log::debug!("session restore skipped: already initialized");
                return;
            }
            let restored = self.read_persisted();
            if inner.state.user.is_none() {
                inner.state.user = restored;
            }
            if inner.pending.is_none() {
                inner.state.loading = false;
            }
            inner.state.initialized = true;
            inner.state.clone()
        };
        log::info!("session restored (authenticated={})", snapshot.is_authenticated());
        self.notify(&snapshot);
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the user-facing [`AuthError`]; the previous session is left
    /// untouched on every error path.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let generation = self.begin_exchange();
        let credentials = Credentials { email: email.to_owned(), password: password.to_owned() };
        let result = self.backend.login(&credentials).await;
        self.complete_exchange(generation, AuthAction::Login, result)
    }

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// Same contract as [`login`](Self::login).
    pub async fn register(&self, profile: &RegistrationProfile) -> Result<AuthUser, AuthError> {
        let generation = self.begin_exchange();
        let result = self.backend.register(profile).await;
        self.complete_exchange(generation, AuthAction::Register, result)
    }

    /// Sign out: clear the persisted pair, drop the user, go to the login page.
    ///
    /// Any login or registration still in flight is superseded.
    pub fn logout(&self) {
        let snapshot = {
            let mut inner = self.lock_inner();
            inner.generation += 1;
            inner.pending = None;
            self.clear_persisted();
            inner.state.user = None;
            inner.state.loading = false;
            inner.state.clone()
        };
        log::info!("session cleared");
        self.notify(&snapshot);
        self.navigator.navigate(routes::LOGIN);
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Bearer token for authenticated API calls, when signed in.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        let inner = self.lock_inner();
        inner.state.user.as_ref()?;
        self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Record the patient id resolved for the signed-in patient.
    ///
    /// Rewrites the persisted user so the id survives reloads. No-op while
    /// signed out.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the updated user cannot be written; the
    /// in-memory session is left unchanged in that case.
    pub fn attach_patient_id(&self, patient_id: &str) -> Result<(), StorageError> {
        let snapshot = {
            let mut inner = self.lock_inner();
            let Some(mut user) = inner.state.user.clone() else {
                return Ok(());
            };
            if user.patient_id.as_deref() == Some(patient_id) {
                return Ok(());
            }
            user.patient_id = Some(patient_id.to_owned());
            let raw = serde_json::to_string(&user).map_err(|e| StorageError::Serialize(e.to_string()))?;
            self.storage.set(USER_KEY, &raw)?;
            inner.state.user = Some(user);
            inner.state.clone()
        };
        self.notify(&snapshot);
        Ok(())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock_inner().state.is_authenticated()
    }

    #[must_use]
    pub fn is_doctor(&self) -> bool {
        self.lock_inner().state.is_doctor()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.lock_inner().state.is_admin()
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, snapshot: &AuthState) {
        let subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        for subscriber in subscribers.iter() {
            subscriber(snapshot);
        }
    }

    fn begin_exchange(&self) -> u64 {
        let (generation, snapshot) = {
            let mut inner = self.lock_inner();
            inner.generation += 1;
            let generation = inner.generation;
            inner.pending = Some(generation);
            inner.state.loading = true;
            (generation, inner.state.clone())
        };
        self.notify(&snapshot);
        generation
    }

    fn complete_exchange(
        &self,
        generation: u64,
        action: AuthAction,
        result: Result<AuthResponse, BackendError>,
    ) -> Result<AuthUser, AuthError> {
        let (outcome, snapshot) = {
            let mut inner = self.lock_inner();
            if inner.generation != generation {
                log::debug!("{action} response dropped: superseded by a newer request");
                return Err(AuthError::Superseded { action });
            }
            inner.pending = None;
            inner.state.loading = false;
            let outcome = match result.and_then(AuthResponse::into_session) {
                Ok((token, user)) => match self.persist(&token, &user) {
                    Ok(()) => {
                        log::info!("{action} succeeded (role={})", user.role);
                        inner.state.user = Some(user.clone());
                        Ok(user)
                    }
                    Err(err) => {
                        log::warn!("{action} succeeded but the session was not saved: {err}");
                        Err(AuthError::Storage(err))
                    }
                },
                Err(err) => {
                    log::warn!("{action} failed: {err}");
                    Err(AuthError::from_backend(action, err))
                }
            };
            (outcome, inner.state.clone())
        };
        self.notify(&snapshot);
        outcome
    }

    fn read_persisted(&self) -> Option<AuthUser> {
        let raw_user = self.storage.get(USER_KEY).filter(|u| !u.is_empty())?;
        self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        match serde_json::from_str(&raw_user) {
            Ok(user) => Some(user),
            Err(err) => {
                log::warn!("ignoring unreadable persisted user: {err}");
                None
            }
        }
    }

    /// Write token and user together, restoring the previous token if the
    /// user write fails.
    fn persist(&self, token: &str, user: &AuthUser) -> Result<(), StorageError> {
        let raw_user = serde_json::to_string(user).map_err(|e| StorageError::Serialize(e.to_string()))?;
        let previous_token = self.storage.get(TOKEN_KEY);
        self.storage.set(TOKEN_KEY, token)?;
        if let Err(err) = self.storage.set(USER_KEY, &raw_user) {
            match previous_token {
                Some(previous) => {
                    if let Err(rollback) = self.storage.set(TOKEN_KEY, &previous) {
                        log::warn!("failed to roll back token after user write failure: {rollback}");
                        self.clear_persisted();
                    }
                }
                None => self.storage.remove(TOKEN_KEY),
            }
            return Err(err);
        }
        Ok(())
    }

    fn clear_persisted(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }
}
