//! Observable auth-session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The store publishes a clone of this struct after every change; the Leptos
//! layer mirrors it into an `RwSignal` that route guards and user-aware
//! components read reactively.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use crate::user::{AuthUser, Role};

/// Snapshot of the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    /// Signed-in user; `None` means unauthenticated.
    pub user: Option<AuthUser>,
    /// True while the initial restore, a login, or a registration is in flight.
    pub loading: bool,
    /// Set once the initial restore from storage has completed.
    pub initialized: bool,
}

impl Default for AuthState {
    /// A fresh session is loading and uninitialized until `restore` runs.
    fn default() -> Self {
        Self { user: None, loading: true, initialized: false }
    }
}

impl AuthState {
    /// True once the restore finished and no exchange is in flight.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.initialized && !self.loading
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn is_doctor(&self) -> bool {
        self.role() == Some(&Role::Doctor)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role() == Some(&Role::Admin)
    }

    #[must_use]
    pub fn is_patient(&self) -> bool {
        self.role() == Some(&Role::Patient)
    }

    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.user.as_ref().map(|user| &user.role)
    }
}
