//! Route authorization policy.
//!
//! DESIGN
//! ======
//! `decide` is a pure function of the session snapshot and the route's
//! permitted roles. The UI interprets the result: a loading placeholder for
//! `Pending`, the protected view for `Render`, and a single navigation for
//! `Redirect`.
//!
//! The `initialized`/`loading` check comes first. Checking `user` before the
//! restore finished would treat a not-yet-restored session as anonymous and
//! render or redirect on stale data.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::routes;
use crate::state::AuthState;
use crate::user::{AuthUser, Role};

/// What a protected route should do for the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not settled yet; show a neutral loading state.
    Pending,
    /// Render the protected content.
    Render,
    /// Render nothing and navigate to the target.
    Redirect(String),
}

/// Decide whether a route restricted to `allowed_roles` may render.
///
/// An empty `allowed_roles` admits any authenticated user.
#[must_use]
pub fn decide(state: &AuthState, allowed_roles: &[Role]) -> GuardDecision {
    if !state.is_settled() {
        return GuardDecision::Pending;
    }
    let Some(user) = state.user.as_ref() else {
        return GuardDecision::Redirect(routes::LOGIN.to_owned());
    };
    if allowed_roles.is_empty() || allowed_roles.contains(&user.role) {
        GuardDecision::Render
    } else {
        GuardDecision::Redirect(role_home(user))
    }
}

/// Landing route for a signed-in user.
#[must_use]
pub fn role_home(user: &AuthUser) -> String {
    match &user.role {
        Role::Patient => match user.patient_id.as_deref() {
            Some(id) if !id.is_empty() => routes::patient_portal(id),
            _ => routes::PATIENT_PORTAL.to_owned(),
        },
        Role::Doctor | Role::Admin => routes::DASHBOARD.to_owned(),
        Role::Other(_) => routes::ROOT.to_owned(),
    }
}
