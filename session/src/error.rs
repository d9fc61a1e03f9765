//! Error types for the session layer.
//!
//! ERROR HANDLING
//! ==============
//! Backends and storage report what went wrong mechanically
//! ([`BackendError`], [`StorageError`]). The store folds those into
//! [`AuthError`], whose `Display` text is the exact message pages show to the
//! user. Pages never need to inspect the variant to render it.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::fmt;

/// Which credential exchange produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

impl fmt::Display for AuthAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("login"),
            Self::Register => f.write_str("registration"),
        }
    }
}

/// Failure reported by an [`AuthBackend`](crate::AuthBackend).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The server answered with a non-success status.
    #[error("server rejected the request with status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// The request never produced a response (offline, CORS, DNS, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// A response arrived but its body was not the expected JSON.
    #[error("response body could not be parsed: {0}")]
    Decode(String),
}

/// Failure writing the persisted session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage area is reachable (SSR, private mode, disabled storage).
    #[error("session storage is unavailable")]
    Unavailable,

    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },

    #[error("failed to serialize the session user: {0}")]
    Serialize(String),
}

/// User-facing outcome of a failed login or registration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The server rejected the login; carries the message to show.
    #[error("{0}")]
    InvalidCredentials(String),

    /// The server rejected the registration payload; carries the message to show.
    #[error("{0}")]
    ValidationFailed(String),

    #[error("An error occurred during {action}. Please try again later.")]
    Network { action: AuthAction, detail: String },

    #[error("An error occurred during {action}. Please try again later.")]
    MalformedResponse { action: AuthAction, detail: String },

    /// The exchange succeeded but the session could not be persisted.
    #[error("Unable to save your session in this browser.")]
    Storage(#[source] StorageError),

    /// A later login/register/logout was started before this one resolved.
    #[error("A newer {action} request replaced this one.")]
    Superseded { action: AuthAction },
}

const DEFAULT_LOGIN_REJECTION: &str = "Invalid credentials";
const DEFAULT_REGISTER_REJECTION: &str = "Registration failed";

impl AuthError {
    /// Map a backend failure for `action` onto the user-facing taxonomy.
    #[must_use]
    pub fn from_backend(action: AuthAction, err: BackendError) -> Self {
        match err {
            BackendError::Rejected { message, .. } => {
                let message = message.map(|m| m.trim().to_owned()).filter(|m| !m.is_empty());
                match action {
                    AuthAction::Login => {
                        Self::InvalidCredentials(message.unwrap_or_else(|| DEFAULT_LOGIN_REJECTION.to_owned()))
                    }
                    AuthAction::Register => {
                        Self::ValidationFailed(message.unwrap_or_else(|| DEFAULT_REGISTER_REJECTION.to_owned()))
                    }
                }
            }
            BackendError::Transport(detail) => Self::Network { action, detail },
            BackendError::Decode(detail) => Self::MalformedResponse { action, detail },
        }
    }
}
