//! Browser session core for the SehatNama client.
//!
//! This crate owns "who is logged in" for the web client: the persisted
//! token/user pair, the login and registration exchanges, and the policy that
//! decides whether a protected route may render. It has no UI dependency so
//! the same rules run in the hydrated app, during SSR, and in unit tests.
//!
//! ```text
//! client (Leptos pages, ProtectedRoute)
//!     ↕  RwSignal<AuthState> mirror + guard::decide
//! session (this crate)
//!     ↕  AuthBackend / SessionStorage / Navigator
//! browser (fetch, localStorage, location)
//! ```

pub mod backend;
pub mod error;
pub mod guard;
pub mod routes;
pub mod state;
pub mod storage;
pub mod store;
pub mod user;

#[cfg(test)]
mod test_support;

pub use backend::{AuthBackend, AuthResponse, Credentials, RegistrationProfile};
pub use error::{AuthAction, AuthError, BackendError, StorageError};
pub use guard::{GuardDecision, decide};
pub use routes::Navigator;
pub use state::AuthState;
pub use storage::SessionStorage;
pub use store::SessionStore;
pub use user::{AuthUser, Role};
