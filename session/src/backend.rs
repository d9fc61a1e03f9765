//! Credential exchange with the SehatNama REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build implements [`AuthBackend`] over `fetch`; tests implement
//! it with scripted responses. Both share [`classify_response`], which turns a
//! raw status + body into the typed outcome so the HTTP glue stays thin.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::user::{AuthUser, Role};

/// Login request body.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration request body.
///
/// Role-specific fields are omitted from the JSON when unset: `specialty` for
/// doctors, `age`/`gender`/`bloodGroup`/`contact` for patients.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl fmt::Debug for RegistrationProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationProfile")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Success body of the login and registration endpoints.
///
/// The backend identifies accounts with `_id`; `id` is accepted as well.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(rename = "_id", default)]
    pub mongo_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub token: String,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
}

impl AuthResponse {
    /// Split the response into the bearer token and the normalized user.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Decode`] when neither `_id` nor `id` is present,
    /// or when the token is empty.
    pub fn into_session(self) -> Result<(String, AuthUser), BackendError> {
        let id = self
            .mongo_id
            .or(self.id)
            .ok_or_else(|| BackendError::Decode("response is missing `_id`".to_owned()))?;
        if self.token.is_empty() {
            return Err(BackendError::Decode("response carries an empty token".to_owned()));
        }
        let user = AuthUser {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            role: self.role,
            patient_id: self.patient_id,
            specialty: self.specialty,
        };
        Ok((self.token, user))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Classify a raw HTTP response from the login or registration endpoint.
///
/// The body is parsed before the status is inspected, so an error status with
/// a non-JSON body (proxy error page, HTML 500) is a decode failure rather
/// than a credential rejection.
///
/// # Errors
///
/// [`BackendError::Rejected`] for non-2xx statuses with a JSON body,
/// [`BackendError::Decode`] when the body does not parse.
pub fn classify_response(status: u16, body: &str) -> Result<AuthResponse, BackendError> {
    if (200..300).contains(&status) {
        return serde_json::from_str::<AuthResponse>(body).map_err(|e| BackendError::Decode(e.to_string()));
    }
    let error: ErrorBody = serde_json::from_str(body).map_err(|e| BackendError::Decode(e.to_string()))?;
    Err(BackendError::Rejected { status, message: error.message })
}

/// Remote credential exchange.
///
/// Futures are not required to be `Send`: the browser implementation awaits
/// `fetch` promises on the single UI thread.
#[async_trait(?Send)]
pub trait AuthBackend {
    /// Exchange email + password for a token and profile.
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, BackendError>;

    /// Create an account and sign it in.
    async fn register(&self, profile: &RegistrationProfile) -> Result<AuthResponse, BackendError>;
}
