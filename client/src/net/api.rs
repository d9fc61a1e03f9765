//! REST API helpers for communicating with the SehatNama backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! The auth exchanges go through [`HttpAuthBackend`] and surface as
//! `session::BackendError`, which the store maps to user-facing messages.
//! Patient-record calls return [`ApiError`]; pages show its text directly.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use session::{AuthBackend, AuthResponse, AuthUser, BackendError, Credentials, RegistrationProfile};

use super::types::{CurrentProfile, NewPatient, PatientRecord};
use crate::config::ApiConfig;

/// Failure of an authenticated patient-record call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    /// Non-2xx response; `message` is the server's text or a status fallback.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected response from server: {0}")]
    Decode(String),

    #[error("Authentication token not found")]
    Unauthenticated,

    #[error("not available on server")]
    Unavailable,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Interpret a status and body as `T`, or the matching [`ApiError`].
#[cfg(any(test, feature = "hydrate"))]
fn classify_json<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()));
    }
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.trim().to_owned())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Error {status}: request failed"));
    Err(ApiError::Rejected { status, message })
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Portal id of the first record belonging to `email`.
fn find_patient_id_by_email(patients: &[PatientRecord], email: &str) -> Option<String> {
    patients
        .iter()
        .find(|p| p.matches_email(email))
        .and_then(PatientRecord::portal_id)
        .map(str::to_owned)
}

// =============================================================================
// AUTH BACKEND
// =============================================================================

/// [`AuthBackend`] over `POST /api/users/login` and `/api/users/register`.
#[derive(Clone, Debug)]
pub struct HttpAuthBackend {
    config: ApiConfig,
}

impl HttpAuthBackend {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, BackendError> {
        post_auth(&self.config.login_url(), credentials).await
    }

    async fn register(&self, profile: &RegistrationProfile) -> Result<AuthResponse, BackendError> {
        post_auth(&self.config.register_url(), profile).await
    }
}

async fn post_auth<B: Serialize>(url: &str, body: &B) -> Result<AuthResponse, BackendError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(url)
            .json(body)
            .map_err(|e| BackendError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| BackendError::Transport(e.to_string()))?;
        session::backend::classify_response(status, &text)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, body);
        Err(BackendError::Transport("not available on server".to_owned()))
    }
}

// =============================================================================
// PATIENT RECORDS
// =============================================================================

async fn get_json<T: DeserializeOwned>(url: &str, token: &str) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(url)
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        classify_json(status, &text)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, token);
        Err(ApiError::Unavailable)
    }
}

async fn post_json<B: Serialize, T: DeserializeOwned>(url: &str, token: &str, body: &B) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(url)
            .header("Authorization", &bearer(token))
            .json(body)
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        classify_json(status, &text)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, token, body);
        Err(ApiError::Unavailable)
    }
}

/// Fetch the signed-in account from `GET /api/auth/me`.
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure, non-2xx status, or bad JSON.
pub async fn fetch_current_profile(config: &ApiConfig, token: &str) -> Result<CurrentProfile, ApiError> {
    get_json(&config.current_user_url(), token).await
}

/// List patient records visible to the token via `GET /api/patients`.
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure, non-2xx status, or bad JSON.
pub async fn list_patients(config: &ApiConfig, token: &str) -> Result<Vec<PatientRecord>, ApiError> {
    get_json(&config.patients_url(), token).await
}

/// Fetch one patient record via `GET /api/patients/{id}`.
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure, non-2xx status, or bad JSON.
pub async fn fetch_patient(config: &ApiConfig, token: &str, patient_id: &str) -> Result<PatientRecord, ApiError> {
    get_json(&config.patient_url(patient_id), token).await
}

/// Create the patient record for a newly registered patient.
///
/// # Errors
///
/// Returns [`ApiError`] on transport failure, non-2xx status, or bad JSON.
pub async fn create_patient(config: &ApiConfig, token: &str, patient: &NewPatient) -> Result<PatientRecord, ApiError> {
    post_json(&config.patients_url(), token, patient).await
}

/// Find the patient record id for `user`.
///
/// Tries the user record, then `/api/auth/me`, then the patient list matched
/// by email. A failed profile lookup falls through to the list.
///
/// # Errors
///
/// Returns [`ApiError`] only when the patient list itself cannot be fetched.
pub async fn resolve_patient_id(config: &ApiConfig, token: &str, user: &AuthUser) -> Result<Option<String>, ApiError> {
    if let Some(id) = user.patient_id.as_deref().filter(|id| !id.trim().is_empty()) {
        return Ok(Some(id.to_owned()));
    }

    match fetch_current_profile(config, token).await {
        Ok(profile) => {
            if let Some(id) = profile.patient_id.filter(|id| !id.trim().is_empty()) {
                return Ok(Some(id));
            }
        }
        Err(e) => log::warn!("current profile lookup failed: {e}"),
    }

    let patients = list_patients(config, token).await?;
    log::debug!("matching {} patient records by email", patients.len());
    Ok(find_patient_id_by_email(&patients, &user.email))
}
