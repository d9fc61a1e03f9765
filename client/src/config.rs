//! Backend endpoint configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The REST backend lives on its own origin. Its base URL is baked in at build
//! time from `SEHATNAMA_API_URL` so the WASM bundle and the SSR binary agree
//! on it without a runtime lookup.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Base URL of the REST backend plus the endpoint paths the client calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ApiConfig {
    /// Build config from a base URL. Trailing slashes are dropped; a blank
    /// value falls back to [`DEFAULT_API_URL`].
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() { DEFAULT_API_URL } else { trimmed };
        Self { base_url: base_url.to_owned() }
    }

    /// Config from the `SEHATNAMA_API_URL` build-time variable.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(option_env!("SEHATNAMA_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn login_url(&self) -> String {
        self.endpoint("/api/users/login")
    }

    #[must_use]
    pub fn register_url(&self) -> String {
        self.endpoint("/api/users/register")
    }

    #[must_use]
    pub fn current_user_url(&self) -> String {
        self.endpoint("/api/auth/me")
    }

    #[must_use]
    pub fn patients_url(&self) -> String {
        self.endpoint("/api/patients")
    }

    #[must_use]
    pub fn patient_url(&self, patient_id: &str) -> String {
        self.endpoint(&format!("/api/patients/{patient_id}"))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}
