//! Authenticated user record and role model.
//!
//! DESIGN
//! ======
//! `AuthUser` is the normalized profile kept in memory and persisted under the
//! `user` storage key. It serializes as camelCase JSON so sessions written by
//! earlier builds of the web client restore unchanged.

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role attached to an account by the backend.
///
/// Unknown role strings are kept verbatim in [`Role::Other`] so they survive a
/// persist/restore cycle; route policy sends them to the site root.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Doctor,
    Admin,
    Patient,
    Other(String),
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Doctor => "doctor",
            Self::Admin => "admin",
            Self::Patient => "patient",
            Self::Other(raw) => raw,
        }
    }

    /// Roles that land on the clinical dashboard.
    #[must_use]
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Doctor | Self::Admin)
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "doctor" => Self::Doctor,
            "admin" => Self::Admin,
            "patient" => Self::Patient,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_owned())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized profile of the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// Backend account identifier.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    /// Patient record linked to a `patient` account, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    /// Clinical specialty for `doctor` accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
}

impl AuthUser {
    /// First and last name joined for display.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_owned()
    }
}
