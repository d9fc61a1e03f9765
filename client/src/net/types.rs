//! Patient-record DTOs exchanged with the REST backend.
//!
//! DESIGN
//! ======
//! Patient documents are loosely typed on the backend: ids arrive as
//! `patientId`, `id` or `_id`, ages as numbers or numeric strings, and
//! allergies as an array or a comma-separated string. Deserialization
//! normalizes those shapes here so pages only see one form.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use session::{RegistrationProfile, Role};

/// Account linked to a patient record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LinkedAccount {
    #[serde(default)]
    pub email: Option<String>,
}

/// Patient record as returned by `GET /api/patients[/{id}]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    #[serde(rename = "_id", default)]
    pub mongo_id: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user: Option<LinkedAccount>,
    #[serde(default, deserialize_with = "deserialize_lenient_age")]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "deserialize_allergies")]
    pub allergies: Vec<String>,
}

impl PatientRecord {
    /// Identifier used in portal URLs: `patientId`, then `id`, then `_id`.
    #[must_use]
    pub fn portal_id(&self) -> Option<&str> {
        [&self.patient_id, &self.id, &self.mongo_id]
            .into_iter()
            .filter_map(|id| id.as_deref())
            .find(|id| !id.trim().is_empty())
    }

    /// True when the record or its linked account carries `email`.
    ///
    /// Comparison ignores surrounding whitespace and ASCII case.
    #[must_use]
    pub fn matches_email(&self, email: &str) -> bool {
        let wanted = email.trim();
        if wanted.is_empty() {
            return false;
        }
        let linked = self.user.as_ref().and_then(|u| u.email.as_deref());
        [self.email.as_deref(), linked]
            .into_iter()
            .flatten()
            .any(|candidate| candidate.trim().eq_ignore_ascii_case(wanted))
    }

    /// `name`, or first and last name joined.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_owned();
        }
        let first = self.first_name.as_deref().unwrap_or_default();
        let last = self.last_name.as_deref().unwrap_or_default();
        format!("{first} {last}").trim().to_owned()
    }
}

/// Subset of `GET /api/auth/me` the client reads.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentProfile {
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of `POST /api/patients` sent right after a patient registers.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub age: u32,
    pub gender: String,
    pub blood_group: String,
    pub contact: String,
    pub address: String,
    pub emergency_contact: String,
    pub condition: String,
    pub allergies: Vec<String>,
}

impl fmt::Debug for NewPatient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewPatient")
            .field("email", &self.email)
            .field("age", &self.age)
            .finish_non_exhaustive()
    }
}

impl NewPatient {
    /// Patient profile for a validated registration.
    ///
    /// Returns `None` unless the registration is for a patient and carries
    /// every patient field.
    #[must_use]
    pub fn from_registration(profile: &RegistrationProfile) -> Option<Self> {
        if profile.role != Role::Patient {
            return None;
        }
        Some(Self {
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            email: profile.email.clone(),
            password: profile.password.clone(),
            age: profile.age?,
            gender: profile.gender.clone()?,
            blood_group: profile.blood_group.clone()?,
            contact: profile.contact.clone()?,
            address: String::new(),
            emergency_contact: String::new(),
            condition: String::new(),
            allergies: Vec::new(),
        })
    }
}

fn deserialize_lenient_age<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_u64() {
                return Ok(u32::try_from(int).ok());
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= 0.0
                && float <= f64::from(u32::MAX)
            {
                return Ok(Some(float as u32));
            }
            Ok(None)
        }
        serde_json::Value::String(raw) => Ok(raw.trim().parse().ok()),
        _ => Err(D::Error::custom("expected number or numeric string")),
    }
}

fn deserialize_allergies<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let items: Vec<String> = match value {
        serde_json::Value::Null => Vec::new(),
        serde_json::Value::String(raw) => raw.split(',').map(|item| item.trim().to_owned()).collect(),
        serde_json::Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                serde_json::Value::String(item) => Some(item.trim().to_owned()),
                _ => None,
            })
            .collect(),
        _ => return Err(D::Error::custom("expected list or comma-separated string")),
    };
    Ok(items.into_iter().filter(|item| !item.is_empty()).collect())
}
