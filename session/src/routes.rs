//! Navigation targets and the imperative navigation hook.

/// Login entry point.
pub const LOGIN: &str = "/login";
/// Home for doctors and admins.
pub const DASHBOARD: &str = "/dashboard";
/// Patient portal without a resolved patient record.
pub const PATIENT_PORTAL: &str = "/patient-portal";
/// Site root.
pub const ROOT: &str = "/";

/// Portal route for a specific patient record.
#[must_use]
pub fn patient_portal(patient_id: &str) -> String {
    format!("{PATIENT_PORTAL}/{patient_id}")
}

/// "Go to URL" capability used by logout.
///
/// Navigation is fire-and-forget; implementations swallow failures.
pub trait Navigator {
    fn navigate(&self, target: &str);
}
