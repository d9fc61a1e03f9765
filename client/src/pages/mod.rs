//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration. Access control lives in
//! `components::protected_route`, not in the pages themselves.

pub mod dashboard;
pub mod home;
pub mod login;
pub mod patient_portal;
pub mod register;
