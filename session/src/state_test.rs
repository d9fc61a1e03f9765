use super::*;

fn state_with_role(role: Role) -> AuthState {
    AuthState {
        user: Some(AuthUser {
            id: "u1".to_owned(),
            first_name: "A".to_owned(),
            last_name: "B".to_owned(),
            email: "a@b.c".to_owned(),
            role,
            patient_id: None,
            specialty: None,
        }),
        loading: false,
        initialized: true,
    }
}

// =============================================================
// AuthState defaults
// =============================================================

#[test]
fn auth_state_default_no_user() {
    let state = AuthState::default();
    assert!(state.user.is_none());
}

#[test]
fn auth_state_default_is_loading_and_uninitialized() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(!state.initialized);
    assert!(!state.is_settled());
}

// =============================================================
// Role predicates
// =============================================================

#[test]
fn predicates_false_without_user() {
    let state = AuthState { user: None, loading: false, initialized: true };
    assert!(!state.is_authenticated());
    assert!(!state.is_doctor());
    assert!(!state.is_admin());
    assert!(!state.is_patient());
    assert_eq!(state.role(), None);
}

#[test]
fn doctor_predicates() {
    let state = state_with_role(Role::Doctor);
    assert!(state.is_authenticated());
    assert!(state.is_doctor());
    assert!(!state.is_admin());
    assert!(!state.is_patient());
}

#[test]
fn admin_predicates() {
    let state = state_with_role(Role::Admin);
    assert!(state.is_admin());
    assert!(!state.is_doctor());
}

#[test]
fn unknown_role_is_authenticated_but_matches_nothing() {
    let state = state_with_role(Role::Other("nurse".to_owned()));
    assert!(state.is_authenticated());
    assert!(!state.is_doctor());
    assert!(!state.is_admin());
    assert!(!state.is_patient());
}

#[test]
fn predicates_do_not_depend_on_loading() {
    let mut state = state_with_role(Role::Patient);
    state.loading = true;
    assert!(state.is_patient());
    assert!(!state.is_settled());
}
