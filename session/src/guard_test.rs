use super::*;

const STAFF: &[Role] = &[Role::Doctor, Role::Admin];

fn user(role: Role, patient_id: Option<&str>) -> AuthUser {
    AuthUser {
        id: "u1".to_owned(),
        first_name: "A".to_owned(),
        last_name: "B".to_owned(),
        email: "a@b.c".to_owned(),
        role,
        patient_id: patient_id.map(str::to_owned),
        specialty: None,
    }
}

fn settled(user: Option<AuthUser>) -> AuthState {
    AuthState { user, loading: false, initialized: true }
}

// =============================================================================
// Pending
// =============================================================================

#[test]
fn fresh_state_is_pending() {
    assert_eq!(decide(&AuthState::default(), STAFF), GuardDecision::Pending);
}

#[test]
fn uninitialized_is_pending_even_with_user() {
    let state = AuthState { user: Some(user(Role::Doctor, None)), loading: false, initialized: false };
    assert_eq!(decide(&state, STAFF), GuardDecision::Pending);
    assert_eq!(decide(&state, &[]), GuardDecision::Pending);
}

#[test]
fn uninitialized_without_user_never_redirects() {
    let state = AuthState { user: None, loading: false, initialized: false };
    assert_eq!(decide(&state, &[]), GuardDecision::Pending);
}

#[test]
fn loading_after_init_is_pending() {
    let state = AuthState { user: Some(user(Role::Admin, None)), loading: true, initialized: true };
    assert_eq!(decide(&state, STAFF), GuardDecision::Pending);
}

// =============================================================================
// Unauthenticated
// =============================================================================

#[test]
fn anonymous_redirects_to_login() {
    assert_eq!(decide(&settled(None), &[]), GuardDecision::Redirect("/login".to_owned()));
    assert_eq!(decide(&settled(None), STAFF), GuardDecision::Redirect("/login".to_owned()));
}

// =============================================================================
// Role gating
// =============================================================================

#[test]
fn permitted_role_renders() {
    assert_eq!(decide(&settled(Some(user(Role::Doctor, None))), STAFF), GuardDecision::Render);
    assert_eq!(decide(&settled(Some(user(Role::Admin, None))), STAFF), GuardDecision::Render);
}

#[test]
fn no_role_restriction_renders_any_user() {
    let state = settled(Some(user(Role::Other("nurse".to_owned()), None)));
    assert_eq!(decide(&state, &[]), GuardDecision::Render);
}

#[test]
fn patient_on_staff_page_goes_to_own_portal() {
    let state = settled(Some(user(Role::Patient, Some("P-42"))));
    assert_eq!(decide(&state, STAFF), GuardDecision::Redirect("/patient-portal/P-42".to_owned()));
}

#[test]
fn patient_without_record_goes_to_portal_root() {
    let state = settled(Some(user(Role::Patient, None)));
    assert_eq!(decide(&state, STAFF), GuardDecision::Redirect("/patient-portal".to_owned()));
}

#[test]
fn staff_on_patient_page_goes_to_dashboard() {
    let patient_only = [Role::Patient];
    assert_eq!(
        decide(&settled(Some(user(Role::Doctor, None))), &patient_only),
        GuardDecision::Redirect("/dashboard".to_owned())
    );
    assert_eq!(
        decide(&settled(Some(user(Role::Admin, None))), &patient_only),
        GuardDecision::Redirect("/dashboard".to_owned())
    );
}

#[test]
fn unknown_role_goes_to_root() {
    let state = settled(Some(user(Role::Other("nurse".to_owned()), None)));
    assert_eq!(decide(&state, STAFF), GuardDecision::Redirect("/".to_owned()));
}

#[test]
fn admin_only_route_rejects_doctor() {
    let state = settled(Some(user(Role::Doctor, None)));
    assert_eq!(decide(&state, &[Role::Admin]), GuardDecision::Redirect("/dashboard".to_owned()));
}

// =============================================================================
// role_home
// =============================================================================

#[test]
fn role_home_treats_empty_patient_id_as_missing() {
    assert_eq!(role_home(&user(Role::Patient, Some(""))), "/patient-portal");
}
