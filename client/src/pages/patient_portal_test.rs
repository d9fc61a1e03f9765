use super::*;
use session::Role;

fn patient(patient_id: Option<&str>) -> AuthUser {
    AuthUser {
        id: "2".to_owned(),
        first_name: "Sara".to_owned(),
        last_name: "Khan".to_owned(),
        email: "sara@example.com".to_owned(),
        role: Role::Patient,
        patient_id: patient_id.map(str::to_owned),
        specialty: None,
    }
}

#[test]
fn route_id_wins_over_session_user() {
    let user = patient(Some("P-1"));
    assert_eq!(known_patient_id(Some("P-9"), Some(&user)), Some("P-9".to_owned()));
}

#[test]
fn session_user_id_used_without_route_id() {
    let user = patient(Some("P-1"));
    assert_eq!(known_patient_id(None, Some(&user)), Some("P-1".to_owned()));
    assert_eq!(known_patient_id(Some("  "), Some(&user)), Some("P-1".to_owned()));
}

#[test]
fn unknown_id_needs_lookup() {
    assert_eq!(known_patient_id(None, Some(&patient(None))), None);
    assert_eq!(known_patient_id(None, None), None);
}

#[test]
fn welcome_name_prefers_record_then_user() {
    let record: PatientRecord = serde_json::from_value(serde_json::json!({ "firstName": "Sana" })).unwrap();
    let user = patient(None);
    assert_eq!(welcome_name(Some(&record), Some(&user)), "Sana");
    assert_eq!(welcome_name(None, Some(&user)), "Sara");
    assert_eq!(welcome_name(None, None), "Patient");
}

#[test]
fn initials_take_first_letter_of_each_word() {
    assert_eq!(initials("sara khan"), "SK");
    assert_eq!(initials(""), "");
}

#[test]
fn only_latest_load_is_current() {
    let sequence = LoadSequence::default();
    let first = sequence.begin();
    let second = sequence.clone().begin();
    assert!(!sequence.is_current(first));
    assert!(sequence.is_current(second));
}
