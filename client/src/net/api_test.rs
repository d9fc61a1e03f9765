use super::*;

fn patients() -> Vec<PatientRecord> {
    serde_json::from_value(serde_json::json!([
        { "id": "P-1", "email": "first@example.com" },
        { "_id": "m2", "patientId": "P-2", "user": { "email": "sara@example.com" } },
        { "id": "P-3", "email": "sara@example.com" },
    ]))
    .unwrap()
}

#[test]
fn bearer_formats_authorization_header() {
    assert_eq!(bearer("abc"), "Bearer abc");
}

#[test]
fn classify_json_parses_success_body() {
    let profile: CurrentProfile = classify_json(200, r#"{"patientId":"P-9","email":"a@b.c"}"#).unwrap();
    assert_eq!(profile.patient_id.as_deref(), Some("P-9"));
}

#[test]
fn classify_json_reports_bad_success_body_as_decode() {
    let result = classify_json::<CurrentProfile>(200, "<html>");
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[test]
fn classify_json_uses_server_message_on_rejection() {
    let result = classify_json::<PatientRecord>(404, r#"{"message":"Patient not found"}"#);
    assert_eq!(
        result,
        Err(ApiError::Rejected { status: 404, message: "Patient not found".to_owned() })
    );
}

#[test]
fn classify_json_falls_back_to_status_text() {
    let err = classify_json::<PatientRecord>(500, "oops").unwrap_err();
    assert_eq!(err.to_string(), "Error 500: request failed");
}

#[test]
fn find_patient_id_takes_first_match() {
    assert_eq!(find_patient_id_by_email(&patients(), "sara@example.com"), Some("P-2".to_owned()));
}

#[test]
fn find_patient_id_none_without_match() {
    assert_eq!(find_patient_id_by_email(&patients(), "nobody@example.com"), None);
}

#[tokio::test]
async fn resolve_patient_id_uses_user_record_first() {
    let user = AuthUser {
        id: "u1".to_owned(),
        first_name: "Sara".to_owned(),
        last_name: "Khan".to_owned(),
        email: "sara@example.com".to_owned(),
        role: session::Role::Patient,
        patient_id: Some("P-77".to_owned()),
        specialty: None,
    };
    let resolved = resolve_patient_id(&ApiConfig::default(), "token", &user).await;
    assert_eq!(resolved, Ok(Some("P-77".to_owned())));
}
