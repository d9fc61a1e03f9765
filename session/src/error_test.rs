use super::*;

fn rejected(message: Option<&str>) -> BackendError {
    BackendError::Rejected { status: 401, message: message.map(str::to_owned) }
}

#[test]
fn login_rejection_uses_server_message() {
    let err = AuthError::from_backend(AuthAction::Login, rejected(Some("Invalid credentials")));
    assert_eq!(err, AuthError::InvalidCredentials("Invalid credentials".to_owned()));
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[test]
fn login_rejection_without_message_falls_back() {
    let err = AuthError::from_backend(AuthAction::Login, rejected(None));
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[test]
fn blank_server_message_counts_as_missing() {
    let err = AuthError::from_backend(AuthAction::Register, rejected(Some("   ")));
    assert_eq!(err, AuthError::ValidationFailed("Registration failed".to_owned()));
}

#[test]
fn register_rejection_uses_server_message() {
    let err = AuthError::from_backend(AuthAction::Register, rejected(Some("User already exists")));
    assert_eq!(err, AuthError::ValidationFailed("User already exists".to_owned()));
}

#[test]
fn transport_failure_shows_generic_retry_message() {
    let err = AuthError::from_backend(AuthAction::Login, BackendError::Transport("offline".to_owned()));
    assert!(matches!(err, AuthError::Network { action: AuthAction::Login, .. }));
    assert_eq!(err.to_string(), "An error occurred during login. Please try again later.");
}

#[test]
fn decode_failure_names_registration() {
    let err = AuthError::from_backend(AuthAction::Register, BackendError::Decode("eof".to_owned()));
    assert!(matches!(err, AuthError::MalformedResponse { .. }));
    assert_eq!(err.to_string(), "An error occurred during registration. Please try again later.");
}

#[test]
fn superseded_message_names_action() {
    let err = AuthError::Superseded { action: AuthAction::Login };
    assert_eq!(err.to_string(), "A newer login request replaced this one.");
}

#[test]
fn storage_error_is_kept_as_source() {
    let err = AuthError::Storage(StorageError::Unavailable);
    assert_eq!(err.to_string(), "Unable to save your session in this browser.");
    let source = std::error::Error::source(&err).map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("session storage is unavailable"));
}
