use super::*;

fn config() -> PlatformConfig {
    PlatformConfig { api_base: "https://p.example".to_owned(), api_key: "k1".to_owned() }
}

#[test]
fn identity_endpoint_formats_op_and_key() {
    assert_eq!(
        identity_endpoint(&config(), "signUp"),
        "https://p.example/v1/accounts:signUp?key=k1"
    );
}

#[test]
fn document_endpoint_embeds_path() {
    assert_eq!(
        document_endpoint(&config(), "users/u1"),
        "https://p.example/v1/documents/users/u1?key=k1"
    );
}

#[test]
fn collection_endpoint_trims_trailing_slash() {
    assert_eq!(
        collection_endpoint(&config(), "bookings/u1/"),
        "https://p.example/v1/documents/bookings/u1?key=k1&list=true"
    );
}

#[test]
fn federated_start_url_carries_key() {
    assert_eq!(
        federated_start_url(&config()),
        "https://p.example/v1/oauth/google/start?key=k1"
    );
}

#[test]
fn classify_identity_code_maps_known_codes() {
    assert_eq!(classify_identity_code("EMAIL_EXISTS"), PlatformError::EmailInUse);
    assert_eq!(classify_identity_code("INVALID_EMAIL"), PlatformError::InvalidEmail);
    assert_eq!(classify_identity_code("INVALID_PASSWORD"), PlatformError::InvalidCredentials);
    assert_eq!(classify_identity_code("EMAIL_NOT_FOUND"), PlatformError::InvalidCredentials);
    assert_eq!(classify_identity_code("TOO_MANY_ATTEMPTS_TRY_LATER"), PlatformError::RateLimited);
    assert_eq!(classify_identity_code("USER_DISABLED"), PlatformError::PermissionDenied);
}

#[test]
fn classify_identity_code_strips_trailing_explanation() {
    assert_eq!(
        classify_identity_code("WEAK_PASSWORD : Password should be at least 6 characters"),
        PlatformError::WeakPassword
    );
}

#[test]
fn classify_identity_code_unknown_falls_back_to_other() {
    let error = classify_identity_code("SOMETHING_NEW");
    assert_eq!(error, PlatformError::Other("SOMETHING_NEW".to_owned()));
    assert_eq!(error.user_message(), "Something went wrong. Please try again.");
}

#[test]
fn classify_document_status_buckets() {
    assert_eq!(classify_document_status(401), PlatformError::PermissionDenied);
    assert_eq!(classify_document_status(403), PlatformError::PermissionDenied);
    assert_eq!(classify_document_status(429), PlatformError::RateLimited);
    assert_eq!(classify_document_status(500), PlatformError::Unavailable);
    assert_eq!(classify_document_status(503), PlatformError::Unavailable);
    assert!(matches!(classify_document_status(418), PlatformError::Other(_)));
}
