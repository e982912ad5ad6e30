use crate::core::errors::ClinicError;
use crate::core::models::user::Registration;
use crate::tests::create_test_service;

fn registration(username: &str, email: &str) -> Registration {
    Registration {
        name: "Dana Scully".to_string(),
        username: username.to_string(),
        email: email.to_string(),
        password: "s3cret".to_string(),
        confirm: "s3cret".to_string(),
    }
}

#[tokio::test]
async fn test_signup_stores_hashed_password() {
    let service = create_test_service().await;
    let user = service.signup(registration("dana", "dana@example.com")).await.unwrap();

    assert_eq!(user.username, "dana");
    assert_eq!(user.email, "dana@example.com");
    assert_ne!(user.password, "s3cret");
    assert!(bcrypt::verify("s3cret", &user.password).unwrap());
}

#[tokio::test]
async fn test_signup_rejects_mismatched_confirmation() {
    let service = create_test_service().await;
    let mut form = registration("dana", "dana@example.com");
    form.confirm = "different".to_string();

    let result = service.signup(form).await;
    assert!(matches!(result, Err(ClinicError::PasswordMismatch)));
    assert!(matches!(
        service.authenticate("dana", "s3cret").await,
        Err(ClinicError::UsernameNotFound(_))
    ));
}

#[tokio::test]
async fn test_signup_rejects_malformed_email() {
    let service = create_test_service().await;
    for email in ["invalid", "no-at.example.com", "two@@example.com", "user@host", ""] {
        let result = service.signup(registration("dana", email)).await;
        assert!(matches!(result, Err(ClinicError::InvalidEmail(_))), "accepted {:?}", email);
    }
}

#[tokio::test]
async fn test_signup_rejects_empty_and_long_fields() {
    let service = create_test_service().await;

    let mut form = registration("dana", "dana@example.com");
    form.name = "  ".to_string();
    assert!(matches!(service.signup(form).await, Err(ClinicError::InvalidInput(field, _)) if field == "name"));

    let form = registration(&"u".repeat(51), "dana@example.com");
    assert!(matches!(service.signup(form).await, Err(ClinicError::InvalidInput(field, _)) if field == "username"));

    let mut form = registration("dana", "dana@example.com");
    form.password.clear();
    form.confirm.clear();
    assert!(matches!(service.signup(form).await, Err(ClinicError::InvalidInput(field, _)) if field == "password"));
}

#[tokio::test]
async fn test_signup_enforces_unique_username_and_email() {
    let service = create_test_service().await;
    service.signup(registration("dana", "dana@example.com")).await.unwrap();

    let result = service.signup(registration("dana", "other@example.com")).await;
    assert!(matches!(result, Err(ClinicError::UsernameTaken(u)) if u == "dana"));

    let result = service.signup(registration("fox", "dana@example.com")).await;
    assert!(matches!(result, Err(ClinicError::EmailAlreadyRegistered(e)) if e == "dana@example.com"));
}

#[tokio::test]
async fn test_authenticate_verifies_hash() {
    let service = create_test_service().await;
    service.signup(registration("dana", "dana@example.com")).await.unwrap();

    let user = service.authenticate("dana", "s3cret").await.unwrap();
    assert_eq!(user.name, "Dana Scully");

    assert!(matches!(
        service.authenticate("dana", "wrong").await,
        Err(ClinicError::InvalidLogin)
    ));
    assert!(matches!(
        service.authenticate("fox", "s3cret").await,
        Err(ClinicError::UsernameNotFound(u)) if u == "fox"
    ));
}

#[tokio::test]
async fn test_email_length_counts_characters() {
    let service = create_test_service().await;

    let accented = format!("{}@ex.com", "é".repeat(80));
    assert!(accented.len() > 100);
    service.signup(registration("accented", &accented)).await.unwrap();

    let too_long = format!("{}@ex.com", "é".repeat(94));
    let result = service.signup(registration("longer", &too_long)).await;
    assert!(matches!(result, Err(ClinicError::InvalidEmail(_))));
}
