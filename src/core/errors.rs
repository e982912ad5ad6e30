use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum ClinicError {
    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Email format is invalid
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Generic input validation error with detailed field information
    #[error("{}", .1.description)]
    InvalidInput(String, FieldError),

    #[error("Username {0} is already taken")]
    UsernameTaken(String),

    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),

    #[error("Username not found")]
    UsernameNotFound(String),

    /// Stored hash did not verify against the submitted password
    #[error("Invalid login")]
    InvalidLogin,

    #[error("Patient {0} not found")]
    PatientNotFound(i64),

    #[error("Post {0} not found")]
    PostNotFound(i64),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl ClinicError {
    /// Errors that re-render the submitted form instead of failing the request.
    pub fn is_form_error(&self) -> bool {
        matches!(
            self,
            ClinicError::PasswordMismatch
                | ClinicError::InvalidEmail(_)
                | ClinicError::InvalidInput(..)
                | ClinicError::UsernameTaken(_)
                | ClinicError::EmailAlreadyRegistered(_)
                | ClinicError::UsernameNotFound(_)
                | ClinicError::InvalidLogin
        )
    }
}

impl From<sqlx::Error> for ClinicError {
    fn from(err: sqlx::Error) -> Self {
        ClinicError::DatabaseError(err.to_string())
    }
}
