use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::ClinicError;
use crate::core::models::{patient::Patient, post::BlogPost, session::Notice};

// Form payloads
#[derive(Deserialize, ToSchema, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Logged-in user as shown on every page.
#[derive(Serialize, ToSchema, Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    pub username: String,
    pub name: String,
}

/// Rendered page: the one-time notice, the current user and the page content.
#[derive(Serialize)]
pub struct Page<T: Serialize> {
    pub notice: Option<Notice>,
    pub user: Option<CurrentUser>,
    #[serde(flatten)]
    pub content: T,
}

#[derive(Serialize, ToSchema)]
pub struct HomeView {
    pub posts: Vec<BlogPost>,
}

#[derive(Serialize, ToSchema)]
pub struct AboutView {
    pub title: String,
    pub description: String,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardView {
    pub patients: Vec<Patient>,
}

#[derive(Serialize, ToSchema)]
pub struct PatientView {
    pub patient: Patient,
}

#[derive(Serialize, ToSchema)]
pub struct PostView {
    pub post: BlogPost,
}

/// A form page, re-rendered with `error` and the submitted `values` on failure.
#[derive(Serialize, ToSchema)]
pub struct FormView {
    pub form: String,
    pub error: Option<String>,
    #[schema(value_type = Object)]
    pub values: serde_json::Value,
}

impl FormView {
    pub fn empty(form: &str) -> Self {
        FormView {
            form: form.to_string(),
            error: None,
            values: serde_json::Value::Null,
        }
    }

    pub fn with_error(form: &str, error: String, values: serde_json::Value) -> Self {
        FormView {
            form: form.to_string(),
            error: Some(error),
            values,
        }
    }
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for ClinicError to implement IntoResponse
pub struct ApiError(pub ClinicError);

impl From<ClinicError> for ApiError {
    fn from(err: ClinicError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            ClinicError::PatientNotFound(_) | ClinicError::PostNotFound(_) => StatusCode::NOT_FOUND,
            ClinicError::UsernameNotFound(_) | ClinicError::InvalidLogin => StatusCode::UNAUTHORIZED,
            ClinicError::UsernameTaken(_) | ClinicError::EmailAlreadyRegistered(_) => StatusCode::CONFLICT,
            ClinicError::PasswordMismatch | ClinicError::InvalidEmail(_) | ClinicError::InvalidInput(..) => {
                StatusCode::BAD_REQUEST
            }
            ClinicError::SessionError(_) | ClinicError::InternalServerError(_) | ClinicError::DatabaseError(_) => {
                tracing::error!("Request failed: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
