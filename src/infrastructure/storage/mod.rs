use crate::core::errors::ClinicError;
use crate::core::models::{
    patient::{NewPatient, Patient},
    post::{BlogPost, NewPost},
    user::{NewUser, User},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Record store for the three independent tables. Listings are returned
/// most-recent-first by their timestamp column.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, ClinicError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, ClinicError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, ClinicError>;

    async fn create_patient(&self, patient: NewPatient, date_treated: DateTime<Utc>) -> Result<Patient, ClinicError>;
    async fn get_patient(&self, patient_id: i64) -> Result<Option<Patient>, ClinicError>;
    async fn list_patients(&self) -> Result<Vec<Patient>, ClinicError>;
    /// Returns `false` when no row had that id.
    async fn delete_patient(&self, patient_id: i64) -> Result<bool, ClinicError>;

    async fn create_post(&self, post: NewPost, date_posted: DateTime<Utc>) -> Result<BlogPost, ClinicError>;
    async fn get_post(&self, post_id: i64) -> Result<Option<BlogPost>, ClinicError>;
    async fn list_posts(&self) -> Result<Vec<BlogPost>, ClinicError>;
    async fn delete_post(&self, post_id: i64) -> Result<bool, ClinicError>;
}

pub mod sqlite;
