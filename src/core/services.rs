use crate::auth::password::{hash_password, verify_password};
use crate::constants::{
    AGE_MAX_LEN, APPOINTMENT_MAX_LEN, AUTHOR_MAX_LEN, EMAIL_MAX_LEN, NAME_MAX_LEN, PHONE_MAX_LEN, TITLE_MAX_LEN,
    USERNAME_MAX_LEN,
};
use crate::core::errors::{ClinicError, FieldError};
use crate::core::models::{
    patient::{NewPatient, Patient},
    post::{BlogPost, NewPost},
    user::{NewUser, Registration, User},
};
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email pattern is valid"));

pub struct ClinicService<S: Storage> {
    storage: S,
    bcrypt_cost: u32,
}

impl<S: Storage> ClinicService<S> {
    pub fn new(storage: S, bcrypt_cost: u32) -> Self {
        info!("Initializing ClinicService");
        ClinicService { storage, bcrypt_cost }
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), ClinicError> {
        if value.trim().is_empty() {
            return Err(ClinicError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        self.validate_length(field, value, max_length)
    }

    fn validate_length(&self, field: &str, value: &str, max_length: usize) -> Result<(), ClinicError> {
        if value.chars().count() > max_length {
            return Err(ClinicError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        if value.chars().any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t') {
            return Err(ClinicError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} contains invalid characters", field),
                },
            ));
        }
        Ok(())
    }

    fn validate_email(&self, email: &str) -> Result<(), ClinicError> {
        if email.chars().count() > EMAIL_MAX_LEN || !EMAIL_RE.is_match(email) {
            return Err(ClinicError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }

    // USERS

    pub async fn signup(&self, registration: Registration) -> Result<User, ClinicError> {
        info!("Registering user with username: {}", registration.username);
        self.validate_string_input("name", &registration.name, NAME_MAX_LEN)?;
        self.validate_string_input("username", &registration.username, USERNAME_MAX_LEN)?;
        self.validate_email(&registration.email)?;
        if registration.password.is_empty() {
            return Err(ClinicError::InvalidInput(
                "password".to_string(),
                FieldError {
                    field: "password".to_string(),
                    title: "Invalid password".to_string(),
                    description: "password cannot be empty".to_string(),
                },
            ));
        }
        if registration.password != registration.confirm {
            return Err(ClinicError::PasswordMismatch);
        }

        if self
            .storage
            .get_user_by_username(&registration.username)
            .await?
            .is_some()
        {
            return Err(ClinicError::UsernameTaken(registration.username));
        }
        if self.storage.get_user_by_email(&registration.email).await?.is_some() {
            return Err(ClinicError::EmailAlreadyRegistered(registration.email));
        }

        let user = self
            .storage
            .create_user(NewUser {
                password: hash_password(&registration.password, self.bcrypt_cost)?,
                name: registration.name,
                email: registration.email,
                username: registration.username,
            })
            .await?;
        debug!("User created with ID: {}", user.id);
        Ok(user)
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, ClinicError> {
        let user = self
            .storage
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| ClinicError::UsernameNotFound(username.to_string()))?;

        if verify_password(password, &user.password)? {
            info!("User {} logged in", user.username);
            Ok(user)
        } else {
            warn!("Failed login attempt for user {}", username);
            Err(ClinicError::InvalidLogin)
        }
    }

    // PATIENTS

    pub async fn list_patients(&self) -> Result<Vec<Patient>, ClinicError> {
        self.storage.list_patients().await
    }

    pub async fn get_patient(&self, patient_id: i64) -> Result<Patient, ClinicError> {
        self.storage
            .get_patient(patient_id)
            .await?
            .ok_or(ClinicError::PatientNotFound(patient_id))
    }

    pub async fn add_patient(&self, patient: NewPatient) -> Result<Patient, ClinicError> {
        self.validate_string_input("name", &patient.name, NAME_MAX_LEN)?;
        self.validate_string_input("email", &patient.email, EMAIL_MAX_LEN)?;
        self.validate_string_input("age", &patient.age, AGE_MAX_LEN)?;
        self.validate_length("phone", &patient.phone, PHONE_MAX_LEN)?;
        self.validate_length("next_appointment", &patient.next_appointment, APPOINTMENT_MAX_LEN)?;

        let created = self.storage.create_patient(patient, Utc::now()).await?;
        info!("Patient {} added", created.id);
        Ok(created)
    }

    pub async fn delete_patient(&self, patient_id: i64) -> Result<(), ClinicError> {
        if !self.storage.delete_patient(patient_id).await? {
            return Err(ClinicError::PatientNotFound(patient_id));
        }
        info!("Patient {} deleted", patient_id);
        Ok(())
    }

    // BLOG POSTS

    pub async fn list_posts(&self) -> Result<Vec<BlogPost>, ClinicError> {
        self.storage.list_posts().await
    }

    pub async fn get_post(&self, post_id: i64) -> Result<BlogPost, ClinicError> {
        self.storage
            .get_post(post_id)
            .await?
            .ok_or(ClinicError::PostNotFound(post_id))
    }

    pub async fn add_post(&self, post: NewPost) -> Result<BlogPost, ClinicError> {
        self.validate_string_input("title", &post.title, TITLE_MAX_LEN)?;
        self.validate_string_input("subtitle", &post.subtitle, TITLE_MAX_LEN)?;
        self.validate_string_input("author", &post.author, AUTHOR_MAX_LEN)?;
        if post.content.trim().is_empty() {
            return Err(ClinicError::InvalidInput(
                "content".to_string(),
                FieldError {
                    field: "content".to_string(),
                    title: "Invalid content".to_string(),
                    description: "content cannot be empty".to_string(),
                },
            ));
        }

        let created = self.storage.create_post(post, Utc::now()).await?;
        info!("Post {} added", created.id);
        Ok(created)
    }

    pub async fn delete_post(&self, post_id: i64) -> Result<(), ClinicError> {
        if !self.storage.delete_post(post_id).await? {
            return Err(ClinicError::PostNotFound(post_id));
        }
        info!("Post {} deleted", post_id);
        Ok(())
    }
}
