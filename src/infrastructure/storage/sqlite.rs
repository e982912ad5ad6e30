use crate::core::errors::ClinicError;
use crate::core::models::{
    patient::{NewPatient, Patient},
    post::{BlogPost, NewPost},
    user::{NewUser, User},
};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(50) NOT NULL,
        email VARCHAR(100) NOT NULL UNIQUE,
        username VARCHAR(100) NOT NULL UNIQUE,
        password VARCHAR(100) NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS patients (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(50) NOT NULL,
        phone VARCHAR(50) NOT NULL DEFAULT '',
        email VARCHAR(100) NOT NULL,
        age VARCHAR(50) NOT NULL,
        treatment TEXT NOT NULL DEFAULT '',
        infection TEXT NOT NULL DEFAULT '',
        allergy TEXT NOT NULL DEFAULT '',
        medication TEXT NOT NULL DEFAULT '',
        prescription TEXT NOT NULL DEFAULT '',
        date_treated DATETIME NOT NULL,
        next_appointment VARCHAR(20) NOT NULL DEFAULT ''
    )",
    "CREATE TABLE IF NOT EXISTS blog_posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title VARCHAR(50) NOT NULL,
        subtitle VARCHAR(50) NOT NULL,
        author VARCHAR(20) NOT NULL,
        date_posted DATETIME NOT NULL,
        content TEXT NOT NULL
    )",
];

const PATIENT_COLUMNS: &str = "id, name, phone, email, age, treatment, infection, allergy, medication, \
                               prescription, date_treated, next_appointment";
const POST_COLUMNS: &str = "id, title, subtitle, author, content, date_posted";

#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Opens (creating if missing) the database at `database_url` and makes
    /// sure all tables exist.
    pub async fn connect(database_url: &str) -> Result<Self, ClinicError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every connection to `:memory:` is a separate database, so pin the pool to one.
        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new().connect_with(options).await?
        };
        let storage = SqliteStorage { pool };
        storage.init_schema().await?;
        Ok(storage)
    }

    async fn init_schema(&self) -> Result<(), ClinicError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn create_user(&self, user: NewUser) -> Result<User, ClinicError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, username, password) VALUES (?, ?, ?, ?)
             RETURNING id, name, email, username, password",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                if db.message().contains("users.email") {
                    ClinicError::EmailAlreadyRegistered(user.email)
                } else {
                    ClinicError::UsernameTaken(user.username)
                }
            }
            other => other.into(),
        })
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, ClinicError> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email, username, password FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, ClinicError> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email, username, password FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create_patient(&self, patient: NewPatient, date_treated: DateTime<Utc>) -> Result<Patient, ClinicError> {
        let sql = format!(
            "INSERT INTO patients (name, phone, email, age, treatment, infection, allergy, medication, \
             prescription, date_treated, next_appointment) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) \
             RETURNING {}",
            PATIENT_COLUMNS
        );
        let created = sqlx::query_as::<_, Patient>(&sql)
            .bind(patient.name)
            .bind(patient.phone)
            .bind(patient.email)
            .bind(patient.age)
            .bind(patient.treatment)
            .bind(patient.infection)
            .bind(patient.allergy)
            .bind(patient.medication)
            .bind(patient.prescription)
            .bind(date_treated)
            .bind(patient.next_appointment)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn get_patient(&self, patient_id: i64) -> Result<Option<Patient>, ClinicError> {
        let sql = format!("SELECT {} FROM patients WHERE id = ?", PATIENT_COLUMNS);
        let patient = sqlx::query_as::<_, Patient>(&sql)
            .bind(patient_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(patient)
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, ClinicError> {
        let sql = format!(
            "SELECT {} FROM patients ORDER BY date_treated DESC, id DESC",
            PATIENT_COLUMNS
        );
        let patients = sqlx::query_as::<_, Patient>(&sql).fetch_all(&self.pool).await?;
        Ok(patients)
    }

    async fn delete_patient(&self, patient_id: i64) -> Result<bool, ClinicError> {
        let result = sqlx::query("DELETE FROM patients WHERE id = ?")
            .bind(patient_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_post(&self, post: NewPost, date_posted: DateTime<Utc>) -> Result<BlogPost, ClinicError> {
        let sql = format!(
            "INSERT INTO blog_posts (title, subtitle, author, content, date_posted) VALUES (?, ?, ?, ?, ?) \
             RETURNING {}",
            POST_COLUMNS
        );
        let created = sqlx::query_as::<_, BlogPost>(&sql)
            .bind(post.title)
            .bind(post.subtitle)
            .bind(post.author)
            .bind(post.content)
            .bind(date_posted)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn get_post(&self, post_id: i64) -> Result<Option<BlogPost>, ClinicError> {
        let sql = format!("SELECT {} FROM blog_posts WHERE id = ?", POST_COLUMNS);
        let post = sqlx::query_as::<_, BlogPost>(&sql)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(post)
    }

    async fn list_posts(&self) -> Result<Vec<BlogPost>, ClinicError> {
        let sql = format!("SELECT {} FROM blog_posts ORDER BY date_posted DESC, id DESC", POST_COLUMNS);
        let posts = sqlx::query_as::<_, BlogPost>(&sql).fetch_all(&self.pool).await?;
        Ok(posts)
    }

    async fn delete_post(&self, post_id: i64) -> Result<bool, ClinicError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = ?")
            .bind(post_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
