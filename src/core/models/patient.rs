use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema, PartialEq)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub age: String,
    pub treatment: String,
    pub infection: String,
    pub allergy: String,
    pub medication: String,
    pub prescription: String,
    pub date_treated: DateTime<Utc>,
    pub next_appointment: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct NewPatient {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub age: String,
    pub treatment: String,
    pub infection: String,
    pub allergy: String,
    pub medication: String,
    pub prescription: String,
    pub next_appointment: String,
}
