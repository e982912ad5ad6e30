use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, FromRow, ToSchema, PartialEq)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct NewPost {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub content: String,
}
