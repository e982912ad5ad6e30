pub mod api;
pub mod auth;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::api::handlers::routes;
pub use crate::api::state::{AppState, SharedState};
pub use crate::core::errors::ClinicError;
pub use crate::core::services::ClinicService;
pub use crate::infrastructure::storage::sqlite::SqliteStorage;

#[cfg(test)]
mod tests; // Include integration tests
