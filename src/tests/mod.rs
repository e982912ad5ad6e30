mod patient_tests;
mod user_tests;

use crate::api::state::{AppState, SharedState};
use crate::core::services::ClinicService;
use crate::infrastructure::storage::sqlite::SqliteStorage;
use std::time::Duration;

// Lowest cost bcrypt accepts; keeps hashing fast in tests.
pub const TEST_BCRYPT_COST: u32 = 4;

pub async fn create_test_storage() -> SqliteStorage {
    SqliteStorage::connect("sqlite::memory:").await.unwrap()
}

pub async fn create_test_service() -> ClinicService<SqliteStorage> {
    let _ = env_logger::try_init();
    ClinicService::new(create_test_storage().await, TEST_BCRYPT_COST)
}

pub async fn create_test_state() -> SharedState {
    let _ = env_logger::try_init();
    AppState::new(
        create_test_storage().await,
        "test-secret".to_string(),
        Duration::from_secs(3600),
        TEST_BCRYPT_COST,
    )
}
