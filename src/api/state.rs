use crate::auth::jwt::JwtService;
use crate::core::services::ClinicService;
use crate::infrastructure::sessions::in_memory::InMemorySessionStore;
use crate::infrastructure::storage::sqlite::SqliteStorage;
use std::sync::Arc;
use std::time::Duration;

pub struct AppState {
    pub service: ClinicService<SqliteStorage>,
    pub sessions: InMemorySessionStore,
    pub jwt: JwtService,
    pub session_ttl: Duration,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(storage: SqliteStorage, secret: String, session_ttl: Duration, bcrypt_cost: u32) -> SharedState {
        Arc::new(AppState {
            service: ClinicService::new(storage, bcrypt_cost),
            sessions: InMemorySessionStore::new(),
            jwt: JwtService::new(secret, session_ttl.as_secs()),
            session_ttl,
        })
    }
}
