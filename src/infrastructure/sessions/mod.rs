pub mod in_memory;

use crate::core::errors::ClinicError;
use crate::core::models::session::{Notice, SessionData};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns `None` for unknown or expired sessions.
    async fn load(&self, session_id: Uuid) -> Result<Option<SessionData>, ClinicError>;
    /// Stores the whole session, replacing any previous entry.
    async fn save(&self, session_id: Uuid, data: SessionData, ttl: std::time::Duration) -> Result<(), ClinicError>;
    /// Replaces only the pending notice of a live session. Returns `false`
    /// without storing anything when the session is gone.
    async fn update_notice(
        &self,
        session_id: Uuid,
        notice: Option<Notice>,
        ttl: std::time::Duration,
    ) -> Result<bool, ClinicError>;
    async fn destroy(&self, session_id: Uuid) -> Result<(), ClinicError>;
}
