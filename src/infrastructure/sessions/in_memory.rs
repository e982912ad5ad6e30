use crate::core::errors::ClinicError;
use crate::core::models::session::{Notice, SessionData};
use crate::infrastructure::sessions::SessionStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, (SessionData, chrono::DateTime<chrono::Utc>)>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        InMemorySessionStore {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn expiry_after(
    now: chrono::DateTime<chrono::Utc>,
    ttl: std::time::Duration,
) -> Result<chrono::DateTime<chrono::Utc>, ClinicError> {
    let ttl = chrono::Duration::from_std(ttl)
        .map_err(|e| ClinicError::SessionError(format!("Failed to convert TTL: {}", e)))?;
    Ok(now + ttl)
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_id: Uuid) -> Result<Option<SessionData>, ClinicError> {
        let now = chrono::Utc::now();
        let expired = {
            let sessions = self.sessions.read().await;
            match sessions.get(&session_id) {
                Some((data, expiry)) if *expiry > now => return Ok(Some(data.clone())),
                Some(_) => true,
                None => false,
            }
        };
        if expired {
            let mut sessions = self.sessions.write().await;
            sessions.retain(|_, (_, expiry)| *expiry > now);
        }
        Ok(None)
    }

    async fn save(&self, session_id: Uuid, data: SessionData, ttl: std::time::Duration) -> Result<(), ClinicError> {
        let now = chrono::Utc::now();
        let expiry = expiry_after(now, ttl)?;
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, (_, expiry)| *expiry > now);
        sessions.insert(session_id, (data, expiry));
        Ok(())
    }

    async fn update_notice(
        &self,
        session_id: Uuid,
        notice: Option<Notice>,
        ttl: std::time::Duration,
    ) -> Result<bool, ClinicError> {
        let now = chrono::Utc::now();
        let new_expiry = expiry_after(now, ttl)?;
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, (_, expiry)| *expiry > now);
        match sessions.get_mut(&session_id) {
            Some((data, expiry)) => {
                data.notice = notice;
                *expiry = new_expiry;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn destroy(&self, session_id: Uuid) -> Result<(), ClinicError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_expired_session_is_dropped() {
        let store = InMemorySessionStore::new();
        let live = Uuid::new_v4();
        let stale = Uuid::new_v4();
        let data = SessionData {
            logged_in: true,
            ..Default::default()
        };
        store.save(live, data.clone(), Duration::from_secs(60)).await.unwrap();
        store.save(stale, data.clone(), Duration::ZERO).await.unwrap();

        assert!(store.load(stale).await.unwrap().is_none());
        assert_eq!(store.load(live).await.unwrap(), Some(data));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_save_purges_expired_sessions() {
        let store = InMemorySessionStore::new();
        for _ in 0..5 {
            store.save(Uuid::new_v4(), SessionData::default(), Duration::ZERO).await.unwrap();
        }
        assert!(store.len().await <= 1);

        store
            .save(Uuid::new_v4(), SessionData::default(), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_notice_keeps_other_fields_and_skips_missing_sessions() {
        let store = InMemorySessionStore::new();
        let id = Uuid::new_v4();
        let data = SessionData {
            logged_in: true,
            username: Some("dana".to_string()),
            name: Some("Dana".to_string()),
            notice: Some(Notice::success("saved")),
        };
        store.save(id, data.clone(), Duration::from_secs(60)).await.unwrap();

        assert!(store.update_notice(id, None, Duration::from_secs(60)).await.unwrap());
        let stored = store.load(id).await.unwrap().unwrap();
        assert_eq!(stored.notice, None);
        assert!(stored.logged_in);
        assert_eq!(stored.username, data.username);

        store.destroy(id).await.unwrap();
        assert!(!store.update_notice(id, None, Duration::from_secs(60)).await.unwrap());
        assert!(store.load(id).await.unwrap().is_none());
        assert_eq!(store.len().await, 0);
    }
}
