use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{SessionError, SessionIdentity, SessionStore};

struct Entry {
    identity: SessionIdentity,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| at > now)
    }
}

/// In-process session store for development and tests.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<Uuid, Entry>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn live_count(&self) -> usize {
        let now = Instant::now();
        self.sessions.read().await.values().filter(|e| e.is_live(now)).count()
    }

    /// Entries held in memory, expired or not.
    pub async fn stored_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(&self, session_uuid: Uuid, identity: &SessionIdentity, ttl: Option<Duration>) -> Result<(), SessionError> {
        let now = Instant::now();
        let entry = Entry {
            identity: identity.clone(),
            expires_at: ttl.map(|ttl| now + ttl),
        };

        let mut sessions = self.sessions.write().await;
        // sweep sessions that expired without ever being read again
        sessions.retain(|_, e| e.is_live(now));
        sessions.insert(session_uuid, entry);
        Ok(())
    }

    async fn get(&self, session_uuid: Uuid) -> Result<Option<SessionIdentity>, SessionError> {
        let now = Instant::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(&session_uuid) {
                None => return Ok(None),
                Some(entry) if entry.is_live(now) => return Ok(Some(entry.identity.clone())),
                Some(_) => {}
            }
        }

        // Expired: evict lazily
        self.sessions.write().await.remove(&session_uuid);
        Ok(None)
    }

    async fn delete(&self, session_uuid: Uuid) -> Result<(), SessionError> {
        self.sessions.write().await.remove(&session_uuid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::sample_identity;

    #[tokio::test]
    async fn put_get_delete() {
        let store = MemorySessionStore::new();
        let id = Uuid::new_v4();
        let identity = sample_identity(id);

        assert!(store.get(id).await.unwrap().is_none());
        store.put(id, &identity, None).await.unwrap();
        assert_eq!(store.get(id).await.unwrap(), Some(identity));

        store.delete(id).await.unwrap();
        assert!(store.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let store = MemorySessionStore::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        store.put(a, &sample_identity(a), None).await.unwrap();
        store.put(b, &sample_identity(b), None).await.unwrap();

        store.delete(a).await.unwrap();
        assert!(store.get(b).await.unwrap().is_some());
        assert_eq!(store.live_count().await, 1);
    }

    #[tokio::test]
    async fn expired_sessions_read_as_absent() {
        let store = MemorySessionStore::new();
        let id = Uuid::new_v4();
        store.put(id, &sample_identity(id), Some(Duration::from_millis(20))).await.unwrap();
        assert!(store.get(id).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(store.get(id).await.unwrap().is_none());
        assert_eq!(store.live_count().await, 0);
    }

    #[tokio::test]
    async fn writes_sweep_unread_expired_sessions() {
        let store = MemorySessionStore::new();
        let (stale, fresh) = (Uuid::new_v4(), Uuid::new_v4());
        store.put(stale, &sample_identity(stale), Some(Duration::from_millis(20))).await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(store.stored_count().await, 1);

        store.put(fresh, &sample_identity(fresh), None).await.unwrap();
        assert_eq!(store.stored_count().await, 1);
        assert!(store.get(fresh).await.unwrap().is_some());
    }
}
