use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisResult};
use uuid::Uuid;

use super::{SessionError, SessionIdentity, SessionStore};

const KEY_PREFIX: &str = "session:";

/// Redis-backed sessions, one JSON string per key.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
    timeout: Duration,
}

impl RedisSessionStore {
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self, SessionError> {
        let client = redis::Client::open(url)?;
        let conn = tokio::time::timeout(timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| SessionError::Timeout(timeout.as_millis() as u64))??;
        Ok(Self { conn, timeout })
    }

    fn key(session_uuid: Uuid) -> String {
        format!("{}{}", KEY_PREFIX, session_uuid)
    }

    async fn bounded<T>(&self, fut: impl Future<Output = RedisResult<T>>) -> Result<T, SessionError> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| SessionError::Timeout(self.timeout.as_millis() as u64))?
            .map_err(SessionError::from)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(&self, session_uuid: Uuid, identity: &SessionIdentity, ttl: Option<Duration>) -> Result<(), SessionError> {
        let payload = serde_json::to_string(identity)?;
        let key = Self::key(session_uuid);
        let mut conn = self.conn.clone();

        match ttl {
            // SET EX rejects 0, so sub-second TTLs round up
            Some(ttl) => self.bounded(conn.set_ex::<_, _, ()>(key, payload, ttl.as_secs().max(1))).await,
            None => self.bounded(conn.set::<_, _, ()>(key, payload)).await,
        }
    }

    async fn get(&self, session_uuid: Uuid) -> Result<Option<SessionIdentity>, SessionError> {
        let mut conn = self.conn.clone();
        let payload: Option<String> = self.bounded(conn.get(Self::key(session_uuid))).await?;

        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, session_uuid: Uuid) -> Result<(), SessionError> {
        let mut conn = self.conn.clone();
        self.bounded(conn.del::<_, ()>(Self::key(session_uuid))).await
    }
}
