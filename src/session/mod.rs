use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::{SessionBackend, SessionConfig};

pub mod memory;
pub mod redis_store;

pub use memory::MemorySessionStore;
pub use redis_store::RedisSessionStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("session payload error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("session store timed out after {0}ms")]
    Timeout(u64),
}

#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub i16);

#[derive(Debug, Error)]
#[error("unknown account state: {0}")]
pub struct UnknownAccountState(pub i16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum Role {
    Executive = 1,
    Management = 2,
    FrontlineStaff = 3,
    Associate = 4,
    Customer = 5,
}

impl Role {
    pub fn is_executive(self) -> bool {
        self == Role::Executive
    }
}

impl TryFrom<i16> for Role {
    type Error = UnknownRole;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Role::Executive),
            2 => Ok(Role::Management),
            3 => Ok(Role::FrontlineStaff),
            4 => Ok(Role::Associate),
            5 => Ok(Role::Customer),
            other => Err(UnknownRole(other)),
        }
    }
}

impl From<Role> for i16 {
    fn from(role: Role) -> Self {
        role as i16
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum AccountState {
    Inactive = 0,
    Active = 1,
}

impl TryFrom<i16> for AccountState {
    type Error = UnknownAccountState;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AccountState::Inactive),
            1 => Ok(AccountState::Active),
            other => Err(UnknownAccountState(other)),
        }
    }
}

impl From<AccountState> for i16 {
    fn from(state: AccountState) -> Self {
        state as i16
    }
}

/// Identity snapshot written at login and read back on every authorized request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub user_id: i64,
    pub tenant_id: i64,
    pub role: Role,
    pub session_uuid: Uuid,
    pub timezone: String,
    pub state: AccountState,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl SessionIdentity {
    pub fn is_active(&self) -> bool {
        self.state == AccountState::Active
    }
}

/// Key-value mapping from session id to identity snapshot.
///
/// Absence is `Ok(None)`, never an error. Every call is bounded by the
/// store's configured timeout.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn put(&self, session_uuid: Uuid, identity: &SessionIdentity, ttl: Option<Duration>) -> Result<(), SessionError>;

    async fn get(&self, session_uuid: Uuid) -> Result<Option<SessionIdentity>, SessionError>;

    async fn delete(&self, session_uuid: Uuid) -> Result<(), SessionError>;
}

pub async fn from_config(config: &SessionConfig) -> Result<Arc<dyn SessionStore>, SessionError> {
    let timeout = Duration::from_millis(config.timeout_ms);
    match config.backend {
        SessionBackend::Redis => {
            let store = RedisSessionStore::connect(&config.redis_url, timeout).await?;
            tracing::info!("Session store: redis at {}", config.redis_url);
            Ok(Arc::new(store))
        }
        SessionBackend::Memory => {
            tracing::info!("Session store: in-process memory");
            Ok(Arc::new(MemorySessionStore::new()))
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_identity(session_uuid: Uuid) -> SessionIdentity {
    SessionIdentity {
        user_id: 7,
        tenant_id: 2,
        role: Role::Management,
        session_uuid,
        timezone: "utc".to_string(),
        state: AccountState::Active,
        email: "frank@example.com".to_string(),
        first_name: "Frank".to_string(),
        last_name: "Herbert".to_string(),
    }
}
