use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::manager::{with_timeout, DatabaseError, QuerySettings};
use crate::session::{AccountState, Role, SessionIdentity};

const USER_COLUMNS: &str =
    "id, uuid, tenant_id, email, first_name, last_name, password_hash, state, role, timezone, created_time";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub uuid: Uuid,
    pub tenant_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub state: i16,
    pub role: i16,
    pub timezone: String,
    pub created_time: DateTime<Utc>,
}

/// Fields required to create an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub tenant_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub state: AccountState,
    pub role: Role,
    pub timezone: String,
}

impl User {
    pub async fn find_by_email(pool: &PgPool, settings: &QuerySettings, email: &str) -> Result<Option<User>, DatabaseError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        with_timeout(
            settings.timeout,
            sqlx::query_as::<_, User>(&query).bind(email).fetch_optional(pool),
        )
        .await
    }

    pub async fn exists_by_email(pool: &PgPool, settings: &QuerySettings, email: &str) -> Result<bool, DatabaseError> {
        with_timeout(
            settings.timeout,
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(pool),
        )
        .await
    }

    pub async fn insert(pool: &PgPool, settings: &QuerySettings, new_user: &NewUser) -> Result<User, DatabaseError> {
        let query = format!(
            "INSERT INTO users (uuid, tenant_id, email, first_name, last_name, password_hash, state, role, timezone) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}",
            USER_COLUMNS
        );
        with_timeout(
            settings.timeout,
            sqlx::query_as::<_, User>(&query)
                .bind(Uuid::new_v4())
                .bind(new_user.tenant_id)
                .bind(&new_user.email)
                .bind(&new_user.first_name)
                .bind(&new_user.last_name)
                .bind(&new_user.password_hash)
                .bind(i16::from(new_user.state))
                .bind(i16::from(new_user.role))
                .bind(&new_user.timezone)
                .fetch_one(pool),
        )
        .await
    }

    /// Snapshot stored under a fresh session id at login.
    pub fn to_identity(&self, session_uuid: Uuid) -> Result<SessionIdentity, DatabaseError> {
        let role = Role::try_from(self.role).map_err(|e| DatabaseError::QueryError(e.to_string()))?;
        let state = AccountState::try_from(self.state).map_err(|e| DatabaseError::QueryError(e.to_string()))?;

        Ok(SessionIdentity {
            user_id: self.id,
            tenant_id: self.tenant_id,
            role,
            session_uuid,
            timezone: self.timezone.clone(),
            state,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        })
    }
}
