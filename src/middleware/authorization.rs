use uuid::Uuid;

use crate::error::ApiError;
use crate::session::{SessionIdentity, SessionStore};

/// Resolve an authenticated session to the identity it was created for.
pub async fn resolve_identity(store: &dyn SessionStore, session_uuid: Uuid) -> Result<SessionIdentity, ApiError> {
    let identity = store
        .get(session_uuid)
        .await?
        .ok_or_else(|| {
            tracing::debug!("Session {} not found in store", session_uuid);
            ApiError::unauthorized("session expired - please log in again")
        })?;

    if !identity.is_active() {
        tracing::warn!("Rejected disabled account {} (tenant {})", identity.user_id, identity.tenant_id);
        return Err(ApiError::forbidden("account disabled - please contact admin"));
    }

    Ok(identity)
}
