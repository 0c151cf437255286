// POST /api/v1/refresh-token

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::{TokenKind, TokenPair};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub value: String,
}

/// Exchange a refresh token for a new pair bound to a new session.
pub async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<TokenPair>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::invalid_json(e.body_text()))?;

    let claims = state.tokens.validate(req.value.trim(), TokenKind::Refresh)?;
    let previous = claims.session_uuid;

    let mut identity = state
        .sessions
        .get(previous)
        .await?
        .ok_or_else(|| ApiError::unauthorized("session expired - please log in again"))?;
    if !identity.is_active() {
        return Err(ApiError::forbidden("account disabled - please contact admin"));
    }

    let session_uuid = Uuid::new_v4();
    identity.session_uuid = session_uuid;
    state
        .sessions
        .put(session_uuid, &identity, state.config.session.ttl())
        .await?;
    let pair = state.tokens.issue_pair(session_uuid)?;

    if state.config.session.revoke_on_refresh {
        state.sessions.delete(previous).await?;
        tracing::debug!("Revoked session {} after refresh", previous);
    }

    Ok(Json(pair))
}
