// POST /api/v1/login

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::verify_password;
use crate::database::models::User;
use crate::database::QuerySettings;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: i16,
    pub tenant_id: i64,
    pub access_token: String,
    pub refresh_token: String,
}

/// Check credentials, open a new session and return a token pair for it.
///
/// Every successful login creates an independent session; earlier sessions
/// for the same user stay valid.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::invalid_json(e.body_text()))?;

    let email = req.email.trim().to_lowercase();
    if email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("email and password are required"));
    }

    let settings = QuerySettings::from_config(&state.config.database);
    let user = User::find_by_email(&state.pool, &settings, &email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("incorrect email or password"))?;

    let password = req.password;
    let hash = user.password_hash.clone();
    if !super::blocking(move || verify_password(&password, &hash)).await? {
        tracing::warn!("Failed login for {}", email);
        return Err(ApiError::unauthorized("incorrect email or password"));
    }

    let session_uuid = Uuid::new_v4();
    let identity = user.to_identity(session_uuid)?;
    if !identity.is_active() {
        return Err(ApiError::forbidden("account disabled - please contact admin"));
    }

    state
        .sessions
        .put(session_uuid, &identity, state.config.session.ttl())
        .await?;
    let pair = state.tokens.issue_pair(session_uuid)?;

    tracing::info!("User {} logged in to tenant {}", user.id, user.tenant_id);

    Ok(Json(LoginResponse {
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        role: user.role,
        tenant_id: user.tenant_id,
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
    }))
}
