// POST /api/v1/register

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::hash_password;
use crate::database::models::{NewUser, User};
use crate::database::QuerySettings;
use crate::error::ApiError;
use crate::session::{AccountState, Role};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub tenant_id: i64,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Create an active associate account. Emails are unique across tenants.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::invalid_json(e.body_text()))?;

    let email = req.email.trim().to_lowercase();
    let missing: Vec<&str> = [
        ("email", email.as_str()),
        ("password", req.password.as_str()),
        ("first_name", req.first_name.trim()),
        ("last_name", req.last_name.trim()),
    ]
    .into_iter()
    .filter(|(_, v)| v.is_empty())
    .map(|(k, _)| k)
    .collect();
    if !missing.is_empty() {
        return Err(ApiError::bad_request(format!("missing required fields: {}", missing.join(", "))));
    }

    let settings = QuerySettings::from_config(&state.config.database);
    if User::exists_by_email(&state.pool, &settings, &email).await? {
        return Err(ApiError::conflict("email is already registered"));
    }

    let cost = state.config.security.password_hash_cost;
    let password = req.password;
    let password_hash = super::blocking(move || hash_password(&password, cost)).await??;

    let user = User::insert(
        &state.pool,
        &settings,
        &NewUser {
            tenant_id: req.tenant_id,
            email,
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            password_hash,
            state: AccountState::Active,
            role: Role::Associate,
            timezone: "utc".to_string(),
        },
    )
    .await
    .map_err(|e| {
        // a concurrent registration won the race past the existence check
        if e.is_unique_violation() {
            ApiError::conflict("email is already registered")
        } else {
            e.into()
        }
    })?;

    tracing::info!("Registered user {} in tenant {}", user.id, user.tenant_id);

    Ok((StatusCode::CREATED, Json(json!({ "message": "user registered" }))))
}
