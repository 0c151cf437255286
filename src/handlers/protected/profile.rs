use axum::{Extension, Json};
use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::RequestContext;
use crate::session::Role;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: i64,
    pub tenant_id: i64,
    pub role: Role,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub timezone: String,
}

/// GET /api/v1/profile - the identity attached to the caller's session
pub async fn profile(Extension(ctx): Extension<RequestContext>) -> Result<Json<ProfileResponse>, ApiError> {
    let identity = ctx.identity()?;
    Ok(Json(ProfileResponse {
        user_id: identity.user_id,
        tenant_id: identity.tenant_id,
        role: identity.role,
        email: identity.email.clone(),
        first_name: identity.first_name.clone(),
        last_name: identity.last_name.clone(),
        timezone: identity.timezone.clone(),
    }))
}
