use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::session::SessionIdentity;
use crate::state::AppState;

pub mod authorization;
pub mod guard;
pub mod pagination;
pub mod path;
pub mod token;

pub use guard::RouteClass;
pub use pagination::PageParams;

/// Per-request context built once by [`request_pipeline`] and read by handlers
/// through `Extension<RequestContext>`.
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub path_segments: Vec<String>,
    pub page: PageParams,
    pub is_authorized: bool,
    pub session_uuid: Option<Uuid>,
    pub identity: Option<SessionIdentity>,
}

impl RequestContext {
    /// Identity of an authorized request; handlers behind the guard can rely on it.
    pub fn identity(&self) -> Result<&SessionIdentity, ApiError> {
        self.identity
            .as_ref()
            .ok_or_else(|| ApiError::unauthorized("authentication required"))
    }
}

/// Fixed-order request pipeline: path, pagination, token, authorization, guard.
///
/// Each stage either enriches the context or short-circuits with an error
/// response; later stages never run after an earlier one fails.
pub async fn request_pipeline(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let config = &state.config;

    let path_segments = path::split_path(request.uri().path(), &config.api.route_prefix());
    let page = PageParams::parse(request.uri().query(), &config.pagination);
    let class = guard::classify(&path_segments, &config.api.public_paths);

    let session_uuid = token::authenticate(
        request.headers(),
        &state.tokens,
        &config.security.auth_scheme,
        class,
    )?;

    let identity = match session_uuid {
        Some(id) => Some(authorization::resolve_identity(state.sessions.as_ref(), id).await?),
        None => None,
    };

    let context = RequestContext {
        path_segments,
        page,
        is_authorized: session_uuid.is_some(),
        session_uuid,
        identity,
    };

    guard::enforce(class, context.is_authorized)?;

    if config.api.enable_request_logging {
        tracing::debug!(
            segments = ?context.path_segments,
            authorized = context.is_authorized,
            tenant_id = context.identity.as_ref().map(|i| i.tenant_id),
            "request context established"
        );
    }

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}
