use axum::http::{header::AUTHORIZATION, HeaderMap};
use uuid::Uuid;

use super::guard::RouteClass;
use crate::auth::{TokenKind, TokenService};
use crate::error::ApiError;

/// Validate the `Authorization` header and return the session it names.
///
/// Absent headers and the literal `undefined` are anonymous. A header that is
/// not `<scheme> <token>` is always a 400. A token that fails validation is a
/// 401 on protected routes and anonymous elsewhere.
pub fn authenticate(
    headers: &HeaderMap,
    tokens: &TokenService,
    scheme: &str,
    class: RouteClass,
) -> Result<Option<Uuid>, ApiError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let header = value
        .to_str()
        .map_err(|_| ApiError::bad_request("malformed Authorization header"))?;

    if header.contains("undefined") {
        return Ok(None);
    }

    let token = header
        .strip_prefix(scheme)
        .and_then(|rest| rest.strip_prefix(' '))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request(format!("Authorization header must be '{} <token>'", scheme)))?;

    match tokens.validate(token, TokenKind::Access) {
        Ok(claims) => Ok(Some(claims.session_uuid)),
        Err(e) if class.tolerates_bad_token() => {
            tracing::warn!("Ignoring rejected token on {:?} route: {}", class, e);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
