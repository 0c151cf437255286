use crate::error::ApiError;

/// Where a request sits relative to the public-path whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Fewer than two segments (`/api/version`, `/health`).
    Unclassified,
    Public,
    Protected,
}

impl RouteClass {
    pub fn tolerates_bad_token(self) -> bool {
        !matches!(self, RouteClass::Protected)
    }
}

pub fn classify(segments: &[String], public_paths: &[String]) -> RouteClass {
    match segments.get(1) {
        None => RouteClass::Unclassified,
        Some(resource) if public_paths.iter().any(|p| p == resource) => RouteClass::Public,
        Some(_) => RouteClass::Protected,
    }
}

pub fn enforce(class: RouteClass, is_authorized: bool) -> Result<(), ApiError> {
    if class == RouteClass::Protected && !is_authorized {
        return Err(ApiError::unauthorized("authentication required"));
    }
    Ok(())
}
