use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::middleware::RequestContext;

/// GET /api/version
pub async fn version(Extension(ctx): Extension<RequestContext>) -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "authenticated": ctx.is_authorized,
    }))
}
