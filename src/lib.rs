pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod session;
pub mod state;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::database::models::{Associate, Customer, SkillSet, Staff, TaskItem, Tenant, WorkOrder};
use crate::handlers::protected::list_entities;
use crate::state::AppState;

/// Full HTTP surface with the request pipeline applied to every route.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security);
    let prefix = state.config.api.route_prefix();

    Router::new()
        .route("/health", get(handlers::health))
        .route(&format!("{}/version", prefix), get(handlers::public::version))
        .merge(public_routes(&prefix))
        .merge(protected_routes(&prefix))
        .fallback(handlers::not_found)
        .layer(from_fn_with_state(state.clone(), middleware::request_pipeline))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes(prefix: &str) -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route(&format!("{}/v1/register", prefix), post(auth::register))
        .route(&format!("{}/v1/login", prefix), post(auth::login))
        .route(&format!("{}/v1/refresh-token", prefix), post(auth::refresh_token))
}

fn protected_routes(prefix: &str) -> Router<AppState> {
    use handlers::protected::profile;

    let v1 = |path: &str| format!("{}/v1/{}", prefix, path);
    Router::new()
        .route(&v1("profile"), get(profile))
        // Tenant registry, keyset paginated, executives only
        .route(&v1("tenants"), get(list_entities::<Tenant>))
        .route(&v1("franchises"), get(list_entities::<Tenant>))
        .route(&v1("customers"), get(list_entities::<Customer>))
        .route(&v1("associates"), get(list_entities::<Associate>))
        .route(&v1("staff"), get(list_entities::<Staff>))
        .route(&v1("skill-sets"), get(list_entities::<SkillSet>))
        .route(&v1("tasks"), get(list_entities::<TaskItem>))
        .route(&v1("orders"), get(list_entities::<WorkOrder>))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
