use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub pagination: PaginationConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    /// Prefix stripped before the path is split into routing segments.
    pub root_prefix: String,
    /// Second path segments reachable without a session.
    pub public_paths: Vec<String>,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub query_timeout_ms: u64,
    pub enable_slow_query_warning: bool,
    pub slow_query_threshold_ms: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionBackend {
    Redis,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub backend: SessionBackend,
    pub redis_url: String,
    /// `None` keeps sessions until they are explicitly deleted.
    pub ttl_secs: Option<u64>,
    pub revoke_on_refresh: bool,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    pub auth_scheme: String,
    pub access_token_expiry_hours: u64,
    pub refresh_token_expiry_hours: u64,
    pub password_hash_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // API overrides
        if let Some(v) = env::var("WORKERY_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Ok(v) = env::var("API_ROOT_PREFIX") {
            self.api.root_prefix = v;
        }
        if let Ok(v) = env::var("API_PUBLIC_PATHS") {
            self.api.public_paths = v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect();
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        // Pagination overrides
        if let Ok(v) = env::var("PAGINATION_DEFAULT_PAGE_SIZE") {
            self.pagination.default_page_size = v.parse().unwrap_or(self.pagination.default_page_size);
        }
        if let Ok(v) = env::var("PAGINATION_MAX_PAGE_SIZE") {
            self.pagination.max_page_size = v.parse().unwrap_or(self.pagination.max_page_size);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_QUERY_TIMEOUT_MS") {
            self.database.query_timeout_ms = v.parse().unwrap_or(self.database.query_timeout_ms);
        }
        if let Ok(v) = env::var("DATABASE_ENABLE_SLOW_QUERY_WARNING") {
            self.database.enable_slow_query_warning = v.parse().unwrap_or(self.database.enable_slow_query_warning);
        }
        if let Ok(v) = env::var("DATABASE_SLOW_QUERY_THRESHOLD_MS") {
            self.database.slow_query_threshold_ms = v.parse().unwrap_or(self.database.slow_query_threshold_ms);
        }

        // Session overrides
        if let Ok(v) = env::var("SESSION_BACKEND") {
            self.session.backend = match v.to_ascii_lowercase().as_str() {
                "memory" => SessionBackend::Memory,
                "redis" => SessionBackend::Redis,
                _ => self.session.backend,
            };
        }
        if let Ok(v) = env::var("REDIS_URL") {
            self.session.redis_url = v;
        }
        if let Ok(v) = env::var("SESSION_TTL_SECS") {
            // 0 and unparsable values mean "never expire"
            self.session.ttl_secs = v.parse().ok().filter(|secs| *secs > 0);
        }
        if let Ok(v) = env::var("SESSION_REVOKE_ON_REFRESH") {
            self.session.revoke_on_refresh = v.parse().unwrap_or(self.session.revoke_on_refresh);
        }
        if let Ok(v) = env::var("SESSION_TIMEOUT_MS") {
            self.session.timeout_ms = v.parse().unwrap_or(self.session.timeout_ms);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_AUTH_SCHEME") {
            self.security.auth_scheme = v;
        }
        if let Ok(v) = env::var("SECURITY_ACCESS_TOKEN_EXPIRY_HOURS") {
            self.security.access_token_expiry_hours = v.parse().unwrap_or(self.security.access_token_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_REFRESH_TOKEN_EXPIRY_HOURS") {
            self.security.refresh_token_expiry_hours = v.parse().unwrap_or(self.security.refresh_token_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_PASSWORD_HASH_COST") {
            self.security.password_hash_cost = v.parse().unwrap_or(self.security.password_hash_cost);
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig::default(),
            pagination: PaginationConfig::default(),
            database: DatabaseConfig {
                url: "postgres://localhost:5432/workery".to_string(),
                max_connections: 10,
                connection_timeout: 30,
                query_timeout_ms: 5_000,
                enable_slow_query_warning: true,
                slow_query_threshold_ms: 100,
            },
            session: SessionConfig {
                backend: SessionBackend::Memory,
                redis_url: "redis://127.0.0.1:6379".to_string(),
                ttl_secs: None,
                revoke_on_refresh: false,
                timeout_ms: 5_000,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
                jwt_secret: String::new(),
                auth_scheme: "Bearer".to_string(),
                access_token_expiry_hours: 24 * 7, // 1 week
                refresh_token_expiry_hours: 24 * 14,
                password_hash_cost: bcrypt::DEFAULT_COST,
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig::default(),
            pagination: PaginationConfig::default(),
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 20,
                connection_timeout: 10,
                query_timeout_ms: 5_000,
                enable_slow_query_warning: true,
                slow_query_threshold_ms: 500,
            },
            session: SessionConfig {
                backend: SessionBackend::Redis,
                redis_url: "redis://127.0.0.1:6379".to_string(),
                ttl_secs: None,
                revoke_on_refresh: false,
                timeout_ms: 5_000,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.workery.ca".to_string()],
                jwt_secret: String::new(),
                auth_scheme: "Bearer".to_string(),
                access_token_expiry_hours: 24,
                refresh_token_expiry_hours: 24 * 7,
                password_hash_cost: bcrypt::DEFAULT_COST,
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                enable_request_logging: false,
                ..ApiConfig::default()
            },
            pagination: PaginationConfig::default(),
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 50,
                connection_timeout: 5,
                query_timeout_ms: 5_000,
                enable_slow_query_warning: true,
                slow_query_threshold_ms: 1000,
            },
            session: SessionConfig {
                backend: SessionBackend::Redis,
                redis_url: "redis://127.0.0.1:6379".to_string(),
                ttl_secs: None,
                revoke_on_refresh: false,
                timeout_ms: 5_000,
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.workery.ca".to_string()],
                jwt_secret: String::new(),
                auth_scheme: "Bearer".to_string(),
                access_token_expiry_hours: 24 * 7,
                refresh_token_expiry_hours: 24 * 14,
                password_hash_cost: bcrypt::DEFAULT_COST,
            },
        }
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> Option<std::time::Duration> {
        self.ttl_secs.map(std::time::Duration::from_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            root_prefix: "/api".to_string(),
            public_paths: vec![
                "register".to_string(),
                "login".to_string(),
                "refresh-token".to_string(),
            ],
            enable_request_logging: true,
        }
    }
}

impl ApiConfig {
    /// Root prefix as mounted: a leading slash, no trailing slash, empty for none.
    pub fn route_prefix(&self) -> String {
        match self.root_prefix.trim_matches('/') {
            "" => String::new(),
            p => format!("/{}", p),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 100,
            max_page_size: 500,
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.session.backend, SessionBackend::Memory);
        assert_eq!(config.pagination.default_page_size, 100);
        assert_eq!(config.pagination.max_page_size, 500);
        assert_eq!(config.security.auth_scheme, "Bearer");
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.session.backend, SessionBackend::Redis);
        assert!(!config.api.enable_request_logging);
        assert_eq!(config.session.ttl_secs, None);
        assert!(!config.session.revoke_on_refresh);
    }

    #[test]
    fn public_paths_cover_token_acquisition() {
        let api = ApiConfig::default();
        for path in ["register", "login", "refresh-token"] {
            assert!(api.public_paths.iter().any(|p| p == path), "missing {}", path);
        }
        assert_eq!(api.root_prefix, "/api");
    }

    #[test]
    fn route_prefix_is_normalized() {
        let mut api = ApiConfig::default();
        assert_eq!(api.route_prefix(), "/api");

        api.root_prefix = "workery/".to_string();
        assert_eq!(api.route_prefix(), "/workery");

        api.root_prefix = "/".to_string();
        assert_eq!(api.route_prefix(), "");
    }
}
