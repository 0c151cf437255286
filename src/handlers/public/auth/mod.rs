// Token acquisition endpoints: reachable without a session.
pub mod login;
pub mod refresh;
pub mod register;

pub use login::login;
pub use refresh::refresh_token;
pub use register::register;

use crate::error::ApiError;

/// Run CPU-bound password hashing off the async workers.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::internal_server_error(format!("password worker failed: {}", e)))
}
