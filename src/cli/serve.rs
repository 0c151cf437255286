use anyhow::Context;
use tokio::net::TcpListener;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::session;
use crate::state::AppState;

pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Workery API in {:?} mode", config.environment);

    let tokens = TokenService::from_config(&config.security).context("JWT_SECRET must be set")?;
    let pool = DatabaseManager::connect_lazy(&config.database)?;
    let sessions = session::from_config(&config.session)
        .await
        .context("failed to open session store")?;

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let state = AppState::new(config, pool.clone(), sessions, tokens);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Workery API listening on http://{}", bind_addr);

    axum::serve(listener, crate::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
