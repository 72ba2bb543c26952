use std::{env, sync::Arc};

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::app::{
    enums::log_level::LogLevel,
    envy::Envy,
    errors::StartupError,
    util::{logger, request_id::inject_request_id},
};

mod app;
mod webhooks;

#[derive(Clone)]
pub struct AppState {
    pub envy: Arc<Envy>,
}

pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.envy.body_limit();

    Router::new()
        .route("/health", get(app::controller::get_health))
        .route(
            "/webhook",
            post(webhooks::sonarr::controller::receive_webhook),
        )
        .fallback(app::controller::fallback)
        // layers
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(inject_request_id))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // environment
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
    let _ = dotenvy::from_filename(format!(".env.{}", app_env));

    let envy = match Envy::from_env() {
        Ok(envy) => envy,
        Err(e) => {
            logger::init(LogLevel::default(), LogLevel::default(), None)?;
            tracing::error!("failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let log_dir = envy.log_dir();
    // dropping the guard stops the file writer
    let _log_guard = logger::init(envy.log_level, envy.log_file_level, log_dir.as_deref())?;

    tracing::info!(
        app_env = %envy.app_env,
        sonarr_url = %envy.sonarr_url,
        sonarr_api_key = %envy.masked_api_key(),
        log_level = %envy.log_level,
        log_dir = ?log_dir,
        "Configuration loaded"
    );

    if let Err(e) = serve(envy).await {
        tracing::error!("{}", e);
        return Err(e);
    }

    Ok(())
}

async fn serve(envy: Envy) -> Result<(), StartupError> {
    let addr = envy.listen_addr()?;
    let state = Arc::new(AppState {
        envy: Arc::new(envy),
    });

    let server = axum::Server::try_bind(&addr).map_err(|e| StartupError::Server(e.to_string()))?;
    tracing::info!("listening on {}", addr);

    server
        .serve(router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StartupError::Server(e.to_string()))?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
