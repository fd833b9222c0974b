//! HTTP API module for Lumina
//!
//! Provides REST endpoints for memories.

pub mod routes;

use crate::db::Database;
use crate::error::{CoreError, Result};
use crate::handlers::MemoryHandler;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database handle (used for readiness reporting)
    pub db: Arc<Database>,
    /// Memory business logic
    pub memories: MemoryHandler,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        AppState {
            memories: MemoryHandler::new(db.clone()),
            db,
        }
    }
}

/// Start the HTTP API server
pub async fn serve(addr: SocketAddr, db: Arc<Database>) -> Result<()> {
    if !db.is_ready() {
        return Err(CoreError::Api(
            "Database must be initialized before serving".to_string(),
        ));
    }

    let app = create_router(AppState::new(db));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CoreError::Api(e.to_string()))?;

    Ok(())
}

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/memories",
            get(routes::list_memories).post(routes::create_memory),
        )
        .route(
            "/memories/:id",
            get(routes::get_memory)
                .put(routes::update_memory)
                .delete(routes::delete_memory),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
