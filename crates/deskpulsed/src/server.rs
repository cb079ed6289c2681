//! HTTP server for deskpulsed

use crate::routes;
use crate::store::{AsyncTicketStore, TicketStore};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub store: AsyncTicketStore,
    pub start_time: Instant,
}

pub type AppStateArc = Arc<AppState>;

impl AppState {
    pub fn new(store: TicketStore) -> Self {
        Self {
            store: AsyncTicketStore::new(store),
            start_time: Instant::now(),
        }
    }
}

/// Build the router with all routes and request tracing
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::ticket_routes())
        .merge(routes::performance_routes())
        .merge(routes::health_routes())
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until Ctrl-C
pub async fn run(state: AppState, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    info!("  Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down gracefully");
    }
}
