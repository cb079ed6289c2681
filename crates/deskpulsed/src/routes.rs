//! API routes for deskpulsed

use crate::performance::get_performance;
use crate::server::AppStateArc;
use crate::tickets::{end_ticket, get_ticket, start_ticket};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use deskpulse_shared::rpc::HealthResponse;
use deskpulse_shared::VERSION;

// ============================================================================
// Ticket Routes
// ============================================================================

pub fn ticket_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/start_ticket", post(start_ticket))
        .route("/end_ticket", post(end_ticket))
        .route("/tickets/:ticket_id", get(get_ticket))
}

// ============================================================================
// Performance Routes
// ============================================================================

pub fn performance_routes() -> Router<AppStateArc> {
    Router::new().route("/performance/:employee_id", get(get_performance))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
