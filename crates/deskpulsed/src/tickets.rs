//! Ticket lifecycle handlers.
//!
//! `POST /start_ticket` opens a ticket, `POST /end_ticket` closes it and
//! recomputes the owner's metrics before answering.

use crate::api_error::ApiError;
use crate::server::AppStateArc;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use deskpulse_shared::rpc::{MessageResponse, TicketRequest, MSG_TICKET_CLOSED, MSG_TICKET_STARTED};
use deskpulse_shared::{DeskError, Ticket};
use tracing::info;

pub async fn start_ticket(
    State(state): State<AppStateArc>,
    payload: Result<Json<TicketRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(req) = payload?;

    let ticket = state
        .store
        .start_ticket(req.employee_id, req.ticket_id, Utc::now())
        .await?;

    info!(
        "  Ticket {} started by employee {} at {}",
        ticket.ticket_id,
        ticket.employee_id,
        ticket.start_time.to_rfc3339()
    );
    Ok(Json(MessageResponse::new(MSG_TICKET_STARTED)))
}

pub async fn end_ticket(
    State(state): State<AppStateArc>,
    payload: Result<Json<TicketRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(req) = payload?;

    let (ticket, metrics) = state
        .store
        .end_ticket(req.employee_id, req.ticket_id, Utc::now())
        .await?;

    info!(
        "  Ticket {} closed by employee {} in {:.3}s (solved={}, score={:.2})",
        ticket.ticket_id,
        ticket.employee_id,
        ticket.resolution_time.unwrap_or_default(),
        metrics.total_tickets_solved,
        metrics.efficiency_score
    );
    Ok(Json(MessageResponse::new(MSG_TICKET_CLOSED)))
}

pub async fn get_ticket(
    State(state): State<AppStateArc>,
    ticket_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Ticket>, ApiError> {
    let Path(ticket_id) = ticket_id?;

    let ticket = state
        .store
        .ticket(ticket_id)
        .await?
        .ok_or(DeskError::UnknownTicket(ticket_id))?;
    Ok(Json(ticket))
}
