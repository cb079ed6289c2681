//! Error types for deskpulse.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Ticket {ticket_id} not found for employee {employee_id}")]
    TicketNotFound { employee_id: i64, ticket_id: i64 },

    #[error("Ticket {0} not found")]
    UnknownTicket(i64),

    #[error("Ticket {0} already exists")]
    DuplicateTicket(i64),

    #[error("Ticket {0} is already closed")]
    TicketAlreadyClosed(i64),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DeskError {
    /// Stable machine-readable code carried in error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            DeskError::TicketNotFound { .. } | DeskError::UnknownTicket(_) => "ticket_not_found",
            DeskError::DuplicateTicket(_) => "duplicate_ticket",
            DeskError::TicketAlreadyClosed(_) => "ticket_already_closed",
            DeskError::InvalidRequest(_) => "invalid_request",
            DeskError::Storage(_) => "storage_error",
            DeskError::Internal(_) => "internal_error",
        }
    }

    /// HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            DeskError::TicketNotFound { .. } | DeskError::UnknownTicket(_) => 404,
            DeskError::DuplicateTicket(_) | DeskError::TicketAlreadyClosed(_) => 409,
            DeskError::InvalidRequest(_) => 400,
            DeskError::Storage(_) | DeskError::Internal(_) => 500,
        }
    }

    /// True for failures caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status())
    }
}
