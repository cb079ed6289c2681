//! JSON request and response shapes for the HTTP surface.

use crate::metrics::PerformanceMetrics;
use serde::{Deserialize, Serialize};

pub const MSG_TICKET_STARTED: &str = "Ticket started successfully";
pub const MSG_TICKET_CLOSED: &str = "Ticket closed successfully";
pub const MSG_NO_PERFORMANCE_DATA: &str = "No performance data found";

/// Body of `POST /start_ticket` and `POST /end_ticket`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRequest {
    pub employee_id: i64,
    pub ticket_id: i64,
}

/// Plain `{"message": ...}` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of `GET /performance/:employee_id`: the metrics row, or the
/// no-data sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PerformanceResponse {
    Found(PerformanceMetrics),
    Missing(MessageResponse),
}

impl PerformanceResponse {
    pub fn from_row(row: Option<PerformanceMetrics>) -> Self {
        match row {
            Some(metrics) => Self::Found(metrics),
            None => Self::Missing(MessageResponse::new(MSG_NO_PERFORMANCE_DATA)),
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Error envelope returned with every non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}
