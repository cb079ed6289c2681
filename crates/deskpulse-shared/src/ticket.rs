//! Ticket types for the service desk lifecycle.
//!
//! A ticket is opened by one employee and closed exactly once.
//! `end_time` and `resolution_time` are only present on closed tickets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ticket status. Transitions one way: `InProgress` -> `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TicketStatus {
    #[default]
    InProgress,
    Closed,
}

impl TicketStatus {
    /// Value stored in the `Status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "In Progress",
            Self::Closed => "Closed",
        }
    }

    /// Parse a stored `Status` value. Accepts the enum spelling as well.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "In Progress" | "InProgress" => Some(Self::InProgress),
            "Closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A support ticket owned by one employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ticket {
    #[serde(rename = "TicketID")]
    pub ticket_id: i64,
    #[serde(rename = "EmployeeID")]
    pub employee_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Seconds between start and end
    pub resolution_time: Option<f64>,
    pub status: TicketStatus,
}

impl Ticket {
    /// New in-progress ticket started at `start_time`
    pub fn open(employee_id: i64, ticket_id: i64, start_time: DateTime<Utc>) -> Self {
        Self {
            ticket_id,
            employee_id,
            start_time,
            end_time: None,
            resolution_time: None,
            status: TicketStatus::InProgress,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.status == TicketStatus::Closed
    }

    /// Close the ticket at `end_time`, returning the resolution time.
    ///
    /// An end time earlier than the start (clock skew) resolves to zero.
    pub fn close(&mut self, end_time: DateTime<Utc>) -> f64 {
        let seconds = resolution_seconds(self.start_time, end_time);
        self.end_time = Some(end_time);
        self.resolution_time = Some(seconds);
        self.status = TicketStatus::Closed;
        seconds
    }
}

/// Elapsed seconds from `start` to `end` with millisecond precision, never negative.
pub fn resolution_seconds(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let millis = (end - start).num_milliseconds().max(0);
    millis as f64 / 1000.0
}
