//! Shared types for deskpulse components.
//!
//! Ticket and metrics records, the JSON request/response shapes of the
//! HTTP surface, the error taxonomy and the efficiency formula.

pub mod error;
pub mod metrics;
pub mod rpc;
pub mod ticket;

pub use error::DeskError;
pub use metrics::{efficiency_score, MetricsSummary, PerformanceMetrics};
pub use ticket::{Ticket, TicketStatus};

/// Crate version, reported by the health endpoint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
