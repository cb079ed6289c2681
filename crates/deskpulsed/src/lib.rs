//! deskpulse daemon library - exposes modules for testing.

pub mod api_error;
pub mod config;
pub mod metrics;
pub mod performance;
pub mod routes;
pub mod server;
pub mod store;
pub mod tickets;
