//! Metrics query handler: `GET /performance/:employee_id`.
//!
//! A missing row is not an error; it answers 200 with the no-data message.

use crate::api_error::ApiError;
use crate::server::AppStateArc;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use deskpulse_shared::rpc::PerformanceResponse;
use tracing::debug;

pub async fn get_performance(
    State(state): State<AppStateArc>,
    employee_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PerformanceResponse>, ApiError> {
    let Path(employee_id) = employee_id?;

    let row = state.store.performance(employee_id).await?;
    if row.is_none() {
        debug!("  No metrics stored for employee {}", employee_id);
    }

    Ok(Json(PerformanceResponse::from_row(row)))
}
