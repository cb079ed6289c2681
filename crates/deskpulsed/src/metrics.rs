//! Metrics calculator.
//!
//! Recomputes an employee's `PerformanceMetrics` row from their closed
//! tickets and replaces the stored row.

use crate::store::storage_err;
use deskpulse_shared::metrics::MetricsSummary;
use deskpulse_shared::{DeskError, PerformanceMetrics, TicketStatus};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

/// Recompute metrics for `employee_id` and upsert them.
///
/// An employee without closed tickets gets an average of 0, a count of 0
/// and an efficiency score of 100.
pub fn recompute(conn: &Connection, employee_id: i64) -> Result<PerformanceMetrics, DeskError> {
    let (average, count): (Option<f64>, i64) = conn
        .query_row(
            "SELECT AVG(ResolutionTime), COUNT(*) FROM Tickets
             WHERE EmployeeID = ?1 AND Status = ?2",
            params![employee_id, TicketStatus::Closed.as_str()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .map_err(storage_err)?;

    let metrics =
        PerformanceMetrics::from_summary(employee_id, MetricsSummary::from_aggregate(average, count));
    upsert(conn, &metrics)?;

    debug!(
        "Employee {}: avg={:.3}s solved={} score={:.3}",
        employee_id,
        metrics.average_resolution_time,
        metrics.total_tickets_solved,
        metrics.efficiency_score
    );
    Ok(metrics)
}

/// Replace the stored row for this employee
pub fn upsert(conn: &Connection, metrics: &PerformanceMetrics) -> Result<(), DeskError> {
    conn.execute(
        "INSERT OR REPLACE INTO PerformanceMetrics
            (EmployeeID, AverageResolutionTime, TotalTicketsSolved, EfficiencyScore)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            metrics.employee_id,
            metrics.average_resolution_time,
            metrics.total_tickets_solved,
            metrics.efficiency_score
        ],
    )
    .map_err(storage_err)?;
    Ok(())
}

/// Read the stored row, if any
pub fn load(conn: &Connection, employee_id: i64) -> Result<Option<PerformanceMetrics>, DeskError> {
    conn.query_row(
        "SELECT EmployeeID, AverageResolutionTime, TotalTicketsSolved, EfficiencyScore
         FROM PerformanceMetrics WHERE EmployeeID = ?1",
        params![employee_id],
        |row| {
            Ok(PerformanceMetrics {
                employee_id: row.get(0)?,
                average_resolution_time: row.get(1)?,
                total_tickets_solved: row.get(2)?,
                efficiency_score: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(storage_err)
}
