//! Per-employee performance metrics.
//!
//! A `PerformanceMetrics` row is derived entirely from the employee's closed
//! tickets and is replaced wholesale on every recalculation.

use serde::{Deserialize, Serialize};

/// Numerator of the efficiency score
pub const EFFICIENCY_NUMERATOR: f64 = 100.0;

/// Materialized metrics for one employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    #[serde(rename = "EmployeeID")]
    pub employee_id: i64,
    /// Mean resolution time in seconds over closed tickets
    #[serde(rename = "AverageResolutionTime")]
    pub average_resolution_time: f64,
    #[serde(rename = "TotalTicketsSolved")]
    pub total_tickets_solved: i64,
    #[serde(rename = "EfficiencyScore")]
    pub efficiency_score: f64,
}

impl PerformanceMetrics {
    pub fn from_summary(employee_id: i64, summary: MetricsSummary) -> Self {
        Self {
            employee_id,
            average_resolution_time: summary.average_resolution_time,
            total_tickets_solved: summary.total_tickets_solved,
            efficiency_score: summary.efficiency_score,
        }
    }
}

/// Aggregates computed from a set of closed tickets
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricsSummary {
    pub average_resolution_time: f64,
    pub total_tickets_solved: i64,
    pub efficiency_score: f64,
}

impl MetricsSummary {
    /// Build a summary from an aggregate query result.
    ///
    /// `average` is `None` when the employee has no closed tickets (SQL `AVG`
    /// over zero rows), which is treated as an average of zero.
    pub fn from_aggregate(average: Option<f64>, count: i64) -> Self {
        let average_resolution_time = average.unwrap_or(0.0);
        Self {
            average_resolution_time,
            total_tickets_solved: count,
            efficiency_score: efficiency_score(average_resolution_time),
        }
    }
}

/// `100 / average`, with a zero average replaced by 1.
///
/// An employee with no closed tickets therefore scores exactly 100.
pub fn efficiency_score(average_resolution_time: f64) -> f64 {
    let divisor = if average_resolution_time == 0.0 {
        1.0
    } else {
        average_resolution_time
    };
    EFFICIENCY_NUMERATOR / divisor
}
