//! Table definitions for the ticket database.
//!
//! Column names follow the layout of existing employee_performance.db files
//! so that those files can be opened in place.

use rusqlite::Connection;

/// Current schema version, recorded in `schema_meta`
pub const SCHEMA_VERSION: u32 = 1;

/// Create tables and indexes if they do not exist yet
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS Tickets (
            TicketID INTEGER PRIMARY KEY,
            EmployeeID INTEGER NOT NULL,
            StartTime DATETIME NOT NULL,
            EndTime DATETIME,
            ResolutionTime REAL,
            Status TEXT NOT NULL
        )
        "#,
        [],
    )?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS PerformanceMetrics (
            EmployeeID INTEGER PRIMARY KEY,
            AverageResolutionTime REAL NOT NULL,
            TotalTicketsSolved INTEGER NOT NULL,
            EfficiencyScore REAL NOT NULL
        )
        "#,
        [],
    )?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS schema_meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
        [],
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO schema_meta (key, value) VALUES ('version', ?1)",
        [SCHEMA_VERSION.to_string()],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tickets_employee_status
         ON Tickets(EmployeeID, Status)",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master
                 WHERE type = 'table' AND name IN ('Tickets', 'PerformanceMetrics')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 2);

        let version: String = conn
            .query_row("SELECT value FROM schema_meta WHERE key = 'version'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION.to_string());
    }
}
