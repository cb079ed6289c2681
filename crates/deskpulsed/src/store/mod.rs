//! SQLite-backed ticket store.
//!
//! The store keeps only the database path. Every operation opens its own
//! connection and drops it before returning, so no connection outlives a
//! request. `AsyncTicketStore` moves that blocking work off the runtime.

pub mod schema;

use crate::metrics;
use chrono::{DateTime, Utc};
use deskpulse_shared::{DeskError, PerformanceMetrics, Ticket, TicketStatus};
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default time a connection waits on a locked database
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const TICKET_COLUMNS: &str = "TicketID, EmployeeID, StartTime, EndTime, ResolutionTime, Status";

/// Map a SQLite failure onto the storage error variant
pub(crate) fn storage_err(err: rusqlite::Error) -> DeskError {
    DeskError::Storage(err.to_string())
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
    )
}

/// Ticket and metrics storage in a single SQLite file
#[derive(Debug, Clone)]
pub struct TicketStore {
    db_path: PathBuf,
    busy_timeout: Duration,
}

impl TicketStore {
    /// Open or create the store at `path`, creating tables as needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DeskError> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Open with an explicit busy timeout
    pub fn open_with_timeout(
        path: impl AsRef<Path>,
        busy_timeout: Duration,
    ) -> Result<Self, DeskError> {
        let db_path = path.as_ref().to_path_buf();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DeskError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        info!("Opening ticket database at: {}", db_path.display());

        let store = Self {
            db_path,
            busy_timeout,
        };

        let conn = store.connect()?;
        let journal_mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(storage_err)?;
        debug!("Journal mode: {}", journal_mode);
        schema::init_schema(&conn).map_err(storage_err)?;

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Open a fresh connection for one operation
    fn connect(&self) -> Result<Connection, DeskError> {
        let conn = Connection::open(&self.db_path).map_err(storage_err)?;
        conn.busy_timeout(self.busy_timeout).map_err(storage_err)?;
        Ok(conn)
    }

    /// Record a ticket start at `start_time`
    pub fn insert_ticket_at(
        &self,
        employee_id: i64,
        ticket_id: i64,
        start_time: DateTime<Utc>,
    ) -> Result<Ticket, DeskError> {
        let ticket = Ticket::open(employee_id, ticket_id, start_time);
        let conn = self.connect()?;

        conn.execute(
            "INSERT INTO Tickets (TicketID, EmployeeID, StartTime, Status) VALUES (?1, ?2, ?3, ?4)",
            params![
                ticket.ticket_id,
                ticket.employee_id,
                ticket.start_time,
                ticket.status.as_str()
            ],
        )
        .map_err(|e| {
            if is_constraint_violation(&e) {
                DeskError::DuplicateTicket(ticket_id)
            } else {
                storage_err(e)
            }
        })?;

        debug!("Inserted ticket {} for employee {}", ticket_id, employee_id);
        Ok(ticket)
    }

    /// Fetch a ticket by id
    pub fn get_ticket(&self, ticket_id: i64) -> Result<Option<Ticket>, DeskError> {
        let conn = self.connect()?;
        conn.query_row(
            &format!("SELECT {} FROM Tickets WHERE TicketID = ?1", TICKET_COLUMNS),
            params![ticket_id],
            map_ticket,
        )
        .optional()
        .map_err(storage_err)
    }

    /// Close a ticket at `end_time` and recompute the owner's metrics.
    ///
    /// The ticket update and the metrics upsert commit together.
    pub fn close_ticket_at(
        &self,
        employee_id: i64,
        ticket_id: i64,
        end_time: DateTime<Utc>,
    ) -> Result<(Ticket, PerformanceMetrics), DeskError> {
        let mut conn = self.connect()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(storage_err)?;

        let mut ticket = tx
            .query_row(
                &format!(
                    "SELECT {} FROM Tickets WHERE TicketID = ?1 AND EmployeeID = ?2",
                    TICKET_COLUMNS
                ),
                params![ticket_id, employee_id],
                map_ticket,
            )
            .optional()
            .map_err(storage_err)?
            .ok_or(DeskError::TicketNotFound {
                employee_id,
                ticket_id,
            })?;

        if ticket.is_closed() {
            return Err(DeskError::TicketAlreadyClosed(ticket_id));
        }

        let resolution_time = ticket.close(end_time);
        tx.execute(
            "UPDATE Tickets SET EndTime = ?1, ResolutionTime = ?2, Status = ?3
             WHERE TicketID = ?4 AND EmployeeID = ?5",
            params![
                end_time,
                resolution_time,
                TicketStatus::Closed.as_str(),
                ticket_id,
                employee_id
            ],
        )
        .map_err(storage_err)?;

        let metrics = metrics::recompute(&tx, employee_id)?;
        tx.commit().map_err(storage_err)?;

        debug!(
            "Closed ticket {} for employee {} after {:.3}s",
            ticket_id, employee_id, resolution_time
        );
        Ok((ticket, metrics))
    }

    /// Read the stored metrics row for an employee
    pub fn get_metrics(&self, employee_id: i64) -> Result<Option<PerformanceMetrics>, DeskError> {
        let conn = self.connect()?;
        metrics::load(&conn, employee_id)
    }
}

fn map_ticket(row: &Row<'_>) -> rusqlite::Result<Ticket> {
    let status_text: String = row.get(5)?;
    let status = TicketStatus::parse(&status_text).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            5,
            Type::Text,
            format!("unknown ticket status '{}'", status_text).into(),
        )
    })?;

    Ok(Ticket {
        ticket_id: row.get(0)?,
        employee_id: row.get(1)?,
        start_time: row.get(2)?,
        end_time: row.get(3)?,
        resolution_time: row.get(4)?,
        status,
    })
}

/// Async front for `TicketStore`; each call runs on the blocking pool
#[derive(Debug, Clone)]
pub struct AsyncTicketStore {
    inner: Arc<TicketStore>,
}

impl AsyncTicketStore {
    pub fn new(store: TicketStore) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    async fn run<T, F>(&self, op: F) -> Result<T, DeskError>
    where
        F: FnOnce(&TicketStore) -> Result<T, DeskError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || op(&*store))
            .await
            .map_err(|e| DeskError::Internal(format!("storage task failed: {}", e)))?
    }

    pub async fn start_ticket(
        &self,
        employee_id: i64,
        ticket_id: i64,
        start_time: DateTime<Utc>,
    ) -> Result<Ticket, DeskError> {
        self.run(move |s| s.insert_ticket_at(employee_id, ticket_id, start_time))
            .await
    }

    pub async fn end_ticket(
        &self,
        employee_id: i64,
        ticket_id: i64,
        end_time: DateTime<Utc>,
    ) -> Result<(Ticket, PerformanceMetrics), DeskError> {
        self.run(move |s| s.close_ticket_at(employee_id, ticket_id, end_time))
            .await
    }

    pub async fn ticket(&self, ticket_id: i64) -> Result<Option<Ticket>, DeskError> {
        self.run(move |s| s.get_ticket(ticket_id)).await
    }

    pub async fn performance(
        &self,
        employee_id: i64,
    ) -> Result<Option<PerformanceMetrics>, DeskError> {
        self.run(move |s| s.get_metrics(employee_id)).await
    }
}
