//! Ticket store tests: lifecycle, metrics recalculation, legacy rows.

use approx::assert_relative_eq;
use chrono::{DateTime, Duration, TimeZone, Utc};
use deskpulse_shared::{DeskError, TicketStatus};
use deskpulsed::metrics;
use deskpulsed::store::TicketStore;
use rusqlite::{params, Connection};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 8, 30, 0).unwrap()
}

fn open_store() -> (TempDir, TicketStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = TicketStore::open(temp_dir.path().join("employee_performance.db")).unwrap();
    (temp_dir, store)
}

#[test]
fn test_open_creates_parent_directory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("dir").join("desk.db");
    let store = TicketStore::open(&path).unwrap();
    assert!(path.exists());
    assert_eq!(store.path(), path.as_path());
}

#[test]
fn test_started_ticket_is_in_progress() {
    let (_dir, store) = open_store();
    store.insert_ticket_at(1, 100, t0()).unwrap();

    let ticket = store.get_ticket(100).unwrap().unwrap();
    assert_eq!(ticket.employee_id, 1);
    assert_eq!(ticket.status, TicketStatus::InProgress);
    assert_eq!(ticket.start_time, t0());
    assert!(ticket.end_time.is_none());
    assert!(ticket.resolution_time.is_none());
}

#[test]
fn test_duplicate_ticket_id_is_rejected() {
    let (_dir, store) = open_store();
    store.insert_ticket_at(1, 100, t0()).unwrap();

    let err = store.insert_ticket_at(2, 100, t0()).unwrap_err();
    assert!(matches!(err, DeskError::DuplicateTicket(100)));

    // Original row untouched
    assert_eq!(store.get_ticket(100).unwrap().unwrap().employee_id, 1);
}

#[test]
fn test_thirty_second_scenario() {
    let (_dir, store) = open_store();
    store.insert_ticket_at(1, 100, t0()).unwrap();

    let (ticket, metrics) = store
        .close_ticket_at(1, 100, t0() + Duration::seconds(30))
        .unwrap();
    assert_eq!(ticket.status, TicketStatus::Closed);
    assert_eq!(ticket.resolution_time, Some(30.0));

    let stored = store.get_ticket(100).unwrap().unwrap();
    assert_eq!(stored.status, TicketStatus::Closed);
    assert_eq!(stored.end_time, Some(t0() + Duration::seconds(30)));
    let elapsed = (stored.end_time.unwrap() - stored.start_time).num_milliseconds() as f64 / 1000.0;
    assert_eq!(stored.resolution_time, Some(elapsed));

    assert_relative_eq!(metrics.average_resolution_time, 30.0);
    assert_eq!(metrics.total_tickets_solved, 1);
    assert_relative_eq!(metrics.efficiency_score, 3.33, epsilon = 0.01);

    assert_eq!(store.get_metrics(1).unwrap(), Some(metrics));
}

#[test]
fn test_end_unknown_ticket_is_not_found() {
    let (_dir, store) = open_store();

    let err = store.close_ticket_at(1, 404, t0()).unwrap_err();
    assert!(matches!(
        err,
        DeskError::TicketNotFound {
            employee_id: 1,
            ticket_id: 404
        }
    ));
    assert!(store.get_ticket(404).unwrap().is_none());
    assert!(store.get_metrics(1).unwrap().is_none());
}

#[test]
fn test_end_with_wrong_employee_is_not_found() {
    let (_dir, store) = open_store();
    store.insert_ticket_at(1, 100, t0()).unwrap();

    let err = store
        .close_ticket_at(2, 100, t0() + Duration::seconds(5))
        .unwrap_err();
    assert!(matches!(err, DeskError::TicketNotFound { .. }));
    assert_eq!(
        store.get_ticket(100).unwrap().unwrap().status,
        TicketStatus::InProgress
    );
}

#[test]
fn test_second_end_is_rejected_and_metrics_unchanged() {
    let (_dir, store) = open_store();
    store.insert_ticket_at(1, 100, t0()).unwrap();
    let (_, first) = store
        .close_ticket_at(1, 100, t0() + Duration::seconds(20))
        .unwrap();

    let err = store
        .close_ticket_at(1, 100, t0() + Duration::seconds(500))
        .unwrap_err();
    assert!(matches!(err, DeskError::TicketAlreadyClosed(100)));

    let ticket = store.get_ticket(100).unwrap().unwrap();
    assert_eq!(ticket.resolution_time, Some(20.0));
    assert_eq!(store.get_metrics(1).unwrap(), Some(first));
}

#[test]
fn test_average_over_n_closures() {
    let (_dir, store) = open_store();
    let durations = [12_i64, 30, 45, 93];

    for (i, secs) in durations.iter().enumerate() {
        let ticket_id = 200 + i as i64;
        store.insert_ticket_at(5, ticket_id, t0()).unwrap();
        store
            .close_ticket_at(5, ticket_id, t0() + Duration::seconds(*secs))
            .unwrap();
    }
    // An open ticket does not count
    store.insert_ticket_at(5, 299, t0()).unwrap();

    let metrics = store.get_metrics(5).unwrap().unwrap();
    assert_relative_eq!(metrics.average_resolution_time, 45.0);
    assert_eq!(metrics.total_tickets_solved, 4);
    assert_relative_eq!(metrics.efficiency_score, 100.0 / 45.0);
}

#[test]
fn test_metrics_are_per_employee() {
    let (_dir, store) = open_store();
    store.insert_ticket_at(1, 1, t0()).unwrap();
    store.insert_ticket_at(2, 2, t0()).unwrap();
    store.close_ticket_at(1, 1, t0() + Duration::seconds(10)).unwrap();
    store.close_ticket_at(2, 2, t0() + Duration::seconds(40)).unwrap();

    assert_relative_eq!(
        store.get_metrics(1).unwrap().unwrap().average_resolution_time,
        10.0
    );
    assert_relative_eq!(
        store.get_metrics(2).unwrap().unwrap().average_resolution_time,
        40.0
    );
}

#[test]
fn test_recompute_without_closed_tickets_scores_hundred() {
    let (_dir, store) = open_store();
    store.insert_ticket_at(8, 800, t0()).unwrap();

    let conn = Connection::open(store.path()).unwrap();
    let metrics = metrics::recompute(&conn, 8).unwrap();
    assert_eq!(metrics.average_resolution_time, 0.0);
    assert_eq!(metrics.total_tickets_solved, 0);
    assert_eq!(metrics.efficiency_score, 100.0);
    assert_eq!(store.get_metrics(8).unwrap(), Some(metrics));
}

#[test]
fn test_end_before_start_clamps_to_zero() {
    let (_dir, store) = open_store();
    store.insert_ticket_at(1, 100, t0()).unwrap();

    let (ticket, metrics) = store
        .close_ticket_at(1, 100, t0() - Duration::seconds(3))
        .unwrap();
    assert_eq!(ticket.resolution_time, Some(0.0));
    assert_eq!(metrics.efficiency_score, 100.0);
}

#[test]
fn test_legacy_rows_are_readable_and_closable() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("employee_performance.db");
    let store = TicketStore::open(&path).unwrap();

    // Rows written by the earlier deployment: naive timestamp text and the
    // spaced status spelling.
    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO Tickets (TicketID, EmployeeID, StartTime, Status)
         VALUES (?1, ?2, ?3, 'In Progress')",
        params![77, 3, "2024-06-03 08:30:00.250000"],
    )
    .unwrap();
    drop(conn);

    let ticket = store.get_ticket(77).unwrap().unwrap();
    assert_eq!(ticket.status, TicketStatus::InProgress);
    assert_eq!(ticket.start_time, t0() + Duration::milliseconds(250));

    let (closed, _) = store
        .close_ticket_at(3, 77, t0() + Duration::seconds(10))
        .unwrap();
    assert_eq!(closed.resolution_time, Some(9.75));
}

#[test]
fn test_state_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("employee_performance.db");

    {
        let store = TicketStore::open(&path).unwrap();
        store.insert_ticket_at(1, 100, t0()).unwrap();
        store
            .close_ticket_at(1, 100, t0() + Duration::seconds(60))
            .unwrap();
    }

    let store = TicketStore::open(&path).unwrap();
    let metrics = store.get_metrics(1).unwrap().unwrap();
    assert_eq!(metrics.total_tickets_solved, 1);
    assert_relative_eq!(metrics.average_resolution_time, 60.0);
}

#[test]
fn test_concurrent_closures_for_one_employee() {
    let (_dir, store) = open_store();
    let store = Arc::new(store);
    let workers = 8_i64;

    for i in 0..workers {
        store.insert_ticket_at(4, 1000 + i, t0()).unwrap();
    }

    let handles: Vec<_> = (0..workers)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store
                    .close_ticket_at(4, 1000 + i, t0() + Duration::seconds(10 * (i + 1)))
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Closures are serialized, so the last write reflects every ticket.
    let metrics = store.get_metrics(4).unwrap().unwrap();
    assert_eq!(metrics.total_tickets_solved, workers);
    assert_relative_eq!(metrics.average_resolution_time, 45.0);
}
