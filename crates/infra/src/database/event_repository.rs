//! SQLite implementation of the EventRepository port.
//!
//! Instants are stored as integer milliseconds since the epoch. The
//! conditional insert runs inside a `BEGIN IMMEDIATE` transaction: the write
//! lock is taken before the overlap and cap queries, so no other connection
//! (in this process or another) can insert between check and write.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use slotwise_core::EventRepository;
use slotwise_domain::{
    BookingCandidate, ConflictReason, Event, EventStatus, InsertOutcome, LocalDay, Result,
    SlotwiseError, TimeRange,
};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::manager::DbManager;
use crate::errors::conversions::to_domain;

const SELECT_COLUMNS: &str = "SELECT id, owner_id, event_type_id, start_utc, end_utc, status,
        attendee_email, attendee_name, notes, created_at
     FROM events";

pub struct SqliteEventRepository {
    db: Arc<DbManager>,
}

impl SqliteEventRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

fn millis(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis()
}

/// Drops sub-millisecond precision so the returned event equals the stored row.
fn at_storage_precision(instant: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(instant.timestamp_millis()).unwrap_or(instant)
}

fn conversion_error(
    column: usize,
    ty: Type,
    err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, ty, err.into())
}

fn instant_column(row: &Row<'_>, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    let value: i64 = row.get(column)?;
    DateTime::from_timestamp_millis(value)
        .ok_or_else(|| conversion_error(column, Type::Integer, "timestamp out of range"))
}

fn map_event(row: &Row<'_>) -> rusqlite::Result<Event> {
    let id: String = row.get(0)?;
    let status: String = row.get(5)?;

    Ok(Event {
        id: Uuid::parse_str(&id).map_err(|err| conversion_error(0, Type::Text, err))?,
        owner_id: row.get(1)?,
        event_type_id: row.get(2)?,
        start_utc: instant_column(row, 3)?,
        end_utc: instant_column(row, 4)?,
        status: status.parse::<EventStatus>().map_err(|err| conversion_error(5, Type::Text, err))?,
        attendee_email: row.get(6)?,
        attendee_name: row.get(7)?,
        notes: row.get(8)?,
        created_at: instant_column(row, 9)?,
    })
}

fn find_event(conn: &Connection, owner_id: &str, event_id: Uuid) -> Result<Option<Event>> {
    conn.query_row(
        &format!("{SELECT_COLUMNS} WHERE owner_id = ?1 AND id = ?2"),
        params![owner_id, event_id.to_string()],
        map_event,
    )
    .optional()
    .map_err(to_domain)
}

fn day_range(day: &LocalDay) -> Result<TimeRange> {
    day.utc_range().ok_or_else(|| {
        SlotwiseError::InvalidInput(format!("cannot resolve local day {} in {}", day.date, day.timezone))
    })
}

#[async_trait]
impl EventRepository for SqliteEventRepository {
    #[instrument(skip(self))]
    async fn list_confirmed(&self, owner_id: &str, range: TimeRange) -> Result<Vec<Event>> {
        let owner_id = owner_id.to_string();
        self.db
            .run(move |conn| {
                let mut stmt = conn
                    .prepare(&format!(
                        "{SELECT_COLUMNS}
                         WHERE owner_id = ?1 AND status = 'confirmed'
                           AND start_utc < ?3 AND end_utc > ?2
                         ORDER BY start_utc"
                    ))
                    .map_err(to_domain)?;
                let events = stmt
                    .query_map(params![owner_id, millis(range.start), millis(range.end)], map_event)
                    .map_err(to_domain)?
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .map_err(to_domain)?;
                Ok(events)
            })
            .await
    }

    #[instrument(skip(self), fields(date = %day.date))]
    async fn count_confirmed_on_date(&self, owner_id: &str, day: &LocalDay) -> Result<u32> {
        let owner_id = owner_id.to_string();
        let range = day_range(day)?;
        self.db
            .run(move |conn| {
                conn.query_row(
                    "SELECT COUNT(*) FROM events
                     WHERE owner_id = ?1 AND status = 'confirmed'
                       AND start_utc >= ?2 AND start_utc < ?3",
                    params![owner_id, millis(range.start), millis(range.end)],
                    |row| row.get::<_, u32>(0),
                )
                .map_err(to_domain)
            })
            .await
    }

    #[instrument(skip(self, candidate), fields(owner_id = %candidate.event.owner_id))]
    async fn insert_if_no_overlap(&self, candidate: BookingCandidate) -> Result<InsertOutcome> {
        let day = day_range(&candidate.day)?;
        let guarded = candidate.guarded_range();
        let cap = candidate.daily_cap;

        let mut event = candidate.event;
        event.start_utc = at_storage_precision(event.start_utc);
        event.end_utc = at_storage_precision(event.end_utc);
        event.created_at = at_storage_precision(event.created_at);

        self.db
            .run(move |conn| {
                let tx = conn
                    .transaction_with_behavior(TransactionBehavior::Immediate)
                    .map_err(to_domain)?;

                let overlapping: bool = tx
                    .query_row(
                        "SELECT EXISTS (
                            SELECT 1 FROM events
                            WHERE owner_id = ?1 AND status = 'confirmed'
                              AND start_utc < ?3 AND end_utc > ?2
                         )",
                        params![event.owner_id, millis(guarded.start), millis(guarded.end)],
                        |row| row.get(0),
                    )
                    .map_err(to_domain)?;
                if overlapping {
                    debug!("overlapping confirmed event");
                    return Ok(InsertOutcome::Conflict(ConflictReason::Overlap));
                }

                let on_day: u32 = tx
                    .query_row(
                        "SELECT COUNT(*) FROM events
                         WHERE owner_id = ?1 AND status = 'confirmed'
                           AND start_utc >= ?2 AND start_utc < ?3",
                        params![event.owner_id, millis(day.start), millis(day.end)],
                        |row| row.get(0),
                    )
                    .map_err(to_domain)?;
                if cap.is_reached(on_day) {
                    debug!(on_day, "daily cap reached");
                    return Ok(InsertOutcome::Conflict(ConflictReason::DailyCapReached));
                }

                tx.execute(
                    "INSERT INTO events
                        (id, owner_id, event_type_id, start_utc, end_utc, status,
                         attendee_email, attendee_name, notes, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    params![
                        event.id.to_string(),
                        event.owner_id,
                        event.event_type_id,
                        millis(event.start_utc),
                        millis(event.end_utc),
                        event.status.to_string(),
                        event.attendee_email,
                        event.attendee_name,
                        event.notes,
                        millis(event.created_at)
                    ],
                )
                .map_err(to_domain)?;
                tx.commit().map_err(to_domain)?;

                debug!(event_id = %event.id, "event inserted");
                Ok(InsertOutcome::Inserted(event))
            })
            .await
    }

    #[instrument(skip(self))]
    async fn get(&self, owner_id: &str, event_id: Uuid) -> Result<Option<Event>> {
        let owner_id = owner_id.to_string();
        self.db.run(move |conn| find_event(conn, &owner_id, event_id)).await
    }

    #[instrument(skip(self))]
    async fn cancel(&self, owner_id: &str, event_id: Uuid) -> Result<Option<Event>> {
        let owner_id = owner_id.to_string();
        self.db
            .run(move |conn| {
                conn.execute(
                    "UPDATE events SET status = 'cancelled'
                     WHERE owner_id = ?1 AND id = ?2 AND status = 'confirmed'",
                    params![owner_id, event_id.to_string()],
                )
                .map_err(to_domain)?;
                find_event(conn, &owner_id, event_id)
            })
            .await
    }
}
