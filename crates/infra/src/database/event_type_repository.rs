//! SQLite implementation of the EventTypeRegistry port.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use slotwise_core::EventTypeRegistry;
use slotwise_domain::{EventType, Result};
use tracing::instrument;

use super::manager::DbManager;
use crate::errors::conversions::to_domain;

const SELECT_COLUMNS: &str = "SELECT id, owner_id, name, duration_minutes, active FROM event_types";

pub struct SqliteEventTypeRegistry {
    db: Arc<DbManager>,
}

impl SqliteEventTypeRegistry {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

fn map_event_type(row: &Row<'_>) -> rusqlite::Result<EventType> {
    Ok(EventType {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        duration_minutes: row.get(3)?,
        active: row.get(4)?,
    })
}

#[async_trait]
impl EventTypeRegistry for SqliteEventTypeRegistry {
    #[instrument(skip(self))]
    async fn get(&self, owner_id: &str, event_type_id: &str) -> Result<Option<EventType>> {
        let (owner_id, event_type_id) = (owner_id.to_string(), event_type_id.to_string());
        self.db
            .run(move |conn| {
                conn.query_row(
                    &format!("{SELECT_COLUMNS} WHERE owner_id = ?1 AND id = ?2"),
                    params![owner_id, event_type_id],
                    map_event_type,
                )
                .optional()
                .map_err(to_domain)
            })
            .await
    }

    #[instrument(skip(self))]
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<EventType>> {
        let owner_id = owner_id.to_string();
        self.db
            .run(move |conn| {
                let mut stmt = conn
                    .prepare(&format!("{SELECT_COLUMNS} WHERE owner_id = ?1 ORDER BY id"))
                    .map_err(to_domain)?;
                let rows = stmt
                    .query_map(params![owner_id], map_event_type)
                    .map_err(to_domain)?
                    .collect::<rusqlite::Result<Vec<_>>>()
                    .map_err(to_domain)?;
                Ok(rows)
            })
            .await
    }

    #[instrument(skip(self, event_type), fields(owner_id = %event_type.owner_id, event_type_id = %event_type.id))]
    async fn put(&self, event_type: EventType) -> Result<()> {
        event_type.validate()?;
        self.db
            .run(move |conn| {
                conn.execute(
                    "INSERT INTO event_types (owner_id, id, name, duration_minutes, active)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT (owner_id, id) DO UPDATE SET
                        name = excluded.name,
                        duration_minutes = excluded.duration_minutes,
                        active = excluded.active",
                    params![
                        event_type.owner_id,
                        event_type.id,
                        event_type.name,
                        event_type.duration_minutes,
                        event_type.active
                    ],
                )
                .map_err(to_domain)?;
                Ok(())
            })
            .await
    }
}
