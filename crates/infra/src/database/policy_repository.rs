//! SQLite implementation of the PolicyStore port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use slotwise_core::PolicyStore;
use slotwise_domain::{AvailabilityPolicy, DailyCap, PolicyError, Result, WeeklyHours};
use tracing::{debug, instrument};

use super::manager::DbManager;
use crate::errors::conversions::to_domain;

pub struct SqlitePolicyStore {
    db: Arc<DbManager>,
}

impl SqlitePolicyStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PolicyStore for SqlitePolicyStore {
    #[instrument(skip(self))]
    async fn get(&self, owner_id: &str) -> Result<Option<AvailabilityPolicy>> {
        let owner_id = owner_id.to_string();
        self.db
            .run(move |conn| {
                let row = conn
                    .query_row(
                        "SELECT working_hours, timezone, buffer_minutes, max_events_per_day
                         FROM availability_policies WHERE owner_id = ?1",
                        params![owner_id],
                        |row| {
                            Ok((
                                row.get::<_, String>(0)?,
                                row.get::<_, String>(1)?,
                                row.get::<_, u32>(2)?,
                                row.get::<_, Option<u32>>(3)?,
                            ))
                        },
                    )
                    .optional()
                    .map_err(to_domain)?;

                let Some((working_hours, timezone, buffer_minutes, cap)) = row else {
                    return Ok(None);
                };
                let working_hours: WeeklyHours =
                    serde_json::from_str(&working_hours).map_err(to_domain)?;

                Ok(Some(AvailabilityPolicy {
                    working_hours,
                    timezone,
                    buffer_minutes,
                    max_events_per_day: DailyCap::from(cap),
                }))
            })
            .await
    }

    #[instrument(skip(self, policy))]
    async fn put(
        &self,
        owner_id: &str,
        policy: AvailabilityPolicy,
    ) -> std::result::Result<(), PolicyError> {
        policy.validate()?;

        let owner_id = owner_id.to_string();
        let working_hours = serde_json::to_string(&policy.working_hours).map_err(to_domain)?;
        let cap: Option<u32> = policy.max_events_per_day.into();

        self.db
            .run(move |conn| {
                conn.execute(
                    "INSERT INTO availability_policies
                        (owner_id, working_hours, timezone, buffer_minutes, max_events_per_day, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                     ON CONFLICT (owner_id) DO UPDATE SET
                        working_hours = excluded.working_hours,
                        timezone = excluded.timezone,
                        buffer_minutes = excluded.buffer_minutes,
                        max_events_per_day = excluded.max_events_per_day,
                        updated_at = excluded.updated_at",
                    params![
                        owner_id,
                        working_hours,
                        policy.timezone,
                        policy.buffer_minutes,
                        cap,
                        Utc::now().timestamp()
                    ],
                )
                .map_err(to_domain)?;
                debug!(owner_id = %owner_id, "policy stored");
                Ok(())
            })
            .await?;
        Ok(())
    }
}
