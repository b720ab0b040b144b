//! Bookable meeting types

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SlotwiseError};

/// A bookable meeting definition owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub duration_minutes: u32,
    pub active: bool,
}

impl EventType {
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(SlotwiseError::InvalidInput("event type id must not be empty".into()));
        }
        if self.duration_minutes == 0 {
            return Err(SlotwiseError::InvalidInput(format!(
                "event type {} must have a positive duration",
                self.id
            )));
        }
        Ok(())
    }
}
