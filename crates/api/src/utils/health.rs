//! Health report returned by `GET /health`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Ok,
    Degraded,
}

/// Service health; degraded as soon as one component fails, since a
/// booking needs every one of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: HealthState,
    pub version: String,
    pub components: Vec<ComponentHealth>,
    pub checked_at: DateTime<Utc>,
}

impl HealthStatus {
    pub fn from_components(components: Vec<ComponentHealth>) -> Self {
        let status = if components.iter().all(|c| c.is_healthy) {
            HealthState::Ok
        } else {
            HealthState::Degraded
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            components,
            checked_at: Utc::now(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthState::Ok
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub is_healthy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, detail: Some(detail.into()) }
    }

    pub fn failing(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, detail: Some(detail.into()) }
    }
}
