//! Owner-facing policy and event type management

use std::sync::Arc;

use slotwise_domain::{AvailabilityPolicy, EventType, PolicyError, Result, SlotwiseError};
use tracing::{info, warn};

use super::ports::{EventTypeRegistry, PolicyStore};

/// Reads and writes the inputs of slot generation on behalf of an owner.
#[derive(Clone)]
pub struct AvailabilityService {
    policies: Arc<dyn PolicyStore>,
    event_types: Arc<dyn EventTypeRegistry>,
}

impl AvailabilityService {
    pub fn new(policies: Arc<dyn PolicyStore>, event_types: Arc<dyn EventTypeRegistry>) -> Self {
        Self { policies, event_types }
    }

    pub async fn policy(&self, owner_id: &str) -> Result<AvailabilityPolicy> {
        self.policies
            .get(owner_id)
            .await?
            .ok_or_else(|| SlotwiseError::NotFound(format!("availability policy for {owner_id}")))
    }

    /// Validates before handing the policy to the store.
    pub async fn save_policy(
        &self,
        owner_id: &str,
        policy: AvailabilityPolicy,
    ) -> std::result::Result<(), PolicyError> {
        if let Err(err) = policy.validate() {
            warn!(owner_id, error = %err, "rejected availability policy");
            return Err(err);
        }
        self.policies.put(owner_id, policy).await?;
        info!(owner_id, "availability policy saved");
        Ok(())
    }

    pub async fn event_types(&self, owner_id: &str) -> Result<Vec<EventType>> {
        self.event_types.list_for_owner(owner_id).await
    }

    pub async fn save_event_type(&self, event_type: EventType) -> Result<()> {
        event_type.validate()?;
        self.event_types.put(event_type.clone()).await?;
        info!(
            owner_id = %event_type.owner_id,
            event_type_id = %event_type.id,
            active = event_type.active,
            "event type saved"
        );
        Ok(())
    }
}
