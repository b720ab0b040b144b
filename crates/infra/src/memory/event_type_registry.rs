use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use slotwise_core::EventTypeRegistry;
use slotwise_domain::{EventType, Result};

/// Keyed by `(owner_id, id)` so listing comes out ordered by id.
#[derive(Debug, Default)]
pub struct InMemoryEventTypeRegistry {
    event_types: RwLock<BTreeMap<(String, String), EventType>>,
}

impl InMemoryEventTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventTypeRegistry for InMemoryEventTypeRegistry {
    async fn get(&self, owner_id: &str, event_type_id: &str) -> Result<Option<EventType>> {
        let key = (owner_id.to_string(), event_type_id.to_string());
        Ok(self.event_types.read().get(&key).cloned())
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<EventType>> {
        Ok(self
            .event_types
            .read()
            .values()
            .filter(|event_type| event_type.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn put(&self, event_type: EventType) -> Result<()> {
        event_type.validate()?;
        let key = (event_type.owner_id.clone(), event_type.id.clone());
        self.event_types.write().insert(key, event_type);
        Ok(())
    }
}
