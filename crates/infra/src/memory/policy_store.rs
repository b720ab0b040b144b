use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use slotwise_core::PolicyStore;
use slotwise_domain::{AvailabilityPolicy, PolicyError, Result};

#[derive(Debug, Default)]
pub struct InMemoryPolicyStore {
    policies: RwLock<HashMap<String, AvailabilityPolicy>>,
}

impl InMemoryPolicyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PolicyStore for InMemoryPolicyStore {
    async fn get(&self, owner_id: &str) -> Result<Option<AvailabilityPolicy>> {
        Ok(self.policies.read().get(owner_id).cloned())
    }

    async fn put(
        &self,
        owner_id: &str,
        policy: AvailabilityPolicy,
    ) -> std::result::Result<(), PolicyError> {
        policy.validate()?;
        self.policies.write().insert(owner_id.to_string(), policy);
        Ok(())
    }
}
