//! Availability port interfaces
//!
//! Both stores are read-mostly; adapters only need ordinary read/write
//! consistency.

use async_trait::async_trait;
use slotwise_domain::{AvailabilityPolicy, EventType, PolicyError, Result};

/// Per-owner availability policy storage
#[async_trait]
pub trait PolicyStore: Send + Sync {
    /// `None` when the owner has never saved a policy.
    async fn get(&self, owner_id: &str) -> Result<Option<AvailabilityPolicy>>;

    /// Validates then replaces the owner's policy. Invalid policies are
    /// rejected before anything is written.
    async fn put(&self, owner_id: &str, policy: AvailabilityPolicy)
        -> std::result::Result<(), PolicyError>;
}

/// Bookable meeting-type definitions
#[async_trait]
pub trait EventTypeRegistry: Send + Sync {
    async fn get(&self, owner_id: &str, event_type_id: &str) -> Result<Option<EventType>>;

    /// All event types of an owner, active or not, ordered by id.
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<EventType>>;

    /// Inserts or replaces by `(owner_id, id)`.
    async fn put(&self, event_type: EventType) -> Result<()>;
}
