//! In-process adapters
//!
//! Used by the `memory` storage backend and by tests that do not need a
//! database file. State lives for the lifetime of the value only.

pub mod event_repository;
pub mod event_type_registry;
pub mod policy_store;

pub use event_repository::InMemoryEventRepository;
pub use event_type_registry::InMemoryEventTypeRegistry;
pub use policy_store::InMemoryPolicyStore;
