//! SQLite storage adapters

pub mod event_repository;
pub mod event_type_repository;
pub mod manager;
pub mod policy_repository;

pub use event_repository::*;
pub use event_type_repository::*;
pub use manager::*;
pub use policy_repository::*;
