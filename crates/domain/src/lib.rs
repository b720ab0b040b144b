//! # Slotwise Domain
//!
//! Business domain types for the availability and booking engine.
//!
//! This crate contains:
//! - Availability policy, event type, event and slot types
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and local-time helpers
//!
//! ## Architecture
//! - No dependencies on other Slotwise crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::local_time::resolve_local;
