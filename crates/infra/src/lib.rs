//! # Slotwise Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - SQLite storage (r2d2 pool, schema migrations, atomic booking insert)
//! - In-memory storage for single-process deployments and tests
//! - Configuration loading from environment and files
//! - Booking notification hooks (tracing, webhook, fan-out)
//!
//! ## Architecture
//! - Implements traits defined in `slotwise-core`
//! - Contains all "impure" code (I/O, network)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod memory;
pub mod notifications;

// Re-export commonly used items
pub use database::*;
pub use errors::InfraError;
pub use http::*;
pub use memory::*;
pub use notifications::*;
