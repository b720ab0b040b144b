//! # Slotwise API
//!
//! Application layer: wiring, commands and the HTTP surface.
//!
//! This crate contains:
//! - `AppContext`, which builds adapters and services from `Config`
//! - Command functions mapping engine errors to user-facing errors
//! - The axum router and the `slotwise` binary
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod routes;
pub mod utils;

pub use commands::CommandError;
pub use context::AppContext;
pub use routes::router;
