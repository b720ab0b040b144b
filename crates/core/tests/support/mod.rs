//! Shared test helpers for `slotwise-core` integration tests.
//!
//! In-memory port implementations plus fixtures, so tests can focus on
//! slot and booking behaviour instead of wiring.

#![allow(dead_code)]

pub mod fixtures;
pub mod repositories;
