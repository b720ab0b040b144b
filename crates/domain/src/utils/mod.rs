//! Domain utilities

pub mod local_time;
