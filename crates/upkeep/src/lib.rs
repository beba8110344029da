//! Maintenance request lifecycle orchestration for property management.
//!
//! The `workflows::maintenance` module owns the status state machine and the
//! observer fan-out that republishes every status change onto the realtime
//! channels consumed by requesters, property owners, and the public feed.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
