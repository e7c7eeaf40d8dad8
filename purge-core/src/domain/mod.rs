//! Core domain types
//!
//! Resources as the purge sees them. Everything here is read from the Pulp
//! API; nothing is persisted locally.

pub mod resource;
pub mod task;
