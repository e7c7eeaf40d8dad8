//! Purge Core
//!
//! Core types shared by the Pulp client and the purge CLI.
//!
//! This crate contains:
//! - Domain types: the Pulp resources a purge touches (repositories, distributions, tasks)
//! - DTOs: wire envelopes for list pages, task references and request bodies

pub mod domain;
pub mod dto;
