//! Spinnaker Resource Core
//!
//! Core types shared by the Spinnaker resource crates.
//!
//! This crate contains:
//! - Domain types: executions, stages, statuses, versions and the source configuration
//! - DTOs: the resource envelopes exchanged with the CI engine and the payloads
//!   exchanged with the Spinnaker API

pub mod domain;
pub mod dto;

mod serde_ext;
