//! Core domain types
//!
//! These types describe what the resource observes in Spinnaker (executions and
//! their stages) and what it exchanges with the CI engine (versions and the
//! source configuration). They are shared between the API client and the
//! resource commands.

pub mod execution;
pub mod source;
pub mod status;
pub mod version;
