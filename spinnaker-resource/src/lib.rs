//! Spinnaker Resource
//!
//! CI resource that tracks and triggers Spinnaker pipeline executions.
//!
//! Architecture:
//! - Configuration: request envelope from stdin, polling defaults, build metadata
//! - Services: version discovery (`check`) and trigger/wait (`out`)
//! - Commands: one handler per entry point, shared by the `check`, `in` and
//!   `out` binaries
//!
//! Each binary reads one JSON request on stdin, writes one JSON response on
//! stdout, and logs to stderr.

pub mod commands;
pub mod config;
pub mod logging;
pub mod service;
