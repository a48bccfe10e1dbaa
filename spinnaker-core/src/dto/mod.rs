//! Data Transfer Objects
//!
//! Two families of payloads live here:
//! - resource envelopes read from stdin and written to stdout by the
//!   `check`, `in` and `out` commands
//! - request and response bodies of the Spinnaker API

pub mod api;
pub mod check;
pub mod get;
pub mod put;
