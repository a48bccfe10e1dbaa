//! Service layer
//!
//! Services contain the resource logic: deciding which executions are new
//! versions, and triggering executions then waiting on their status. They talk
//! to Spinnaker only through the `ExecutionGateway` trait and to time only
//! through the `Clock` trait so both can be replaced in tests.

pub mod clock;
pub mod trigger;
pub mod versions;

#[cfg(test)]
pub(crate) mod testing;

pub use clock::{Clock, TokioClock};
pub use trigger::{TriggerOutcome, TriggerService, WaitError};
pub use versions::{discover_versions, resolve_versions};
