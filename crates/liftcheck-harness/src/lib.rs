//! Test harness for the elevator conformance checker.
//!
//! - [`invariants`]: structural checks over engine state, run between events
//! - [`Scenario`]: timeline builder for hand-written logs
//! - [`ServiceScript`]: naive single-car controller whose logs always pass
//! - [`replay_checked`]: replay that enforces the invariants as it goes

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod replay;
pub mod scenario;
pub mod script;

pub use invariants::{Invariant, InvariantRegistry, InvariantViolation, ReplaySnapshot};
pub use replay::{ReplayFailure, replay_checked};
pub use scenario::Scenario;
pub use script::ServiceScript;
