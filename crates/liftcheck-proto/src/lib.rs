//! Line grammar for the elevator conformance checker.
//!
//! Two newline-delimited logs cross the boundary of the checker: the request
//! log fed to the controller under test, and the event log it produced. Both
//! share the `[<time>]<payload>` framing. This crate turns single lines into
//! typed records ([`TimedRequest`], [`TimedEvent`]) and renders them back.
//!
//! # Components
//!
//! - [`Floor`]: floor codec (`B<n>` / `F<n>`), adjacency across the missing
//!   floor 0
//! - [`ElevatorId`], [`PassengerId`]: identifiers as they appear on the wire
//! - [`Request`]: trip, schedule and merge requests
//! - [`Event`]: the twelve controller actions
//!
//! Parsing is purely structural. Whether an elevator id exists or a passenger
//! was ever requested is decided by the replay engine, not here.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod errors;
pub mod event;
pub mod floor;
pub mod ids;
pub mod request;
pub mod timestamp;

pub use errors::{ParseError, Result};
pub use event::{AlightOutcome, Event, TimedEvent};
pub use floor::Floor;
pub use ids::{ElevatorId, PassengerId};
pub use request::{
    MAX_PRIORITY, MERGE_TARGET_FLOORS, MIN_PRIORITY, MergeRequest, Request, SCHEDULE_SPEEDS,
    SCHEDULE_TARGET_FLOORS, ScheduleRequest, TimedRequest, TripRequest, is_merge_target,
    is_schedule_speed, is_schedule_target,
};
