//! Replay engine for the elevator conformance checker.
//!
//! Given the request log fed to a multi-elevator controller and the event log
//! it printed, decide whether every action obeys the building's timing,
//! capacity, door and protocol rules, and whether the run ends fully resolved.
//!
//! # Architecture
//!
//! ```text
//! request log ──> RequestLedger ──┐
//!                                 ├──> Validator ──> Report ──> Metrics
//! event log ────> TimedEvent* ────┘      │
//!                                        ├── ElevatorState (one per car)
//!                                        ├── PassengerState (one per trip)
//!                                        └── ShaftArbiter (one per merge)
//! ```
//!
//! The engine is a pure fold over the ordered event stream. It never consults
//! future events and never returns early: the [`Report`] carries every
//! [`Violation`] found in one pass.
//!
//! # Usage
//!
//! ```
//! let requests = "[1.0]1-PRI-50-FROM-F1-TO-F2";
//! let events = "\
//! [1.0]RECEIVE-1-1
//! [1.0]OPEN-F1-1
//! [1.0]IN-1-F1-1
//! [1.4]CLOSE-F1-1
//! [1.8]ARRIVE-F2-1
//! [1.8]OPEN-F2-1
//! [1.8]OUT-S-1-F2-1
//! [2.2]CLOSE-F2-1
//! ";
//! let report = liftcheck_core::validate(requests, events);
//! assert!(report.passed(), "{:?}", report.messages());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod elevator;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod passenger;
pub mod report;
pub mod shaft;

pub use config::ValidatorConfig;
pub use elevator::{
    DoorCycle, DoorState, DoubleCar, ElevatorMode, ElevatorState, MergeOrder, ScheduleOrder,
    ShaftRole,
};
pub use engine::Validator;
pub use error::{MetricsError, Violation, ViolationKind, ViolationLog};
pub use ledger::{LedgerEntry, RequestLedger};
pub use metrics::{ActionCounters, Completion, Metrics};
pub use passenger::{PassengerState, PassengerStatus};
pub use report::Report;
pub use shaft::ShaftArbiter;

/// Validate an event log against a request log with the default building.
pub fn validate(request_log: &str, event_log: &str) -> Report {
    validate_with(ValidatorConfig::default(), request_log, event_log)
}

/// Validate with an explicit configuration.
pub fn validate_with(config: ValidatorConfig, request_log: &str, event_log: &str) -> Report {
    Validator::new(config, request_log).run(event_log)
}
