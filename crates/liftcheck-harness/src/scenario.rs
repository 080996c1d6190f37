//! Hand-written replay scenarios.
//!
//! A [`Scenario`] keeps a cursor clock so tests read like a timeline:
//!
//! ```
//! use liftcheck_harness::Scenario;
//!
//! let report = Scenario::new()
//!     .request(1.0, "1-PRI-50-FROM-F1-TO-F2")
//!     .at(1.0)
//!     .event("RECEIVE-1-1")
//!     .event("OPEN-F1-1")
//!     .event("IN-1-F1-1")
//!     .after(0.4)
//!     .event("CLOSE-F1-1")
//!     .after(0.4)
//!     .event("ARRIVE-F2-1")
//!     .event("OPEN-F2-1")
//!     .event("OUT-S-1-F2-1")
//!     .after(0.4)
//!     .event("CLOSE-F2-1")
//!     .run();
//! assert!(report.passed(), "{:?}", report.messages());
//! ```

use liftcheck_core::{Report, ValidatorConfig, validate_with};
use liftcheck_proto::timestamp::format_timestamp;

use crate::{
    invariants::InvariantRegistry,
    replay::{ReplayFailure, replay_checked},
};

/// Builder for a request log and an event log.
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    config: ValidatorConfig,
    requests: Vec<String>,
    events: Vec<String>,
    clock: f64,
}

impl Scenario {
    /// Empty scenario in the default building.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the building configuration.
    #[must_use]
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a request line arriving at `at`.
    #[must_use]
    pub fn request(mut self, at: f64, payload: &str) -> Self {
        self.requests.push(format!("{}{payload}", format_timestamp(at)));
        self
    }

    /// Move the cursor to an absolute time.
    #[must_use]
    pub fn at(mut self, at: f64) -> Self {
        self.clock = at;
        self
    }

    /// Advance the cursor.
    #[must_use]
    pub fn after(mut self, delta: f64) -> Self {
        self.clock += delta;
        self
    }

    /// Add an event line at the cursor.
    #[must_use]
    pub fn event(mut self, payload: &str) -> Self {
        self.events.push(format!("{}{payload}", format_timestamp(self.clock)));
        self
    }

    /// Add a raw line to the event log, untouched.
    #[must_use]
    pub fn raw_event(mut self, line: &str) -> Self {
        self.events.push(line.to_string());
        self
    }

    /// Current cursor time.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Request log text.
    pub fn request_log(&self) -> String {
        self.requests.join("\n")
    }

    /// Event log text.
    pub fn event_log(&self) -> String {
        self.events.join("\n")
    }

    /// Replay and return the report.
    pub fn run(&self) -> Report {
        validate_with(self.config.clone(), &self.request_log(), &self.event_log())
    }

    /// Replay with the standard invariants checked after every event.
    pub fn run_checked(&self) -> Result<Report, ReplayFailure> {
        replay_checked(self.config.clone(), &self.request_log(), &self.event_log(), &InvariantRegistry::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_moves_absolutely_and_relatively() {
        let scenario = Scenario::new().at(2.0).after(0.4).after(0.4);
        assert!((scenario.clock() - 2.8).abs() < 1e-9);
    }

    #[test]
    fn raw_lines_reach_the_validator_verbatim() {
        let report = Scenario::new()
            .request(1.0, "1-PRI-50-FROM-F1-TO-F2")
            .at(1.0)
            .event("RECEIVE-1-1")
            .raw_event("[1.2]HOVER-F1-1")
            .run();

        assert!(report.messages().iter().any(|m| m.starts_with("malformed input:") && m.contains("HOVER-F1-1")));
        insta::assert_snapshot!(Scenario::new().at(1.0).event("OPEN-F1-1").raw_event("garbage").event_log(), @r"
        [  1.0000]OPEN-F1-1
        garbage
        ");
    }
}
