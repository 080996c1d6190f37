//! Violation records and error types.
//!
//! A replay never aborts: every broken rule becomes a [`Violation`] pushed
//! onto a [`ViolationLog`], and the replay continues with the event's state
//! effects applied. The only `Err` the crate returns to callers is
//! [`MetricsError`], for asking a failed run for performance numbers.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Category of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Unparseable line, unknown id, out-of-domain value
    MalformedInput,
    /// Action too fast, clock going backwards, door held too briefly,
    /// protocol deadline missed
    Timing,
    /// Wrong door state, wrong floor, wrong protocol mode, capacity,
    /// missing or duplicate pickup promise
    State,
    /// End-of-log condition not met
    Terminal,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MalformedInput => "malformed input",
            Self::Timing => "timing",
            Self::State => "state",
            Self::Terminal => "terminal",
        };
        f.write_str(label)
    }
}

/// One broken rule, with the log time it was detected at.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{kind}: {message}{}", at.map(|t| format!(" (at time ~{t:.4})")).unwrap_or_default())]
pub struct Violation {
    /// Category
    pub kind: ViolationKind,
    /// Log time of the offending event. `None` for terminal checks and
    /// lines without a readable timestamp.
    pub at: Option<f64>,
    /// Human-readable description
    pub message: String,
}

/// Ordered violation accumulator.
///
/// Suppresses a push whose rendered text equals the previous entry, so a
/// stuck car does not flood the report with identical lines.
#[derive(Debug, Clone, Default)]
pub struct ViolationLog {
    entries: Vec<Violation>,
    last_rendered: Option<String>,
}

impl ViolationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a violation unless it repeats the previous one verbatim.
    pub fn push(&mut self, violation: Violation) {
        let rendered = violation.to_string();
        if self.last_rendered.as_deref() == Some(rendered.as_str()) {
            return;
        }
        tracing::debug!(kind = %violation.kind, at = ?violation.at, "{}", violation.message);
        self.last_rendered = Some(rendered);
        self.entries.push(violation);
    }

    /// Record malformed input.
    pub fn malformed(&mut self, at: Option<f64>, message: impl Into<String>) {
        self.push(Violation { kind: ViolationKind::MalformedInput, at, message: message.into() });
    }

    /// Record a timing violation.
    pub fn timing(&mut self, at: f64, message: impl Into<String>) {
        self.push(Violation { kind: ViolationKind::Timing, at: Some(at), message: message.into() });
    }

    /// Record a state violation.
    pub fn state(&mut self, at: f64, message: impl Into<String>) {
        self.push(Violation { kind: ViolationKind::State, at: Some(at), message: message.into() });
    }

    /// Record an end-of-log violation.
    pub fn terminal(&mut self, message: impl Into<String>) {
        self.push(Violation { kind: ViolationKind::Terminal, at: None, message: message.into() });
    }

    /// Recorded violations in detection order.
    pub fn entries(&self) -> &[Violation] {
        &self.entries
    }

    /// Number of recorded violations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the log.
    pub fn into_entries(self) -> Vec<Violation> {
        self.entries
    }
}

/// Errors from [`crate::Report::metrics`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    /// Performance is only defined for a run that passed
    #[error("metrics requested for a failed validation ({violations} violations)")]
    ValidationFailed {
        /// Number of violations in the report
        violations: usize,
    },
}
