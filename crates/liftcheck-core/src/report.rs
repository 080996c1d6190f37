//! Validation verdict.

use crate::{
    error::{MetricsError, Violation},
    metrics::{ActionCounters, Completion, Metrics},
};

/// Result of one replay: the violations found, plus what is needed to
/// compute performance numbers afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    violations: Vec<Violation>,
    counters: ActionCounters,
    last_event_at: f64,
    completions: Vec<Completion>,
}

impl Report {
    pub(crate) fn new(
        violations: Vec<Violation>,
        counters: ActionCounters,
        last_event_at: f64,
        completions: Vec<Completion>,
    ) -> Self {
        Self { violations, counters, last_event_at, completions }
    }

    /// Whether the log conforms: no violation at all.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations in detection order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations rendered as text.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// Processed movement and door events.
    #[must_use]
    pub fn counters(&self) -> ActionCounters {
        self.counters
    }

    /// Latest event timestamp seen.
    #[must_use]
    pub fn last_event_at(&self) -> f64 {
        self.last_event_at
    }

    /// Performance numbers, given the measured wall-clock run time.
    ///
    /// # Errors
    ///
    /// - `MetricsError::ValidationFailed` if the report has any violation
    pub fn metrics(&self, elapsed: f64) -> Result<Metrics, MetricsError> {
        if !self.passed() {
            return Err(MetricsError::ValidationFailed { violations: self.violations.len() });
        }
        Ok(Metrics::aggregate(elapsed, self.last_event_at, self.counters, &self.completions))
    }
}
