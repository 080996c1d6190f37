//! Replay with invariant checks between events.

use liftcheck_core::{Report, Validator, ValidatorConfig};
use liftcheck_proto::TimedEvent;

use crate::invariants::{InvariantRegistry, InvariantViolation, ReplaySnapshot};

/// Engine bookkeeping broke while the replay was still clean.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invariants broken after {event}: {}", list(.violations))]
pub struct ReplayFailure {
    /// Event whose application broke the invariants.
    pub event: TimedEvent,
    /// Every invariant that failed.
    pub violations: Vec<InvariantViolation>,
}

fn list(violations: &[InvariantViolation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Replay step by step, checking `registry` after each event.
///
/// Invariants are only required while the engine has reported no violation;
/// once a rule is broken the state is allowed to be incoherent and the replay
/// simply runs to completion.
pub fn replay_checked(
    config: ValidatorConfig,
    request_log: &str,
    event_log: &str,
    registry: &InvariantRegistry,
) -> Result<Report, ReplayFailure> {
    let mut validator = Validator::new(config, request_log);
    if validator.ledger().passenger_count() == 0 {
        return Ok(validator.run(event_log));
    }

    let events = validator.ingest(event_log);
    tracing::debug!(events = events.len(), invariants = registry.len(), "checked replay");

    for timed in &events {
        validator.apply(timed);
        if !validator.violations().is_empty() {
            continue;
        }

        let snapshot = ReplaySnapshot::from_validator(&validator);
        if let Err(violations) = registry.check_all(&snapshot) {
            tracing::warn!(event = %timed, broken = violations.len(), "invariant failure");
            return Err(ReplayFailure { event: *timed, violations });
        }
    }

    Ok(validator.finish())
}
