//! Structural invariants over replay state.
//!
//! The engine reports rule violations; invariants check that its own
//! bookkeeping stays coherent. While a replay has produced no violation,
//! every invariant here must hold after every event.
//!
//! # Usage
//!
//! ```
//! use liftcheck_harness::invariants::{InvariantRegistry, ReplaySnapshot};
//!
//! let registry = InvariantRegistry::standard();
//! assert!(registry.check_all(&ReplaySnapshot::empty()).is_ok());
//! ```

mod checks;
mod snapshot;

use std::fmt;

pub use checks::{
    CapacityBound, DoubleCarPartition, LiveShafts, PromiseConsistency, SinglePassengerLocation,
    TransferFloorExclusive,
};
pub use snapshot::{ElevatorSnapshot, PassengerSnapshot, ReplaySnapshot, ShaftSnapshot};

/// Invariant check result.
pub type InvariantResult = Result<(), InvariantViolation>;

/// Which invariant was broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantKind {
    /// No car carries more than the configured capacity.
    CapacityBound,
    /// A passenger is inside at most one car, and cars agree with passengers.
    SinglePassengerLocation,
    /// Merged halves meet exactly at the transfer floor and cover the building.
    DoubleCarPartition,
    /// At most one car of a merged shaft sits on its transfer floor.
    TransferFloorExclusive,
    /// Promises recorded on cars and on passengers agree.
    PromiseConsistency,
    /// Every car runs in a shaft that is still in service.
    LiveShafts,
}

impl InvariantKind {
    /// Stable name for reporting.
    pub fn name(self) -> &'static str {
        match self {
            Self::CapacityBound => "capacity_bound",
            Self::SinglePassengerLocation => "single_passenger_location",
            Self::DoubleCarPartition => "double_car_partition",
            Self::TransferFloorExclusive => "transfer_floor_exclusive",
            Self::PromiseConsistency => "promise_consistency",
            Self::LiveShafts => "live_shafts",
        }
    }
}

impl fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Invariant violation with context.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{invariant}: {message}")]
pub struct InvariantViolation {
    /// Which invariant failed.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

/// A structural property of replay state.
pub trait Invariant: Send + Sync {
    /// Which invariant this is.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant against a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an [`InvariantViolation`] describing the first breach found.
    fn check(&self, state: &ReplaySnapshot) -> InvariantResult;
}

/// Registry of invariants to check.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with every standard invariant.
    ///
    /// Includes:
    /// - [`CapacityBound`]
    /// - [`SinglePassengerLocation`]
    /// - [`DoubleCarPartition`]
    /// - [`TransferFloorExclusive`]
    /// - [`PromiseConsistency`]
    /// - [`LiveShafts`]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(CapacityBound);
        registry.add(SinglePassengerLocation);
        registry.add(DoubleCarPartition);
        registry.add(TransferFloorExclusive);
        registry.add(PromiseConsistency);
        registry.add(LiveShafts);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given state.
    ///
    /// # Errors
    ///
    /// Returns every violation found when at least one invariant fails.
    pub fn check_all(&self, state: &ReplaySnapshot) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking with every violation found.
    ///
    /// # Panics
    ///
    /// Panics when any invariant fails. Meant for tests.
    #[allow(clippy::panic)]
    pub fn assert_all(&self, state: &ReplaySnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}
