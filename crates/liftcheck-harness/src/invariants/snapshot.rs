//! Observable replay state for invariant checking.
//!
//! Snapshots copy what the engine exposes at one instant so invariants run
//! against a consistent view instead of live state.

use std::collections::BTreeSet;

use liftcheck_core::{DoubleCar, PassengerStatus, Validator};
use liftcheck_proto::{ElevatorId, Floor, PassengerId};

/// Snapshot of one replay.
#[derive(Debug, Clone, Default)]
pub struct ReplaySnapshot {
    /// Replay clock when the snapshot was taken.
    pub at: f64,
    /// Configured car capacity.
    pub capacity: usize,
    /// Every car.
    pub elevators: Vec<ElevatorSnapshot>,
    /// Every passenger.
    pub passengers: Vec<PassengerSnapshot>,
    /// Every merged shaft.
    pub shafts: Vec<ShaftSnapshot>,
    /// Shaft ids still in service.
    pub active_shafts: BTreeSet<ElevatorId>,
}

impl ReplaySnapshot {
    /// Create an empty snapshot (no cars, no passengers).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Capture the current state of a validator.
    pub fn from_validator(validator: &Validator) -> Self {
        let elevators = validator
            .elevators()
            .iter()
            .map(|car| ElevatorSnapshot {
                id: car.id(),
                floor: car.floor(),
                passengers: car.passengers().clone(),
                received: car.received().clone(),
                range: car.range(),
                shaft: car.shaft(),
                double_car: car.double_car().copied(),
            })
            .collect();

        let passengers = validator
            .passengers()
            .map(|p| PassengerSnapshot { id: p.id(), status: p.status(), promised_by: p.promised_by() })
            .collect();

        let shafts = validator
            .shafts()
            .map(|arbiter| ShaftSnapshot {
                shaft: arbiter.shaft(),
                transfer: arbiter.transfer(),
                occupant: arbiter.occupant(),
            })
            .collect();

        Self {
            at: validator.clock(),
            capacity: validator.config().capacity,
            elevators,
            passengers,
            shafts,
            active_shafts: validator.active_shafts().clone(),
        }
    }

    /// Car by id.
    pub fn elevator(&self, id: ElevatorId) -> Option<&ElevatorSnapshot> {
        self.elevators.iter().find(|car| car.id == id)
    }
}

/// Snapshot of one car.
#[derive(Debug, Clone)]
pub struct ElevatorSnapshot {
    /// Car id.
    pub id: ElevatorId,
    /// Current floor.
    pub floor: Floor,
    /// Passengers aboard.
    pub passengers: BTreeSet<PassengerId>,
    /// Live pickup promises.
    pub received: BTreeSet<PassengerId>,
    /// Serviceable range, inclusive.
    pub range: (Floor, Floor),
    /// Shaft the car runs in.
    pub shaft: ElevatorId,
    /// Double-car configuration, once merged.
    pub double_car: Option<DoubleCar>,
}

/// Snapshot of one passenger.
#[derive(Debug, Clone)]
pub struct PassengerSnapshot {
    /// Passenger id.
    pub id: PassengerId,
    /// Current status.
    pub status: PassengerStatus,
    /// Car holding a live promise.
    pub promised_by: Option<ElevatorId>,
}

/// Snapshot of one shaft arbiter.
#[derive(Debug, Clone)]
pub struct ShaftSnapshot {
    /// Surviving shaft id.
    pub shaft: ElevatorId,
    /// Guarded floor.
    pub transfer: Floor,
    /// Car on the transfer floor.
    pub occupant: Option<ElevatorId>,
}
