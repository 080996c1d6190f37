//! Transfer floor arbitration for double-car shafts.

use liftcheck_proto::{ElevatorId, Floor};

/// Mutual exclusion over the transfer floor of one merged shaft.
///
/// Created when a merge completes and kept for the rest of the replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaftArbiter {
    shaft: ElevatorId,
    transfer: Floor,
    occupant: Option<ElevatorId>,
}

impl ShaftArbiter {
    /// Arbiter for `shaft` guarding `transfer`, initially free.
    pub fn new(shaft: ElevatorId, transfer: Floor) -> Self {
        Self { shaft, transfer, occupant: None }
    }

    /// Surviving shaft id.
    #[must_use]
    pub fn shaft(&self) -> ElevatorId {
        self.shaft
    }

    /// Guarded floor.
    #[must_use]
    pub fn transfer(&self) -> Floor {
        self.transfer
    }

    /// Car currently on the transfer floor.
    #[must_use]
    pub fn occupant(&self) -> Option<ElevatorId> {
        self.occupant
    }

    /// Claim the transfer floor for `car`. Re-entrant for the current holder.
    ///
    /// # Errors
    ///
    /// Returns the holding car if another car occupies the floor.
    pub fn try_occupy(&mut self, car: ElevatorId) -> Result<(), ElevatorId> {
        match self.occupant {
            None => {
                self.occupant = Some(car);
                Ok(())
            },
            Some(holder) if holder == car => Ok(()),
            Some(holder) => Err(holder),
        }
    }

    /// Give up the floor. No-op unless `car` holds it.
    pub fn release(&mut self, car: ElevatorId) {
        if self.occupant == Some(car) {
            self.occupant = None;
        }
    }
}
