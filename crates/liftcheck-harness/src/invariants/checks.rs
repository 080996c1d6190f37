//! Standard invariant checks.

use liftcheck_core::{PassengerStatus, ShaftRole};
use liftcheck_proto::Floor;

use super::{Invariant, InvariantKind, InvariantResult, InvariantViolation, ReplaySnapshot};

fn violation(kind: InvariantKind, message: String) -> InvariantResult {
    Err(InvariantViolation { invariant: kind, message })
}

/// No car ever carries more passengers than the configured capacity.
pub struct CapacityBound;

impl Invariant for CapacityBound {
    fn kind(&self) -> InvariantKind {
        InvariantKind::CapacityBound
    }

    fn check(&self, state: &ReplaySnapshot) -> InvariantResult {
        for car in &state.elevators {
            if car.passengers.len() > state.capacity {
                return violation(
                    self.kind(),
                    format!("E{} carries {} > {}", car.id, car.passengers.len(), state.capacity),
                );
            }
        }
        Ok(())
    }
}

/// Car rosters and passenger statuses describe the same placement.
///
/// A passenger listed aboard a car must be `Inside` that car, and a passenger
/// `Inside` a car must appear on exactly that car's roster.
pub struct SinglePassengerLocation;

impl Invariant for SinglePassengerLocation {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SinglePassengerLocation
    }

    fn check(&self, state: &ReplaySnapshot) -> InvariantResult {
        for passenger in &state.passengers {
            let carriers: Vec<_> = state
                .elevators
                .iter()
                .filter(|car| car.passengers.contains(&passenger.id))
                .map(|car| car.id)
                .collect();

            match (passenger.status, carriers.as_slice()) {
                (PassengerStatus::Inside { elevator }, [only]) if *only == elevator => {},
                (PassengerStatus::Waiting { .. } | PassengerStatus::Arrived { .. }, []) => {},
                (status, _) => {
                    return violation(
                        self.kind(),
                        format!("P{} is {} but aboard {carriers:?}", passenger.id, status.label()),
                    );
                },
            }
        }
        Ok(())
    }
}

/// The two halves of a merged shaft meet exactly at the transfer floor.
///
/// The upper car serves `[transfer, top]`, the lower car `[bottom, transfer]`,
/// and both name each other as partner.
pub struct DoubleCarPartition;

impl Invariant for DoubleCarPartition {
    fn kind(&self) -> InvariantKind {
        InvariantKind::DoubleCarPartition
    }

    fn check(&self, state: &ReplaySnapshot) -> InvariantResult {
        for car in &state.elevators {
            let Some(double_car) = car.double_car else { continue };

            let expected = match double_car.role {
                ShaftRole::Upper => (double_car.transfer, Floor::MAX),
                ShaftRole::Lower => (Floor::MIN, double_car.transfer),
            };
            if car.range != expected {
                return violation(
                    self.kind(),
                    format!(
                        "E{} range {}..{} should be {}..{}",
                        car.id, car.range.0, car.range.1, expected.0, expected.1
                    ),
                );
            }

            let partner = state.elevator(double_car.partner).and_then(|p| p.double_car);
            let consistent = partner.is_some_and(|p| {
                p.partner == car.id
                    && p.shaft == double_car.shaft
                    && p.transfer == double_car.transfer
                    && p.role != double_car.role
            });
            if !consistent {
                return violation(
                    self.kind(),
                    format!("E{} and partner E{} disagree on their shaft", car.id, double_car.partner),
                );
            }
        }
        Ok(())
    }
}

/// At most one car of a merged shaft stands on its transfer floor.
///
/// When the arbiter names an occupant, that car is on the transfer floor and
/// its partner is not.
pub struct TransferFloorExclusive;

impl Invariant for TransferFloorExclusive {
    fn kind(&self) -> InvariantKind {
        InvariantKind::TransferFloorExclusive
    }

    fn check(&self, state: &ReplaySnapshot) -> InvariantResult {
        for shaft in &state.shafts {
            let on_transfer: Vec<_> = state
                .elevators
                .iter()
                .filter(|car| {
                    car.double_car.is_some_and(|dc| dc.shaft == shaft.shaft)
                        && car.floor == shaft.transfer
                })
                .map(|car| car.id)
                .collect();

            let coherent = match (shaft.occupant, on_transfer.as_slice()) {
                (None, []) => true,
                (Some(holder), [only]) => holder == *only,
                _ => false,
            };
            if !coherent {
                return violation(
                    self.kind(),
                    format!(
                        "shaft {} transfer floor {}: arbiter holds {:?}, cars present {on_transfer:?}",
                        shaft.shaft, shaft.transfer, shaft.occupant
                    ),
                );
            }
        }
        Ok(())
    }
}

/// Promises recorded on cars and on passengers agree.
///
/// A passenger promised to a car appears in that car's `received` set, and
/// every entry in a car's `received` set is promised to that car.
pub struct PromiseConsistency;

impl Invariant for PromiseConsistency {
    fn kind(&self) -> InvariantKind {
        InvariantKind::PromiseConsistency
    }

    fn check(&self, state: &ReplaySnapshot) -> InvariantResult {
        for passenger in &state.passengers {
            let Some(holder) = passenger.promised_by else { continue };
            let recorded = state.elevator(holder).is_some_and(|car| car.received.contains(&passenger.id));
            if !recorded {
                return violation(
                    self.kind(),
                    format!("P{} promised to E{holder} but missing from its received set", passenger.id),
                );
            }
        }

        for car in &state.elevators {
            for id in &car.received {
                let promised = state
                    .passengers
                    .iter()
                    .find(|p| p.id == *id)
                    .is_some_and(|p| p.promised_by == Some(car.id));
                if !promised {
                    return violation(
                        self.kind(),
                        format!("E{} holds a promise for P{id} that the passenger does not", car.id),
                    );
                }
            }
        }
        Ok(())
    }
}

/// Every car runs in a shaft that is still in service.
///
/// A merge retires the upper car's shaft and moves both cars into the lower
/// car's, so no car should ever be left behind in a retired one.
pub struct LiveShafts;

impl Invariant for LiveShafts {
    fn kind(&self) -> InvariantKind {
        InvariantKind::LiveShafts
    }

    fn check(&self, state: &ReplaySnapshot) -> InvariantResult {
        match state.elevators.iter().find(|car| !state.active_shafts.contains(&car.shaft)) {
            Some(car) => violation(self.kind(), format!("E{} runs in retired shaft {}", car.id, car.shaft)),
            None => Ok(()),
        }
    }
}
