//! Passenger automaton.
//!
//! ```text
//!              IN                    OUT-S
//! ┌─────────┐ ───────> ┌────────┐ ─────────> ┌─────────┐
//! │ Waiting │          │ Inside │            │ Arrived │
//! └─────────┘ <─────── └────────┘            └─────────┘
//!              OUT-F
//! ```
//!
//! A waiting passenger may additionally hold one live pickup promise
//! (`RECEIVE`). Boarding consumes the promise; any alight clears it.

use liftcheck_proto::{AlightOutcome, ElevatorId, Floor, PassengerId, TripRequest};

use crate::{error::ViolationLog, ledger::LedgerEntry};

/// Where a passenger is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassengerStatus {
    /// Standing on a floor, not yet delivered
    Waiting {
        /// Floor the passenger stands on
        floor: Floor,
    },
    /// Riding a car
    Inside {
        /// Car carrying the passenger
        elevator: ElevatorId,
    },
    /// Delivered
    Arrived {
        /// Floor the passenger left the car on
        floor: Floor,
        /// Time of the `OUT-S`
        at: f64,
    },
}

impl PassengerStatus {
    /// Uppercase label used in violation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Waiting { .. } => "WAITING",
            Self::Inside { .. } => "INSIDE",
            Self::Arrived { .. } => "ARRIVED",
        }
    }
}

/// One passenger's replay state.
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerState {
    id: PassengerId,
    priority: u32,
    origin: Floor,
    destination: Floor,
    requested_at: f64,
    status: PassengerStatus,
    promised_by: Option<ElevatorId>,
}

impl PassengerState {
    /// Fresh state for a trip request: waiting at the origin, no promise.
    pub fn from_trip(entry: &LedgerEntry<TripRequest>) -> Self {
        let trip = entry.request;
        Self {
            id: trip.passenger,
            priority: trip.priority,
            origin: trip.from,
            destination: trip.to,
            requested_at: entry.at,
            status: PassengerStatus::Waiting { floor: trip.from },
            promised_by: None,
        }
    }

    /// Passenger id.
    #[must_use]
    pub fn id(&self) -> PassengerId {
        self.id
    }

    /// Priority weight.
    #[must_use]
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Floor of the original request.
    #[must_use]
    pub fn origin(&self) -> Floor {
        self.origin
    }

    /// Requested destination.
    #[must_use]
    pub fn destination(&self) -> Floor {
        self.destination
    }

    /// Time the request was issued.
    #[must_use]
    pub fn requested_at(&self) -> f64 {
        self.requested_at
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> PassengerStatus {
        self.status
    }

    /// Car holding a live pickup promise, if any.
    #[must_use]
    pub fn promised_by(&self) -> Option<ElevatorId> {
        self.promised_by
    }

    /// Completion time, once delivered.
    #[must_use]
    pub fn finished_at(&self) -> Option<f64> {
        match self.status {
            PassengerStatus::Arrived { at, .. } => Some(at),
            _ => None,
        }
    }

    /// Whether the passenger was delivered to their own destination.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(self.status, PassengerStatus::Arrived { floor, .. } if floor == self.destination)
    }

    /// Passenger-side checks for `RECEIVE`.
    pub(crate) fn check_receive(&self, elevator: ElevatorId, at: f64, log: &mut ViolationLog) {
        let pid = self.id;
        if !matches!(self.status, PassengerStatus::Waiting { .. }) {
            log.state(at, format!("RECEIVE-{pid}-{elevator}: passenger {}", self.status.label()));
        }
        match self.promised_by {
            Some(holder) if holder == elevator => {
                log.state(at, format!("duplicate RECEIVE-{pid}-{elevator}"));
            },
            Some(holder) => {
                log.state(at, format!("RECEIVE-{pid}-{elevator}: already received by E{holder}"));
            },
            None => {},
        }
    }

    /// Passenger-side checks for `IN`.
    pub(crate) fn check_board(
        &self,
        elevator: ElevatorId,
        floor: Floor,
        at: f64,
        log: &mut ViolationLog,
    ) {
        let pid = self.id;
        match self.status {
            PassengerStatus::Waiting { floor: waiting } if waiting != floor => {
                log.state(at, format!("P{pid} IN E{elevator} @{floor}: passenger waits at {waiting}"));
            },
            PassengerStatus::Waiting { .. } => {},
            other => {
                log.state(at, format!("P{pid} IN E{elevator} @{floor}: passenger {}", other.label()));
            },
        }
        if self.promised_by != Some(elevator) {
            let holder = self.promised_by.map_or_else(|| "nobody".to_string(), |e| format!("E{e}"));
            log.state(at, format!("P{pid} IN E{elevator} @{floor}: not received (received by {holder})"));
        }
    }

    /// Passenger-side checks for `OUT`.
    pub(crate) fn check_alight(
        &self,
        outcome: AlightOutcome,
        elevator: ElevatorId,
        floor: Floor,
        at: f64,
        log: &mut ViolationLog,
    ) {
        let pid = self.id;
        if self.status != (PassengerStatus::Inside { elevator }) {
            log.state(at, format!("P{pid} OUT E{elevator} @{floor}: not inside this car ({})", self.status.label()));
        }
        let at_destination = floor == self.destination;
        match outcome {
            AlightOutcome::Success if !at_destination => {
                log.state(at, format!("OUT-S P{pid} E{elevator} @{floor}: destination is {}", self.destination));
            },
            AlightOutcome::Transfer if at_destination => {
                log.state(at, format!("OUT-F P{pid} E{elevator} @{floor}: this is the destination"));
            },
            _ => {},
        }
    }

    pub(crate) fn promise(&mut self, elevator: ElevatorId) {
        self.promised_by = Some(elevator);
    }

    pub(crate) fn clear_promise(&mut self) {
        self.promised_by = None;
    }

    pub(crate) fn board(&mut self, elevator: ElevatorId) {
        self.status = PassengerStatus::Inside { elevator };
        self.promised_by = None;
    }

    pub(crate) fn alight(&mut self, outcome: AlightOutcome, floor: Floor, at: f64) {
        self.status = match outcome {
            AlightOutcome::Success => PassengerStatus::Arrived { floor, at },
            AlightOutcome::Transfer => PassengerStatus::Waiting { floor },
        };
        self.promised_by = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger() -> PassengerState {
        let request = TripRequest {
            passenger: PassengerId(1),
            priority: 10,
            from: Floor::GROUND,
            to: Floor::new(3).expect("F3"),
        };
        PassengerState::from_trip(&LedgerEntry { at: 1.0, line: 1, request })
    }

    #[test]
    fn transfer_returns_passenger_to_waiting() {
        let mut p = passenger();
        let f2 = Floor::new(2).expect("F2");
        p.promise(ElevatorId(1));
        p.board(ElevatorId(1));
        assert_eq!(p.promised_by(), None);

        p.alight(AlightOutcome::Transfer, f2, 2.0);
        assert_eq!(p.status(), PassengerStatus::Waiting { floor: f2 });
        assert_eq!(p.origin(), Floor::GROUND);
        assert!(!p.is_delivered());
        assert_eq!(p.finished_at(), None);
    }

    #[test]
    fn board_without_promise_is_flagged() {
        let p = passenger();
        let mut log = ViolationLog::new();
        p.check_board(ElevatorId(2), Floor::GROUND, 1.0, &mut log);
        assert_eq!(log.len(), 1);
        assert!(log.entries()[0].message.contains("not received"));
    }

    #[test]
    fn success_away_from_destination_is_flagged() {
        let mut p = passenger();
        p.board(ElevatorId(1));
        let mut log = ViolationLog::new();
        p.check_alight(AlightOutcome::Success, ElevatorId(1), Floor::new(2).expect("F2"), 2.0, &mut log);
        assert_eq!(log.len(), 1);

        let mut log = ViolationLog::new();
        p.check_alight(AlightOutcome::Success, ElevatorId(1), p.destination(), 2.0, &mut log);
        assert!(log.is_empty());
    }

    #[test]
    fn second_promise_is_a_conflict() {
        let mut p = passenger();
        p.promise(ElevatorId(1));
        let mut log = ViolationLog::new();
        p.check_receive(ElevatorId(1), 1.0, &mut log);
        p.check_receive(ElevatorId(2), 1.0, &mut log);
        let messages: Vec<_> = log.entries().iter().map(|v| v.message.as_str()).collect();
        assert_eq!(messages, ["duplicate RECEIVE-1-1", "RECEIVE-1-2: already received by E1"]);
    }
}
