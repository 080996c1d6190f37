//! Event log records.
//!
//! Each line the controller prints is one [`Event`]:
//!
//! ```text
//! ARRIVE-<floor>-<eid>          OPEN-<floor>-<eid>        CLOSE-<floor>-<eid>
//! RECEIVE-<pid>-<eid>           IN-<pid>-<floor>-<eid>    OUT-<S|F>-<pid>-<floor>-<eid>
//! SCHE-ACCEPT-<eid>-<speed>-<floor>   SCHE-BEGIN-<eid>    SCHE-END-<eid>
//! UPDATE-ACCEPT-<a>-<b>-<floor>       UPDATE-BEGIN-<a>-<b> UPDATE-END-<a>-<b>
//! ```

use std::{fmt, str::FromStr};

use crate::{
    ElevatorId, Floor, PassengerId,
    errors::{ParseError, Result},
    request::{is_merge_target, is_schedule_speed, is_schedule_target},
    timestamp::{format_timestamp, parse_decimal, split_timestamp},
};

/// How a passenger left a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlightOutcome {
    /// `OUT-S`: passenger reached their destination
    Success,
    /// `OUT-F`: passenger left mid-journey and waits for another car
    Transfer,
}

/// One controller action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Car arrived at a floor
    Arrive {
        /// Floor reached
        floor: Floor,
        /// Car
        elevator: ElevatorId,
    },
    /// Doors started opening
    Open {
        /// Floor of the car
        floor: Floor,
        /// Car
        elevator: ElevatorId,
    },
    /// Doors finished closing
    Close {
        /// Floor of the car
        floor: Floor,
        /// Car
        elevator: ElevatorId,
    },
    /// Car promised to pick up a waiting passenger
    Receive {
        /// Passenger
        passenger: PassengerId,
        /// Car making the promise
        elevator: ElevatorId,
    },
    /// Passenger boarded
    Board {
        /// Passenger
        passenger: PassengerId,
        /// Floor of boarding
        floor: Floor,
        /// Car boarded
        elevator: ElevatorId,
    },
    /// Passenger alighted
    Alight {
        /// Success or mid-journey transfer
        outcome: AlightOutcome,
        /// Passenger
        passenger: PassengerId,
        /// Floor of alighting
        floor: Floor,
        /// Car left
        elevator: ElevatorId,
    },
    /// Car acknowledged a reschedule
    ScheduleAccept {
        /// Car
        elevator: ElevatorId,
        /// Commanded move time per floor
        speed: f64,
        /// Target floor
        target: Floor,
    },
    /// Reschedule took effect
    ScheduleBegin {
        /// Car
        elevator: ElevatorId,
    },
    /// Reschedule finished
    ScheduleEnd {
        /// Car
        elevator: ElevatorId,
    },
    /// Pair acknowledged a merge
    MergeAccept {
        /// Car taking the upper range
        upper: ElevatorId,
        /// Car taking the lower range
        lower: ElevatorId,
        /// Transfer floor
        transfer: Floor,
    },
    /// Merge took effect
    MergeBegin {
        /// Car taking the upper range
        upper: ElevatorId,
        /// Car taking the lower range
        lower: ElevatorId,
    },
    /// Merge finished; the pair is now a double-car
    MergeEnd {
        /// Car taking the upper range
        upper: ElevatorId,
        /// Car taking the lower range
        lower: ElevatorId,
    },
}

impl Event {
    /// Short uppercase tag used in violation messages.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Arrive { .. } => "ARRIVE",
            Self::Open { .. } => "OPEN",
            Self::Close { .. } => "CLOSE",
            Self::Receive { .. } => "RECEIVE",
            Self::Board { .. } => "IN",
            Self::Alight { .. } => "OUT",
            Self::ScheduleAccept { .. } => "SCHE-ACCEPT",
            Self::ScheduleBegin { .. } => "SCHE-BEGIN",
            Self::ScheduleEnd { .. } => "SCHE-END",
            Self::MergeAccept { .. } => "UPDATE-ACCEPT",
            Self::MergeBegin { .. } => "UPDATE-BEGIN",
            Self::MergeEnd { .. } => "UPDATE-END",
        }
    }

    /// Passenger named by the event, if any.
    pub fn passenger(&self) -> Option<PassengerId> {
        match self {
            Self::Receive { passenger, .. }
            | Self::Board { passenger, .. }
            | Self::Alight { passenger, .. } => Some(*passenger),
            _ => None,
        }
    }

    /// Every car the event addresses, in wire order.
    pub fn elevators(&self) -> Vec<ElevatorId> {
        match *self {
            Self::Arrive { elevator, .. }
            | Self::Open { elevator, .. }
            | Self::Close { elevator, .. }
            | Self::Receive { elevator, .. }
            | Self::Board { elevator, .. }
            | Self::Alight { elevator, .. }
            | Self::ScheduleAccept { elevator, .. }
            | Self::ScheduleBegin { elevator }
            | Self::ScheduleEnd { elevator } => vec![elevator],
            Self::MergeAccept { upper, lower, .. }
            | Self::MergeBegin { upper, lower }
            | Self::MergeEnd { upper, lower } => vec![upper, lower],
        }
    }
}

/// An event with the time the controller printed it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEvent {
    /// Timestamp in seconds
    pub at: f64,
    /// Event payload
    pub event: Event,
}

impl TimedEvent {
    /// Pair an event with its timestamp.
    pub fn new(at: f64, event: Event) -> Self {
        Self { at, event }
    }
}

fn merge_pair(a: &str, b: &str) -> Result<(ElevatorId, ElevatorId)> {
    let upper: ElevatorId = a.parse()?;
    let lower: ElevatorId = b.parse()?;
    if upper == lower {
        return Err(ParseError::out_of_domain("merge partner", lower));
    }
    Ok((upper, lower))
}

impl FromStr for Event {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s.split('-').collect();

        let event = match tokens.as_slice() {
            ["ARRIVE", floor, eid] => Self::Arrive { floor: floor.parse()?, elevator: eid.parse()? },
            ["OPEN", floor, eid] => Self::Open { floor: floor.parse()?, elevator: eid.parse()? },
            ["CLOSE", floor, eid] => Self::Close { floor: floor.parse()?, elevator: eid.parse()? },
            ["RECEIVE", pid, eid] => {
                Self::Receive { passenger: pid.parse()?, elevator: eid.parse()? }
            },
            ["IN", pid, floor, eid] => Self::Board {
                passenger: pid.parse()?,
                floor: floor.parse()?,
                elevator: eid.parse()?,
            },
            ["OUT", flag, pid, floor, eid] => {
                let outcome = match *flag {
                    "S" => AlightOutcome::Success,
                    "F" => AlightOutcome::Transfer,
                    _ => return Err(ParseError::UnknownFormat(s.to_string())),
                };
                Self::Alight {
                    outcome,
                    passenger: pid.parse()?,
                    floor: floor.parse()?,
                    elevator: eid.parse()?,
                }
            },
            ["SCHE", "ACCEPT", eid, speed, target] => {
                let speed = parse_decimal(speed)
                    .ok_or_else(|| ParseError::InvalidNumber((*speed).to_string()))?;
                let target: Floor = target.parse()?;
                if !is_schedule_speed(speed) {
                    return Err(ParseError::out_of_domain("schedule speed", speed));
                }
                if !is_schedule_target(target) {
                    return Err(ParseError::out_of_domain("schedule target", target));
                }
                Self::ScheduleAccept { elevator: eid.parse()?, speed, target }
            },
            ["SCHE", "BEGIN", eid] => Self::ScheduleBegin { elevator: eid.parse()? },
            ["SCHE", "END", eid] => Self::ScheduleEnd { elevator: eid.parse()? },
            ["UPDATE", "ACCEPT", a, b, target] => {
                let (upper, lower) = merge_pair(a, b)?;
                let transfer: Floor = target.parse()?;
                if !is_merge_target(transfer) {
                    return Err(ParseError::out_of_domain("merge target", transfer));
                }
                Self::MergeAccept { upper, lower, transfer }
            },
            ["UPDATE", "BEGIN", a, b] => {
                let (upper, lower) = merge_pair(a, b)?;
                Self::MergeBegin { upper, lower }
            },
            ["UPDATE", "END", a, b] => {
                let (upper, lower) = merge_pair(a, b)?;
                Self::MergeEnd { upper, lower }
            },
            _ => return Err(ParseError::UnknownFormat(s.to_string())),
        };

        Ok(event)
    }
}

impl FromStr for TimedEvent {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self> {
        let (at, payload) = split_timestamp(line)?;
        Ok(Self { at, event: payload.parse()? })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arrive { floor, elevator } => write!(f, "ARRIVE-{floor}-{elevator}"),
            Self::Open { floor, elevator } => write!(f, "OPEN-{floor}-{elevator}"),
            Self::Close { floor, elevator } => write!(f, "CLOSE-{floor}-{elevator}"),
            Self::Receive { passenger, elevator } => write!(f, "RECEIVE-{passenger}-{elevator}"),
            Self::Board { passenger, floor, elevator } => {
                write!(f, "IN-{passenger}-{floor}-{elevator}")
            },
            Self::Alight { outcome, passenger, floor, elevator } => {
                let flag = match outcome {
                    AlightOutcome::Success => "S",
                    AlightOutcome::Transfer => "F",
                };
                write!(f, "OUT-{flag}-{passenger}-{floor}-{elevator}")
            },
            Self::ScheduleAccept { elevator, speed, target } => {
                write!(f, "SCHE-ACCEPT-{elevator}-{speed:.1}-{target}")
            },
            Self::ScheduleBegin { elevator } => write!(f, "SCHE-BEGIN-{elevator}"),
            Self::ScheduleEnd { elevator } => write!(f, "SCHE-END-{elevator}"),
            Self::MergeAccept { upper, lower, transfer } => {
                write!(f, "UPDATE-ACCEPT-{upper}-{lower}-{transfer}")
            },
            Self::MergeBegin { upper, lower } => write!(f, "UPDATE-BEGIN-{upper}-{lower}"),
            Self::MergeEnd { upper, lower } => write!(f, "UPDATE-END-{upper}-{lower}"),
        }
    }
}

impl fmt::Display for TimedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_timestamp(self.at), self.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(s: &str) -> Event {
        s.parse().expect("valid event")
    }

    #[test]
    fn parses_movement_and_doors() {
        assert_eq!(
            event("ARRIVE-B1-3"),
            Event::Arrive { floor: "B1".parse().expect("floor"), elevator: ElevatorId(3) }
        );
        assert!(matches!(event("OPEN-F1-1"), Event::Open { .. }));
        assert!(matches!(event("CLOSE-F7-6"), Event::Close { .. }));
    }

    #[test]
    fn parses_passenger_events() {
        assert!(matches!(
            event("OUT-F-12-F3-2"),
            Event::Alight { outcome: AlightOutcome::Transfer, passenger: PassengerId(12), .. }
        ));
        assert!(matches!(
            event("OUT-S-1-F3-2"),
            Event::Alight { outcome: AlightOutcome::Success, .. }
        ));
        assert!(matches!(event("IN-4-B2-5"), Event::Board { passenger: PassengerId(4), .. }));
        assert_eq!(event("RECEIVE-4-5").passenger(), Some(PassengerId(4)));
    }

    #[test]
    fn parses_protocol_events() {
        assert!(matches!(event("SCHE-ACCEPT-1-0.3-F5"), Event::ScheduleAccept { .. }));
        assert!(matches!(event("SCHE-BEGIN-1"), Event::ScheduleBegin { .. }));
        assert!(matches!(event("SCHE-END-1"), Event::ScheduleEnd { .. }));
        assert_eq!(
            event("UPDATE-ACCEPT-4-2-B1").elevators(),
            vec![ElevatorId(4), ElevatorId(2)]
        );
        assert!(matches!(event("UPDATE-BEGIN-4-2"), Event::MergeBegin { .. }));
        assert!(matches!(event("UPDATE-END-4-2"), Event::MergeEnd { .. }));
    }

    #[test]
    fn rejects_malformed_events() {
        for bad in [
            "ARRIVE-F2",
            "ARRIVE-F0-1",
            "OUT-X-1-F3-1",
            "SCHE-ACCEPT-1-0.25-F3",
            "SCHE-ACCEPT-1-0.2-F6",
            "UPDATE-BEGIN-2-2",
            "UPDATE-ACCEPT-1-2-F7",
            "LEAVE-F1-1",
            "",
        ] {
            assert!(bad.parse::<Event>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn timed_event_round_trips_through_display() {
        let line = "[  2.4000]OUT-S-1-F3-1";
        let parsed: TimedEvent = line.parse().expect("valid line");
        assert_eq!(parsed.to_string(), line);
    }
}
