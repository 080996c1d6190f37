//! Request log records.
//!
//! ```text
//! [1.0]1-PRI-50-FROM-F1-TO-F3     passenger trip
//! [2.0]SCHE-3-0.2-B1              temporary reschedule of car 3
//! [3.0]UPDATE-1-2-F2              merge cars 1 and 2 into one shaft
//! ```

use std::{fmt, str::FromStr};

use crate::{
    ElevatorId, Floor, PassengerId,
    errors::{ParseError, Result},
    ids::parse_unsigned,
    timestamp::{format_timestamp, parse_decimal, split_timestamp},
};

/// Lowest passenger priority.
pub const MIN_PRIORITY: u32 = 1;
/// Highest passenger priority.
pub const MAX_PRIORITY: u32 = 100;

/// Move times (seconds per floor) a reschedule may command.
pub const SCHEDULE_SPEEDS: [f64; 4] = [0.2, 0.3, 0.4, 0.5];

/// Floors a reschedule may target, by index.
pub const SCHEDULE_TARGET_FLOORS: [i8; 7] = [-2, -1, 1, 2, 3, 4, 5];

/// Floors a merge may use as its transfer floor, by index.
pub const MERGE_TARGET_FLOORS: [i8; 7] = [-2, -1, 1, 2, 3, 4, 5];

/// Whether `speed` is one of [`SCHEDULE_SPEEDS`].
pub fn is_schedule_speed(speed: f64) -> bool {
    SCHEDULE_SPEEDS.iter().any(|s| (s - speed).abs() < 1e-9)
}

/// Whether `floor` is one of [`SCHEDULE_TARGET_FLOORS`].
pub fn is_schedule_target(floor: Floor) -> bool {
    SCHEDULE_TARGET_FLOORS.contains(&floor.index())
}

/// Whether `floor` is one of [`MERGE_TARGET_FLOORS`].
pub fn is_merge_target(floor: Floor) -> bool {
    MERGE_TARGET_FLOORS.contains(&floor.index())
}

/// A passenger wants to travel between two floors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripRequest {
    /// Unique passenger id (≥ 1)
    pub passenger: PassengerId,
    /// Priority weight in `[MIN_PRIORITY, MAX_PRIORITY]`
    pub priority: u32,
    /// Floor the passenger waits on
    pub from: Floor,
    /// Destination floor (never equal to `from`)
    pub to: Floor,
}

/// Temporary reschedule of one car.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleRequest {
    /// Car to reschedule
    pub elevator: ElevatorId,
    /// Commanded move time per floor
    pub speed: f64,
    /// Floor the car must reach and pause at
    pub target: Floor,
}

/// Permanent merge of two cars into a double-car shaft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRequest {
    /// First car on the wire; serves the transfer floor and everything above
    pub upper: ElevatorId,
    /// Second car on the wire; serves the transfer floor and everything below
    pub lower: ElevatorId,
    /// Floor where the two ranges meet
    pub transfer: Floor,
}

/// Any request-log payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Request {
    /// Passenger trip
    Trip(TripRequest),
    /// Reschedule command
    Schedule(ScheduleRequest),
    /// Merge command
    Merge(MergeRequest),
}

/// A request with its arrival time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedRequest {
    /// Arrival time in seconds
    pub at: f64,
    /// Request payload
    pub request: Request,
}

impl FromStr for Request {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s.split('-').collect();

        match tokens.as_slice() {
            [pid, "PRI", pri, "FROM", from, "TO", to] => {
                let passenger = PassengerId(parse_unsigned(pid)?);
                let priority = parse_unsigned(pri)?;
                let from: Floor = from.parse()?;
                let to: Floor = to.parse()?;

                if passenger.0 < 1 {
                    return Err(ParseError::out_of_domain("passenger id", passenger));
                }
                if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
                    return Err(ParseError::out_of_domain("priority", priority));
                }
                if from == to {
                    return Err(ParseError::out_of_domain("destination", format!("{to} == origin")));
                }

                Ok(Self::Trip(TripRequest { passenger, priority, from, to }))
            },
            ["SCHE", eid, speed, target] => {
                let elevator: ElevatorId = eid.parse()?;
                let speed = parse_decimal(speed)
                    .ok_or_else(|| ParseError::InvalidNumber((*speed).to_string()))?;
                let target: Floor = target.parse()?;

                if !is_schedule_speed(speed) {
                    return Err(ParseError::out_of_domain("schedule speed", speed));
                }
                if !is_schedule_target(target) {
                    return Err(ParseError::out_of_domain("schedule target", target));
                }

                Ok(Self::Schedule(ScheduleRequest { elevator, speed, target }))
            },
            ["UPDATE", a, b, target] => {
                let upper: ElevatorId = a.parse()?;
                let lower: ElevatorId = b.parse()?;
                let transfer: Floor = target.parse()?;

                if upper == lower {
                    return Err(ParseError::out_of_domain("merge partner", lower));
                }
                if !is_merge_target(transfer) {
                    return Err(ParseError::out_of_domain("merge target", transfer));
                }

                Ok(Self::Merge(MergeRequest { upper, lower, transfer }))
            },
            _ => Err(ParseError::UnknownFormat(s.to_string())),
        }
    }
}

impl FromStr for TimedRequest {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self> {
        let (at, payload) = split_timestamp(line)?;
        Ok(Self { at, request: payload.parse()? })
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trip(t) => {
                write!(f, "{}-PRI-{}-FROM-{}-TO-{}", t.passenger, t.priority, t.from, t.to)
            },
            Self::Schedule(s) => write!(f, "SCHE-{}-{:.1}-{}", s.elevator, s.speed, s.target),
            Self::Merge(m) => write!(f, "UPDATE-{}-{}-{}", m.upper, m.lower, m.transfer),
        }
    }
}

impl fmt::Display for TimedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_timestamp(self.at), self.request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trip() {
        let req: TimedRequest = "[1.0]1-PRI-50-FROM-F1-TO-B3".parse().expect("valid trip");
        assert_eq!(req.at, 1.0);
        match req.request {
            Request::Trip(t) => {
                assert_eq!(t.passenger, PassengerId(1));
                assert_eq!(t.priority, 50);
                assert_eq!(t.from.index(), 1);
                assert_eq!(t.to.index(), -3);
            },
            other => panic!("expected trip, got {other:?}"),
        }
    }

    #[test]
    fn parses_schedule_and_merge() {
        let sche: Request = "SCHE-3-0.2-B1".parse().expect("valid schedule");
        assert!(matches!(sche, Request::Schedule(s) if s.elevator == ElevatorId(3)));

        let merge: Request = "UPDATE-1-2-F2".parse().expect("valid merge");
        assert!(matches!(
            merge,
            Request::Merge(m) if m.upper == ElevatorId(1) && m.lower == ElevatorId(2)
        ));
    }

    #[test]
    fn rejects_out_of_domain_values() {
        let cases = [
            "1-PRI-0-FROM-F1-TO-F3",
            "1-PRI-101-FROM-F1-TO-F3",
            "0-PRI-5-FROM-F1-TO-F3",
            "1-PRI-5-FROM-F3-TO-F3",
            "1-PRI-5-FROM-F0-TO-F3",
            "SCHE-1-0.6-F3",
            "SCHE-1-0.2-F7",
            "SCHE-1-1-F3",
            "UPDATE-1-1-F2",
            "UPDATE-1-2-B4",
        ];
        for case in cases {
            assert!(case.parse::<Request>().is_err(), "{case} should be rejected");
        }
    }

    #[test]
    fn unknown_payload_is_reported_verbatim() {
        assert_eq!(
            "HELLO-1".parse::<Request>(),
            Err(ParseError::UnknownFormat("HELLO-1".to_string()))
        );
    }

    #[test]
    fn display_matches_wire_format() {
        for line in ["1-PRI-50-FROM-F1-TO-B3", "SCHE-3-0.2-B1", "UPDATE-1-2-F2"] {
            let req: Request = line.parse().expect("valid request");
            assert_eq!(req.to_string(), line);
        }
    }
}
