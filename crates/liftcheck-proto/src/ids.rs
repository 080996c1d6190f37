//! Identifiers as they appear on the wire.
//!
//! Both ids render as bare decimal numbers so that records format back into
//! the exact text the controller prints.

use std::{fmt, str::FromStr};

use crate::errors::{ParseError, Result};

/// Elevator (car) identifier. Validity against the configured car count is
/// checked by the replay engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElevatorId(pub u32);

/// Passenger identifier, unique within a request log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassengerId(pub u32);

impl fmt::Display for ElevatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ElevatorId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        parse_unsigned(s).map(Self)
    }
}

impl FromStr for PassengerId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        parse_unsigned(s).map(Self)
    }
}

/// Parse a run of ASCII digits. Unlike `str::parse`, a leading `+` is
/// rejected.
pub(crate) fn parse_unsigned(s: &str) -> Result<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidNumber(s.to_string()));
    }
    s.parse().map_err(|_| ParseError::InvalidNumber(s.to_string()))
}
