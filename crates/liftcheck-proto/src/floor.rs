//! Floor codec.
//!
//! Floors are written `B<n>` below ground and `F<n>` above ground. There is
//! no floor 0: `B1` and `F1` are physically adjacent even though their
//! integer indices (-1 and 1) differ by two.

use std::{fmt, str::FromStr};

use crate::errors::{ParseError, Result};

/// A valid floor in `[-4, -1] ∪ [1, 7]`.
///
/// # Invariants
///
/// - The inner index is never 0 and always within [`Floor::MIN`] and
///   [`Floor::MAX`]. Every constructor enforces this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Floor(i8);

impl Floor {
    /// Lowest basement index.
    pub const MIN_INDEX: i8 = -4;
    /// Highest above-ground index.
    pub const MAX_INDEX: i8 = 7;

    /// Lowest floor of the building (`B4`).
    pub const MIN: Floor = Floor(Self::MIN_INDEX);
    /// Highest floor of the building (`F7`).
    pub const MAX: Floor = Floor(Self::MAX_INDEX);
    /// Ground floor (`F1`), where every car starts.
    pub const GROUND: Floor = Floor(1);

    /// Build a floor from its integer index. `None` for 0 or out of range.
    pub const fn new(index: i8) -> Option<Self> {
        if index == 0 || index < Self::MIN_INDEX || index > Self::MAX_INDEX {
            None
        } else {
            Some(Self(index))
        }
    }

    /// Integer index (negative for basements).
    pub const fn index(self) -> i8 {
        self.0
    }

    /// Floors reachable in a single move: integer distance 1, or the
    /// `B1`/`F1` pair across the missing floor 0.
    pub fn is_adjacent(self, other: Floor) -> bool {
        let diff = (i16::from(self.0) - i16::from(other.0)).abs();
        diff == 1 || (self.0 * other.0 == -1)
    }

    /// Next floor up, skipping 0. `None` at the top.
    pub fn above(self) -> Option<Floor> {
        match self.0 {
            -1 => Some(Self(1)),
            i => Self::new(i + 1),
        }
    }

    /// Next floor down, skipping 0. `None` at the bottom.
    pub fn below(self) -> Option<Floor> {
        match self.0 {
            1 => Some(Self(-1)),
            i => Self::new(i - 1),
        }
    }

    /// One step from `self` toward `target`. `None` when already there.
    pub fn step_toward(self, target: Floor) -> Option<Floor> {
        match self.cmp(&target) {
            std::cmp::Ordering::Less => self.above(),
            std::cmp::Ordering::Greater => self.below(),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// All floors, bottom to top.
    pub fn all() -> impl Iterator<Item = Floor> {
        (Self::MIN_INDEX..=Self::MAX_INDEX).filter_map(Self::new)
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 { write!(f, "B{}", -self.0) } else { write!(f, "F{}", self.0) }
    }
}

impl FromStr for Floor {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ParseError::InvalidFloor(s.to_string());

        let (sign, digits) = match s.as_bytes().first() {
            Some(b'B') => (-1i8, &s[1..]),
            Some(b'F') => (1i8, &s[1..]),
            _ => return Err(invalid()),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let n: i8 = digits.parse().map_err(|_| invalid())?;
        if n == 0 {
            return Err(invalid());
        }

        Self::new(sign * n).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor(s: &str) -> Floor {
        s.parse().expect("valid floor")
    }

    #[test]
    fn parses_basement_and_ground_floors() {
        assert_eq!(floor("B4").index(), -4);
        assert_eq!(floor("B1").index(), -1);
        assert_eq!(floor("F1").index(), 1);
        assert_eq!(floor("F7").index(), 7);
    }

    #[test]
    fn rejects_out_of_building_floors() {
        for bad in ["F0", "B0", "F8", "B5", "", "F", "X1", "f1", "F+1", "F-1", "F01x"] {
            assert!(bad.parse::<Floor>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn leading_zeros_are_accepted() {
        assert_eq!(floor("F03"), floor("F3"));
    }

    #[test]
    fn b1_and_f1_are_adjacent() {
        assert!(floor("B1").is_adjacent(floor("F1")));
        assert!(floor("F1").is_adjacent(floor("B1")));
        assert!(!floor("B1").is_adjacent(floor("F2")));
        assert!(!floor("B2").is_adjacent(floor("F1")));
        assert!(!floor("F3").is_adjacent(floor("F3")));
    }

    #[test]
    fn stepping_skips_floor_zero() {
        assert_eq!(floor("B1").above(), Some(floor("F1")));
        assert_eq!(floor("F1").below(), Some(floor("B1")));
        assert_eq!(Floor::MAX.above(), None);
        assert_eq!(Floor::MIN.below(), None);
        assert_eq!(floor("B2").step_toward(floor("F3")), Some(floor("B1")));
        assert_eq!(floor("F3").step_toward(floor("F3")), None);
    }

    #[test]
    fn all_floors_listed_once() {
        let floors: Vec<_> = Floor::all().map(|f| f.to_string()).collect();
        assert_eq!(floors, ["B4", "B3", "B2", "B1", "F1", "F2", "F3", "F4", "F5", "F6", "F7"]);
    }
}
