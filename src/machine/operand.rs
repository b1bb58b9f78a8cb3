use std::fmt;

use super::state::{Slot, StateVector};

/// Named register or memory slot usable as an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    RegC,
    RegB,
    RegA,
    Mem5,
    Mem4,
    Mem3,
    Mem2,
    Mem1,
}

impl Location {
    pub const ALL: [Location; 8] = [
        Location::RegC,
        Location::RegB,
        Location::RegA,
        Location::Mem5,
        Location::Mem4,
        Location::Mem3,
        Location::Mem2,
        Location::Mem1,
    ];

    /// Case-insensitive lookup (`REGA`, `RegA`, `rega`).
    pub fn parse(s: &str) -> Option<Location> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|loc| loc.slot().name().eq_ignore_ascii_case(s))
    }

    pub fn slot(self) -> Slot {
        match self {
            Location::RegC => Slot::RegC,
            Location::RegB => Slot::RegB,
            Location::RegA => Slot::RegA,
            Location::Mem5 => Slot::Mem5,
            Location::Mem4 => Slot::Mem4,
            Location::Mem3 => Slot::Mem3,
            Location::Mem2 => Slot::Mem2,
            Location::Mem1 => Slot::Mem1,
        }
    }
}

impl From<Location> for Slot {
    fn from(loc: Location) -> Slot {
        loc.slot()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slot().name())
    }
}

/// A decoded operand token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Location(Location),
    Literal(i64),
}

impl Operand {
    /// `None` when the token is neither a location name nor a decimal literal.
    pub fn parse(token: &str) -> Option<Operand> {
        if let Some(loc) = Location::parse(token) {
            return Some(Operand::Location(loc));
        }
        parse_literal(token).map(Operand::Literal)
    }

    /// Value of the operand against the current state.
    pub fn value(self, state: &StateVector) -> i64 {
        match self {
            // fields are at most 42 bits wide
            Operand::Location(loc) => state.get(loc.slot()) as i64,
            Operand::Literal(v) => v,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Location(loc) => write!(f, "{loc}"),
            Operand::Literal(v) => write!(f, "{v}"),
        }
    }
}

fn parse_literal(s: &str) -> Option<i64> {
    let s = s.trim();
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<i64>().ok()
}
