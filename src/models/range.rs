//! Atomic-number bands used to filter annotated records.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::elements::{AtomicNumber, ELEMENT_COUNT};

const MAX_Z: AtomicNumber = ELEMENT_COUNT as AtomicNumber;

/// An inclusive range of atomic numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRange {
    start: AtomicNumber,
    end: AtomicNumber,
}

/// Named bands, in display order.
pub const PRESETS: [(&str, &str, ElementRange); 5] = [
    ("light", "Light", ElementRange { start: 1, end: 20 }),
    ("medium", "Medium", ElementRange { start: 21, end: 50 }),
    ("heavy", "Heavy", ElementRange { start: 51, end: 82 }),
    ("actinides", "Actinides", ElementRange { start: 89, end: 103 }),
    ("superheavy", "Superheavy", ElementRange { start: 104, end: 118 }),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("Invalid element range {0:?}: expected a preset name or LOW-HIGH")]
    Malformed(String),

    #[error("Element range {start}-{end} is empty")]
    Empty {
        start: AtomicNumber,
        end: AtomicNumber,
    },

    #[error("Atomic number {0} is outside 1-118")]
    OutOfBounds(AtomicNumber),
}

impl ElementRange {
    pub fn new(start: AtomicNumber, end: AtomicNumber) -> Result<Self, RangeError> {
        for z in [start, end] {
            if z == 0 || z > MAX_Z {
                return Err(RangeError::OutOfBounds(z));
            }
        }
        if start > end {
            return Err(RangeError::Empty { start, end });
        }
        Ok(Self { start, end })
    }

    /// Look up a named band (case-insensitive).
    pub fn preset(name: &str) -> Option<Self> {
        PRESETS
            .iter()
            .find(|(key, _, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, _, range)| *range)
    }

    pub fn start(&self) -> AtomicNumber {
        self.start
    }

    pub fn end(&self) -> AtomicNumber {
        self.end
    }

    pub fn contains(&self, z: AtomicNumber) -> bool {
        (self.start..=self.end).contains(&z)
    }

    /// Whether any of `zs` falls in the range.
    pub fn intersects(&self, zs: &[AtomicNumber]) -> bool {
        zs.iter().any(|z| self.contains(*z))
    }

    /// Display label, e.g. "Heavy (Z 51-82)" or "Z 10-12".
    pub fn label(&self) -> String {
        match PRESETS.iter().find(|(_, _, r)| r == self) {
            Some((_, name, _)) => format!("{} (Z {}-{})", name, self.start, self.end),
            None => format!("Z {}-{}", self.start, self.end),
        }
    }
}

impl FromStr for ElementRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(range) = Self::preset(s) {
            return Ok(range);
        }

        let (lo, hi) = s
            .split_once('-')
            .ok_or_else(|| RangeError::Malformed(s.to_string()))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<AtomicNumber>()
                .map_err(|_| RangeError::Malformed(s.to_string()))
        };
        Self::new(parse(lo)?, parse(hi)?)
    }
}

impl fmt::Display for ElementRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
