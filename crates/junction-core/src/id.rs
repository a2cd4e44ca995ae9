//! Strongly-typed identifiers.

use std::fmt;

/// Identifies an intersection within a grid.
///
/// Intersections are numbered row-major from 0, so on a 2×2 grid the top
/// row is `0, 1` and the bottom row is `2, 3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntersectionId(pub u32);

impl IntersectionId {
    /// The id as a slice index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for IntersectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for IntersectionId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing step counter.
///
/// Zero after `reset`, incremented once per successful `step`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
