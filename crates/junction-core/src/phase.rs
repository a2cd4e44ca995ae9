//! Signal phases and their mapping to raw discrete actions.

use crate::error::ActionError;
use crate::lane::Direction;
use std::fmt;

/// A signal phase: which pair of opposing lanes has green.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// North and south lanes are green. Raw action value `0`.
    NorthSouth,
    /// East and west lanes are green. Raw action value `1`.
    EastWest,
}

impl Phase {
    /// Number of distinct phases, i.e. the size of each action dimension.
    pub const COUNT: u32 = 2;

    /// The two lanes served while this phase holds.
    pub fn green_lanes(self) -> [Direction; 2] {
        match self {
            Phase::NorthSouth => [Direction::North, Direction::South],
            Phase::EastWest => [Direction::East, Direction::West],
        }
    }

    /// Whether `direction` is green under this phase.
    pub fn serves(self, direction: Direction) -> bool {
        self.green_lanes().contains(&direction)
    }

    /// The raw discrete action encoding this phase.
    pub fn action(self) -> u32 {
        match self {
            Phase::NorthSouth => 0,
            Phase::EastWest => 1,
        }
    }

    /// The other phase.
    pub fn other(self) -> Phase {
        match self {
            Phase::NorthSouth => Phase::EastWest,
            Phase::EastWest => Phase::NorthSouth,
        }
    }

    /// Decode the raw action for intersection `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::OutOfDomain`] for any value other than 0 or 1.
    pub fn decode(index: usize, value: u32) -> Result<Phase, ActionError> {
        match value {
            0 => Ok(Phase::NorthSouth),
            1 => Ok(Phase::EastWest),
            _ => Err(ActionError::OutOfDomain { index, value }),
        }
    }
}

/// Conversion of a lone action value. Fails with
/// [`ActionError::NotAPhase`]; use [`Phase::decode`] when the entry's
/// position in an action vector is known.
impl TryFrom<u32> for Phase {
    type Error = ActionError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Phase::decode(0, value).map_err(|_| ActionError::NotAPhase { value })
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::NorthSouth => f.write_str("NS"),
            Phase::EastWest => f.write_str("EW"),
        }
    }
}
