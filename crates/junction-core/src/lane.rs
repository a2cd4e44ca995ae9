//! Compass directions labelling the four lanes of an intersection.

use std::fmt;

/// Number of approach lanes per intersection.
pub const LANES_PER_INTERSECTION: usize = 4;

/// A compass direction.
///
/// Each intersection owns one lane per direction. Lane `d` of an
/// intersection discharges into lane `d.opposite()` of its neighbour in
/// direction `d`, so vehicles leaving northwards join the neighbour's
/// south lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// North lane (slot 0).
    North,
    /// South lane (slot 1).
    South,
    /// East lane (slot 2).
    East,
    /// West lane (slot 3).
    West,
}

impl Direction {
    /// All directions in lane-slot order: N, S, E, W.
    pub const ALL: [Direction; LANES_PER_INTERSECTION] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Position of this lane within an intersection's four slots.
    pub fn slot(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }

    /// The lane of the downstream neighbour that receives this lane's outflow.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// `(drow, dcol)` offset of the neighbour in this direction.
    ///
    /// North is the previous row; west is the previous column.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
        };
        f.write_str(label)
    }
}
