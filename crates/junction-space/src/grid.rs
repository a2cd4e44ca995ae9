//! Rectangular 4-connected intersection grid (N/S/E/W).

use crate::error::SpaceError;
use junction_core::{Direction, IntersectionId, LANES_PER_INTERSECTION};
use smallvec::SmallVec;

/// Outflow targets of one intersection: `(direction, neighbour)` for
/// every non-boundary direction, in N, S, E, W order.
///
/// Traffic leaving in `direction` joins lane `direction.opposite()` of
/// `neighbour`.
pub type Downstream = SmallVec<[(Direction, IntersectionId); 4]>;

/// A rectangular grid of intersections with absorbing edges.
///
/// Intersection `[row, col]` has id `row * cols + col`. Neighbours are the
/// four cardinal directions; a direction that points off the grid has no
/// neighbour and traffic discharged that way leaves the system.
///
/// The neighbour table is computed once at construction, so lookups are
/// a single index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTopology {
    rows: u32,
    cols: u32,
    neighbours: Vec<[Option<IntersectionId>; LANES_PER_INTERSECTION]>,
}

impl GridTopology {
    /// Create a `rows × cols` grid.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if either dimension is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use junction_core::{Direction, IntersectionId};
    /// use junction_space::GridTopology;
    ///
    /// let grid = GridTopology::new(2, 2).unwrap();
    /// assert_eq!(grid.intersection_count(), 4);
    /// assert_eq!(grid.neighbour(IntersectionId(0), Direction::East), Some(IntersectionId(1)));
    /// assert_eq!(grid.neighbour(IntersectionId(0), Direction::North), None);
    /// ```
    pub fn new(rows: u32, cols: u32) -> Result<Self, SpaceError> {
        if rows == 0 || cols == 0 {
            return Err(SpaceError::EmptySpace);
        }
        let count = rows
            .checked_mul(cols)
            .ok_or(SpaceError::TooManyIntersections { rows, cols })?;

        let mut neighbours = Vec::with_capacity(count as usize);
        for row in 0..rows {
            for col in 0..cols {
                let mut slots = [None; LANES_PER_INTERSECTION];
                for direction in Direction::ALL {
                    let (dr, dc) = direction.offset();
                    let nr = i64::from(row) + dr;
                    let nc = i64::from(col) + dc;
                    if (0..i64::from(rows)).contains(&nr) && (0..i64::from(cols)).contains(&nc) {
                        // Both coordinates are in range, so the product fits in u32.
                        slots[direction.slot()] =
                            Some(IntersectionId(nr as u32 * cols + nc as u32));
                    }
                }
                neighbours.push(slots);
            }
        }

        Ok(Self {
            rows,
            cols,
            neighbours,
        })
    }

    /// A lone intersection with no neighbours.
    pub fn single() -> Self {
        Self {
            rows: 1,
            cols: 1,
            neighbours: vec![[None; LANES_PER_INTERSECTION]],
        }
    }

    /// An `n × n` grid. `n == 0` is an error.
    pub fn square(n: u32) -> Result<Self, SpaceError> {
        Self::new(n, n)
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of intersections.
    pub fn intersection_count(&self) -> usize {
        self.neighbours.len()
    }

    /// Whether `id` names an intersection of this grid.
    pub fn contains(&self, id: IntersectionId) -> bool {
        id.index() < self.neighbours.len()
    }

    /// All intersection ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = IntersectionId> + '_ {
        (0..self.neighbours.len() as u32).map(IntersectionId)
    }

    /// `(row, col)` of an intersection.
    pub fn coords(&self, id: IntersectionId) -> (u32, u32) {
        (id.0 / self.cols, id.0 % self.cols)
    }

    /// The neighbour of `id` in `direction`, or `None` at the boundary.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not part of this grid.
    pub fn neighbour(&self, id: IntersectionId, direction: Direction) -> Option<IntersectionId> {
        self.neighbours[id.index()][direction.slot()]
    }

    /// Whether lane `direction` of `id` discharges off the grid.
    pub fn is_boundary(&self, id: IntersectionId, direction: Direction) -> bool {
        self.neighbour(id, direction).is_none()
    }

    /// Outflow targets of `id`; see [`Downstream`].
    pub fn downstream(&self, id: IntersectionId) -> Downstream {
        Direction::ALL
            .iter()
            .filter_map(|&d| self.neighbour(id, d).map(|n| (d, n)))
            .collect()
    }

    /// Whether any intersection has a neighbour (false only for 1×1).
    pub fn has_links(&self) -> bool {
        self.neighbours.len() > 1
    }
}
