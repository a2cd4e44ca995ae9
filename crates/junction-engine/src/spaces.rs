//! Action and observation space descriptors.
//!
//! These advertise the shape of the step contract to a learning loop.
//! They describe, and the environment validates against the action
//! space, but the declared observation bound is informational only.

use junction_core::{ActionError, Phase};
use rand::Rng;

/// The discrete action domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionSpace {
    /// One intersection: a single choice among `n` phases.
    Discrete {
        /// Number of phases.
        n: u32,
    },
    /// One choice per intersection; `nvec[i]` phases for intersection `i`.
    MultiDiscrete {
        /// Phase count per intersection.
        nvec: Vec<u32>,
    },
}

impl ActionSpace {
    /// The action space for `intersections` intersections.
    pub fn for_intersections(intersections: usize) -> Self {
        if intersections == 1 {
            ActionSpace::Discrete { n: Phase::COUNT }
        } else {
            ActionSpace::MultiDiscrete {
                nvec: vec![Phase::COUNT; intersections],
            }
        }
    }

    /// Number of entries an action vector must carry.
    pub fn dims(&self) -> usize {
        match self {
            ActionSpace::Discrete { .. } => 1,
            ActionSpace::MultiDiscrete { nvec } => nvec.len(),
        }
    }

    /// Check an action vector against this space.
    ///
    /// # Errors
    ///
    /// [`ActionError::WrongLength`] if the vector has the wrong number of
    /// entries; [`ActionError::OutOfDomain`] for the first entry outside
    /// its range.
    pub fn check(&self, action: &[u32]) -> Result<(), ActionError> {
        if action.len() != self.dims() {
            return Err(ActionError::WrongLength {
                expected: self.dims(),
                got: action.len(),
            });
        }
        for (index, &value) in action.iter().enumerate() {
            if value >= self.size(index) {
                return Err(ActionError::OutOfDomain { index, value });
            }
        }
        Ok(())
    }

    /// Whether `action` lies in this space.
    pub fn contains(&self, action: &[u32]) -> bool {
        self.check(action).is_ok()
    }

    /// Draw a uniformly random action.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u32> {
        (0..self.dims())
            .map(|i| rng.gen_range(0..self.size(i)))
            .collect()
    }

    fn size(&self, index: usize) -> u32 {
        match self {
            ActionSpace::Discrete { n } => *n,
            ActionSpace::MultiDiscrete { nvec } => nvec[index],
        }
    }
}

/// A flat box of `f32` observations.
#[derive(Clone, Debug, PartialEq)]
pub struct ObservationSpace {
    /// Number of entries.
    pub len: usize,
    /// Lower bound of every entry.
    pub low: f32,
    /// Declared upper bound of every entry.
    pub high: f32,
}

impl ObservationSpace {
    /// Whether `obs` has the right length and lies within `[low, high]`.
    pub fn contains(&self, obs: &[f32]) -> bool {
        obs.len() == self.len && obs.iter().all(|&v| v >= self.low && v <= self.high)
    }
}
