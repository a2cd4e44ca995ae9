//! Error types for the step contract.
//!
//! Every variant here is detected before a step mutates any state, so a
//! failed `step()` leaves the environment exactly as it was.

use std::error::Error;
use std::fmt;

/// Why a submitted action vector was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionError {
    /// An entry is not one of the two phase values (0 or 1).
    OutOfDomain {
        /// Intersection index of the offending entry.
        index: usize,
        /// The value that was submitted.
        value: u32,
    },
    /// A lone value is not a phase (0 or 1). Raised by conversions that
    /// have no action vector, and so no intersection index, to report.
    NotAPhase {
        /// The value that was converted.
        value: u32,
    },
    /// The action vector does not carry exactly one entry per intersection.
    WrongLength {
        /// Number of intersections in the grid.
        expected: usize,
        /// Number of entries submitted.
        got: usize,
    },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfDomain { index, value } => {
                write!(f, "action {value} for intersection {index} is not a phase (expected 0 or 1)")
            }
            Self::NotAPhase { value } => {
                write!(f, "{value} is not a phase (expected 0 or 1)")
            }
            Self::WrongLength { expected, got } => {
                write!(f, "expected {expected} actions, got {got}")
            }
        }
    }
}

impl Error for ActionError {}

/// Errors from `TrafficEnv::step()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepError {
    /// `step()` was called before the first `reset()`.
    NotReset,
    /// The action vector failed validation.
    InvalidAction(ActionError),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReset => write!(f, "step called before reset"),
            Self::InvalidAction(e) => write!(f, "invalid action: {e}"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidAction(e) => Some(e),
            Self::NotReset => None,
        }
    }
}

impl From<ActionError> for StepError {
    fn from(e: ActionError) -> Self {
        Self::InvalidAction(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_action_chains_source() {
        let err = StepError::from(ActionError::WrongLength {
            expected: 4,
            got: 3,
        });
        assert_eq!(err.to_string(), "invalid action: expected 4 actions, got 3");
        assert!(err.source().is_some());
        assert!(StepError::NotReset.source().is_none());
    }
}
