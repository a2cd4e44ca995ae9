//! Environment configuration, validation, and error types.
//!
//! [`EnvConfig`] is the builder-input for constructing a
//! [`TrafficEnv`](crate::TrafficEnv). [`validate()`](EnvConfig::validate)
//! checks every numeric invariant at startup so the step loop never has
//! to.

use std::error::Error;
use std::fmt;

use junction_propagators::{ArrivalError, FlowPropagator, RewardModel, SignalTiming};
use junction_space::{GridTopology, SpaceError};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`EnvConfig::validate()`].
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Grid construction failed.
    Space(SpaceError),
    /// Arrival source construction failed.
    Arrival(ArrivalError),
    /// `min_green_time` is zero.
    ZeroMinGreen,
    /// `saturation_flow` is NaN, infinite, zero, or negative.
    InvalidSaturationFlow {
        /// The invalid value.
        value: f32,
    },
    /// `switch_penalty` is NaN, infinite, or negative.
    InvalidSwitchPenalty {
        /// The invalid value.
        value: f64,
    },
    /// `wait_weight` is NaN, infinite, or negative.
    InvalidWaitWeight {
        /// The invalid value.
        value: f64,
    },
    /// `observation_high` is NaN, infinite, zero, or negative.
    InvalidObservationBound {
        /// The invalid value.
        value: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "space: {e}"),
            Self::Arrival(e) => write!(f, "arrivals: {e}"),
            Self::ZeroMinGreen => write!(f, "min_green_time must be at least 1"),
            Self::InvalidSaturationFlow { value } => {
                write!(f, "saturation_flow must be finite and positive, got {value}")
            }
            Self::InvalidSwitchPenalty { value } => {
                write!(f, "switch_penalty must be finite and >= 0, got {value}")
            }
            Self::InvalidWaitWeight { value } => {
                write!(f, "wait_weight must be finite and >= 0, got {value}")
            }
            Self::InvalidObservationBound { value } => {
                write!(f, "observation_high must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            Self::Arrival(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<ArrivalError> for ConfigError {
    fn from(e: ArrivalError) -> Self {
        Self::Arrival(e)
    }
}

// ── EnvConfig ──────────────────────────────────────────────────────

/// Complete configuration for a [`TrafficEnv`](crate::TrafficEnv).
///
/// Start from [`single_intersection()`](Self::single_intersection) or
/// [`grid()`](Self::grid) and override fields as needed:
///
/// ```
/// use junction_engine::EnvConfig;
///
/// let config = EnvConfig { arrival_rate: 0.8, seed: 7, ..EnvConfig::grid(3, 3) };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.intersection_count(), 9);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EnvConfig {
    /// Grid rows.
    pub rows: u32,
    /// Grid columns.
    pub cols: u32,
    /// Mean Poisson arrivals per lane per step.
    pub arrival_rate: f64,
    /// Steps a phase must hold before a requested switch is granted.
    pub min_green_time: u32,
    /// Vehicles cleared per green lane per step.
    pub saturation_flow: f32,
    /// Reward deduction per granted switch.
    pub switch_penalty: f64,
    /// Weight of accumulated wait in the reward.
    pub wait_weight: f64,
    /// Declared upper bound of each observation entry. Advertised through
    /// [`ObservationSpace`](crate::ObservationSpace), never enforced.
    pub observation_high: f32,
    /// Seed of the arrival source until the first seeded `reset`.
    pub seed: u64,
}

impl EnvConfig {
    /// One isolated intersection: arrivals at mean 2.0, observation of
    /// length 8.
    pub fn single_intersection() -> Self {
        Self {
            rows: 1,
            cols: 1,
            arrival_rate: 2.0,
            min_green_time: 3,
            saturation_flow: 3.0,
            switch_penalty: 2.0,
            wait_weight: 0.1,
            observation_high: 1000.0,
            seed: 0,
        }
    }

    /// A `rows × cols` grid with arrivals at mean 1.2.
    pub fn grid(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            arrival_rate: 1.2,
            observation_high: 5000.0,
            ..Self::single_intersection()
        }
    }

    /// The reference 2×2 grid.
    pub fn grid_2x2() -> Self {
        Self::grid(2, 2)
    }

    /// `rows * cols`, saturating.
    pub fn intersection_count(&self) -> usize {
        (self.rows as usize).saturating_mul(self.cols as usize)
    }

    /// Check structural invariants.
    ///
    /// Does not construct the arrival source; that happens in
    /// [`TrafficEnv::new`](crate::TrafficEnv::new), which reports an
    /// invalid rate as [`ConfigError::Arrival`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SpaceError::EmptySpace.into());
        }
        if self.rows.checked_mul(self.cols).is_none() {
            return Err(SpaceError::TooManyIntersections {
                rows: self.rows,
                cols: self.cols,
            }
            .into());
        }
        if !self.arrival_rate.is_finite() || self.arrival_rate < 0.0 {
            return Err(ArrivalError::InvalidRate {
                rate: self.arrival_rate,
            }
            .into());
        }
        if self.min_green_time == 0 {
            return Err(ConfigError::ZeroMinGreen);
        }
        if !self.saturation_flow.is_finite() || self.saturation_flow <= 0.0 {
            return Err(ConfigError::InvalidSaturationFlow {
                value: self.saturation_flow,
            });
        }
        if !self.switch_penalty.is_finite() || self.switch_penalty < 0.0 {
            return Err(ConfigError::InvalidSwitchPenalty {
                value: self.switch_penalty,
            });
        }
        if !self.wait_weight.is_finite() || self.wait_weight < 0.0 {
            return Err(ConfigError::InvalidWaitWeight {
                value: self.wait_weight,
            });
        }
        if !self.observation_high.is_finite() || self.observation_high <= 0.0 {
            return Err(ConfigError::InvalidObservationBound {
                value: self.observation_high,
            });
        }
        Ok(())
    }

    pub(crate) fn topology(&self) -> Result<GridTopology, ConfigError> {
        Ok(GridTopology::new(self.rows, self.cols)?)
    }

    pub(crate) fn signal_timing(&self) -> SignalTiming {
        SignalTiming {
            min_green_time: self.min_green_time,
            switch_penalty: self.switch_penalty,
        }
    }

    pub(crate) fn flow(&self) -> FlowPropagator {
        FlowPropagator::new(self.saturation_flow)
    }

    pub(crate) fn reward(&self) -> RewardModel {
        RewardModel::new(self.wait_weight)
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::single_intersection()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        assert!(EnvConfig::single_intersection().validate().is_ok());
        assert!(EnvConfig::grid_2x2().validate().is_ok());
        assert_eq!(EnvConfig::grid_2x2().intersection_count(), 4);
    }

    #[test]
    fn presets_carry_reference_constants() {
        let single = EnvConfig::single_intersection();
        assert_eq!(single.arrival_rate, 2.0);
        assert_eq!(single.observation_high, 1000.0);
        let grid = EnvConfig::grid_2x2();
        assert_eq!(grid.arrival_rate, 1.2);
        assert_eq!(grid.observation_high, 5000.0);
        assert_eq!(grid.min_green_time, 3);
        assert_eq!(grid.saturation_flow, 3.0);
        assert_eq!(grid.switch_penalty, 2.0);
        assert_eq!(grid.wait_weight, 0.1);
    }

    #[test]
    fn empty_grid_rejected() {
        let cfg = EnvConfig {
            rows: 0,
            ..EnvConfig::grid_2x2()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::Space(SpaceError::EmptySpace)));
    }

    #[test]
    fn bad_rate_rejected() {
        let cfg = EnvConfig {
            arrival_rate: -1.0,
            ..EnvConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Arrival(_))));
    }

    #[test]
    fn zero_min_green_rejected() {
        let cfg = EnvConfig {
            min_green_time: 0,
            ..EnvConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroMinGreen));
    }

    #[test]
    fn non_finite_parameters_rejected() {
        let flow = EnvConfig {
            saturation_flow: 0.0,
            ..EnvConfig::default()
        };
        assert!(matches!(
            flow.validate(),
            Err(ConfigError::InvalidSaturationFlow { .. })
        ));

        let penalty = EnvConfig {
            switch_penalty: f64::NAN,
            ..EnvConfig::default()
        };
        assert!(matches!(
            penalty.validate(),
            Err(ConfigError::InvalidSwitchPenalty { .. })
        ));

        let weight = EnvConfig {
            wait_weight: -0.1,
            ..EnvConfig::default()
        };
        assert!(matches!(
            weight.validate(),
            Err(ConfigError::InvalidWaitWeight { .. })
        ));

        let high = EnvConfig {
            observation_high: f32::INFINITY,
            ..EnvConfig::default()
        };
        assert!(matches!(
            high.validate(),
            Err(ConfigError::InvalidObservationBound { .. })
        ));
    }

    #[test]
    fn display_wraps_source() {
        let err = ConfigError::from(SpaceError::EmptySpace);
        assert_eq!(err.to_string(), "space: grid must have at least one intersection");
        assert!(err.source().is_some());
    }
}
