//! Stochastic vehicle arrivals.
//!
//! Arrivals are drawn through the [`ArrivalSource`] trait so tests can
//! substitute fixed draws for the random process. The production source,
//! [`PoissonArrivals`], samples each lane independently from a Poisson
//! distribution using a per-instance seeded ChaCha8 RNG: two sources
//! built with the same seed produce identical arrival sequences.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Poisson};
use std::fmt;

/// A per-step generator of vehicle arrivals.
///
/// # Contract
///
/// - `draw()` fills every entry of `out` with a non-negative count, one
///   per lane in the flat `TrafficState` layout.
/// - `reseed()` restarts the sequence; drawing after `reseed(s)` must
///   produce the same values every time for the same `s`.
pub trait ArrivalSource: Send + 'static {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Restart the arrival sequence from `seed`.
    fn reseed(&mut self, seed: u64);

    /// Fill `out` with this step's arrival counts.
    fn draw(&mut self, out: &mut [f32]);
}

/// Rejected arrival-rate configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrivalError {
    /// The Poisson mean was negative, NaN, or infinite.
    InvalidRate {
        /// The offending rate.
        rate: f64,
    },
}

impl fmt::Display for ArrivalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRate { rate } => {
                write!(f, "arrival rate must be finite and >= 0, got {rate}")
            }
        }
    }
}

impl std::error::Error for ArrivalError {}

/// Independent Poisson arrivals on every lane.
#[derive(Debug)]
pub struct PoissonArrivals {
    rate: f64,
    // `None` when rate == 0: Poisson(0) is a point mass at zero, which
    // the sampler rejects as a degenerate shape.
    distribution: Option<Poisson<f64>>,
    rng: ChaCha8Rng,
}

impl PoissonArrivals {
    /// Create a source with mean `rate` arrivals per lane per step.
    ///
    /// # Errors
    ///
    /// Returns [`ArrivalError::InvalidRate`] if `rate` is negative or not finite.
    pub fn new(rate: f64, seed: u64) -> Result<Self, ArrivalError> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(ArrivalError::InvalidRate { rate });
        }
        let distribution = if rate > 0.0 {
            Some(Poisson::new(rate).map_err(|_| ArrivalError::InvalidRate { rate })?)
        } else {
            None
        };
        Ok(Self {
            rate,
            distribution,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Mean arrivals per lane per step.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl ArrivalSource for PoissonArrivals {
    fn name(&self) -> &str {
        "PoissonArrivals"
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    fn draw(&mut self, out: &mut [f32]) {
        match &self.distribution {
            Some(dist) => {
                for v in out.iter_mut() {
                    let n: f64 = dist.sample(&mut self.rng);
                    *v = n as f32;
                }
            }
            None => out.fill(0.0),
        }
    }
}
