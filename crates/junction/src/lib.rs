//! Junction: a grid traffic-signal control environment for reinforcement
//! learning.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Junction sub-crates. For most users, adding `junction` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use junction::prelude::*;
//!
//! let mut env = TrafficEnv::new(EnvConfig::grid_2x2()).unwrap();
//! let (obs, _info) = env.reset(Some(42));
//! assert_eq!(obs.len(), env.observation_space().len);
//!
//! for t in 0..20u32 {
//!     let phase = if (t / 5) % 2 == 0 { 0 } else { 1 };
//!     let out = env.step(&[phase; 4]).unwrap();
//!     assert!(out.reward <= 0.0);
//! }
//! assert_eq!(env.current_tick(), TickId(20));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `junction-core` | IDs, lanes, phases, lane state, step errors |
//! | [`space`] | `junction-space` | Grid topology and neighbour lookup |
//! | [`propagators`] | `junction-propagators` | Arrivals, signals, flow, reward |
//! | [`engine`] | `junction-engine` | The `reset`/`step` environment |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`junction-core`).
pub use junction_core as types;

/// Grid topology (`junction-space`).
pub use junction_space as space;

/// Per-step pipeline stages (`junction-propagators`).
///
/// Includes [`propagators::PoissonArrivals`],
/// [`propagators::SignalController`], [`propagators::FlowPropagator`], and
/// [`propagators::RewardModel`].
pub use junction_propagators as propagators;

/// The environment (`junction-engine`).
pub use junction_engine as engine;

/// Common imports for typical Junction usage.
///
/// ```rust
/// use junction::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use junction_core::{Direction, IntersectionId, Phase, TickId, TrafficState};

    // Errors
    pub use junction_core::{ActionError, StepError};
    pub use junction_engine::ConfigError;

    // Space
    pub use junction_space::GridTopology;

    // Pipeline
    pub use junction_propagators::{ArrivalSource, PoissonArrivals, SignalState};

    // Engine
    pub use junction_engine::{
        ActionSpace, EnvConfig, Info, ObservationSpace, StepMetrics, StepOutcome, TrafficEnv,
    };
}
