//! Lockstep environment for Junction traffic-signal control.
//!
//! Provides [`TrafficEnv`], the `reset`/`step` state machine that wires
//! arrivals, signal control, flow propagation, and reward into one
//! discrete-time environment, plus its configuration, action and
//! observation spaces, and per-step metrics.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod lockstep;
pub mod metrics;
pub mod observation;
pub mod spaces;

pub use config::{ConfigError, EnvConfig};
pub use lockstep::{Info, StepOutcome, TrafficEnv, TrafficSnapshot};
pub use metrics::StepMetrics;
pub use observation::ObservationLayout;
pub use spaces::{ActionSpace, ObservationSpace};
