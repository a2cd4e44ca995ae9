//! Per-step stages for Junction traffic simulations.
//!
//! Each stage is a small, independently testable operator over
//! [`TrafficState`](junction_core::TrafficState):
//!
//! # Stage order (each step)
//!
//! 1. [`ArrivalSource`]: draws per-lane arrival counts ([`PoissonArrivals`] by default)
//! 2. wait accumulation: [`TrafficState::accumulate_wait`](junction_core::TrafficState::accumulate_wait)
//! 3. [`SignalController`]: requested phases → effective phases + switch penalty
//! 4. [`FlowPropagator`]: plan all transfers from the current state, then apply them
//! 5. [`RewardModel`]: congestion, waiting, and switching cost

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod arrivals;
pub mod flow;
pub mod reward;
pub mod signal;

pub use arrivals::{ArrivalError, ArrivalSource, PoissonArrivals};
pub use flow::{FlowPlan, FlowPropagator, FlowSummary, LaneTransfer};
pub use reward::{RewardBreakdown, RewardModel};
pub use signal::{Resolution, SignalController, SignalState, SignalTiming, SwitchOutcome, Transition};
