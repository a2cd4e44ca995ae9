//! Core types for the Junction traffic-signal simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by the rest of the workspace: intersection and tick
//! identifiers, lane directions, signal phases, the per-lane
//! [`TrafficState`], and the error types surfaced by the step contract.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod lane;
pub mod phase;
pub mod state;

pub use error::{ActionError, StepError};
pub use id::{IntersectionId, TickId};
pub use lane::{Direction, LANES_PER_INTERSECTION};
pub use phase::Phase;
pub use state::TrafficState;
