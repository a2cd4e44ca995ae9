//! Test utilities for Junction development.
//!
//! Provides deterministic [`ArrivalSource`](junction_propagators::ArrivalSource)
//! fixtures and helpers for building hand-crafted [`TrafficState`]s.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{ConstantArrivals, ScriptedArrivals, ZeroArrivals};

use junction_core::{Direction, IntersectionId, TrafficState};

/// Build a state for `intersections` intersections with the given queues
/// and every wait at zero.
pub fn state_with_queues(
    intersections: usize,
    queues: &[(u32, Direction, f32)],
) -> TrafficState {
    let mut state = TrafficState::new(intersections);
    for &(id, direction, q) in queues {
        state.set_queue(IntersectionId(id), direction, q);
    }
    state
}
