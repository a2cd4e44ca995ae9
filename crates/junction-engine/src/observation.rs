//! Observation vector assembly.
//!
//! Per intersection, in index order:
//!
//! ```text
//! [q_N, q_S, q_E, q_W, w_N, w_S, w_E, w_W, downstream_pressure]
//! ```
//!
//! A lone intersection has no neighbours, so its pressure would be a
//! constant zero; [`ObservationLayout::Local`] drops that column.

use junction_core::{TrafficState, LANES_PER_INTERSECTION};
use junction_propagators::FlowPropagator;
use junction_space::GridTopology;

/// Which columns each intersection contributes to the observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObservationLayout {
    /// Queues and waits only (8 entries).
    Local,
    /// Queues, waits, and downstream pressure (9 entries).
    WithPressure,
}

impl ObservationLayout {
    /// `Local` for a grid without links, `WithPressure` otherwise.
    pub fn for_topology(topology: &GridTopology) -> Self {
        if topology.has_links() {
            ObservationLayout::WithPressure
        } else {
            ObservationLayout::Local
        }
    }

    /// Entries contributed by one intersection.
    pub fn per_intersection(self) -> usize {
        match self {
            ObservationLayout::Local => 2 * LANES_PER_INTERSECTION,
            ObservationLayout::WithPressure => 2 * LANES_PER_INTERSECTION + 1,
        }
    }

    /// Total observation length for `intersections` intersections.
    pub fn len(self, intersections: usize) -> usize {
        self.per_intersection() * intersections
    }

    /// Write the observation for `state` into `out`, replacing its contents.
    pub fn assemble(self, state: &TrafficState, topology: &GridTopology, out: &mut Vec<f32>) {
        out.clear();
        out.reserve(self.len(topology.intersection_count()));
        for id in topology.ids() {
            out.extend_from_slice(state.queues_of(id));
            out.extend_from_slice(state.waits_of(id));
            if self == ObservationLayout::WithPressure {
                out.push(FlowPropagator::downstream_pressure(state, topology, id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use junction_core::{Direction, IntersectionId};

    #[test]
    fn layout_follows_topology() {
        assert_eq!(
            ObservationLayout::for_topology(&GridTopology::single()),
            ObservationLayout::Local
        );
        let grid = GridTopology::square(2).unwrap();
        assert_eq!(
            ObservationLayout::for_topology(&grid),
            ObservationLayout::WithPressure
        );
        assert_eq!(ObservationLayout::Local.len(1), 8);
        assert_eq!(ObservationLayout::WithPressure.len(4), 36);
    }

    #[test]
    fn local_layout_is_queues_then_waits() {
        let g = GridTopology::single();
        let mut s = TrafficState::new(1);
        s.set_queue(IntersectionId(0), Direction::East, 4.0);
        s.set_wait(IntersectionId(0), Direction::North, 9.0);
        let mut obs = Vec::new();
        ObservationLayout::Local.assemble(&s, &g, &mut obs);
        assert_eq!(obs, vec![0.0, 0.0, 4.0, 0.0, 9.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn pressure_column_closes_each_block() {
        let g = GridTopology::square(2).unwrap();
        let mut s = TrafficState::new(4);
        s.set_queue(IntersectionId(1), Direction::West, 6.0);
        let mut obs = vec![123.0; 3];
        ObservationLayout::WithPressure.assemble(&s, &g, &mut obs);
        assert_eq!(obs.len(), 36);
        // Intersection 0 feeds 1's west lane.
        assert_eq!(obs[8], 6.0);
        // Intersection 1's own west queue appears in its queue block.
        assert_eq!(obs[9 + 3], 6.0);
        // Intersection 1 feeds 0's east lane and 3's north lane: both empty.
        assert_eq!(obs[17], 0.0);
    }
}
