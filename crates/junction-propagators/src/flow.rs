//! Green-lane clearance and downstream propagation.
//!
//! Propagation is two-phase. [`FlowPropagator::plan`] reads the state as
//! it stands after arrivals and wait accumulation and records every
//! lane transfer; [`FlowPropagator::apply`] then performs them. Because
//! no clearance is computed from a partially updated state, the result
//! does not depend on the order intersections are visited in: vehicles
//! admitted to a downstream lane this step are not discharged again
//! until the next step.

use junction_core::{Direction, IntersectionId, Phase, TrafficState};
use junction_space::GridTopology;
use smallvec::SmallVec;

/// One planned discharge from a green lane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneTransfer {
    /// Intersection whose lane is served.
    pub source: IntersectionId,
    /// The served lane.
    pub direction: Direction,
    /// Receiving intersection, or `None` when the lane exits the grid.
    pub sink: Option<IntersectionId>,
    /// Vehicles discharged (`min(saturation_flow, queue)`).
    pub vehicles: f32,
}

/// Every transfer for one step, computed from a single state snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowPlan {
    /// Two transfers per intersection, in index order, green lanes in
    /// N/S or E/W order.
    pub transfers: Vec<LaneTransfer>,
}

/// Vehicle accounting for one applied plan.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlowSummary {
    /// Vehicles discharged from green lanes.
    pub cleared: f64,
    /// Vehicles admitted to a neighbour's lane.
    pub transferred: f64,
    /// Vehicles that left the grid at a boundary.
    pub exited: f64,
}

/// Clears green lanes and routes the outflow to neighbours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowPropagator {
    saturation_flow: f32,
}

impl Default for FlowPropagator {
    fn default() -> Self {
        Self {
            saturation_flow: 3.0,
        }
    }
}

impl FlowPropagator {
    /// Create a propagator discharging at most `saturation_flow` vehicles
    /// per green lane per step.
    pub fn new(saturation_flow: f32) -> Self {
        Self { saturation_flow }
    }

    /// Maximum vehicles cleared from one green lane in one step.
    pub fn saturation_flow(&self) -> f32 {
        self.saturation_flow
    }

    /// Compute every transfer for this step without mutating anything.
    ///
    /// `effective` holds one phase per intersection in index order.
    pub fn plan(
        &self,
        state: &TrafficState,
        topology: &GridTopology,
        effective: &[Phase],
    ) -> FlowPlan {
        debug_assert_eq!(effective.len(), topology.intersection_count());
        let mut transfers = Vec::with_capacity(effective.len() * 2);
        for (id, &phase) in topology.ids().zip(effective) {
            for direction in phase.green_lanes() {
                let queue = state.queue(id, direction);
                transfers.push(LaneTransfer {
                    source: id,
                    direction,
                    sink: topology.neighbour(id, direction),
                    vehicles: queue.min(self.saturation_flow),
                });
            }
        }
        FlowPlan { transfers }
    }

    /// Perform a plan: discharge sources, reset served waits, admit
    /// outflow downstream.
    ///
    /// All discharges are applied before any admission, so a plan built
    /// from the same state always produces the same result. Each
    /// admission carries only what its discharge actually removed: a plan
    /// applied to a state whose queues have shrunk since `plan` moves
    /// fewer vehicles, never more.
    pub fn apply(&self, plan: &FlowPlan, state: &mut TrafficState) -> FlowSummary {
        let mut summary = FlowSummary::default();
        let mut removed: SmallVec<[f32; 32]> = SmallVec::with_capacity(plan.transfers.len());

        for t in &plan.transfers {
            let lane = TrafficState::lane_index(t.source, t.direction);
            let r = state.discharge(lane, t.vehicles);
            state.serve(lane);
            summary.cleared += f64::from(r);
            removed.push(r);
        }

        for (t, &r) in plan.transfers.iter().zip(&removed) {
            match t.sink {
                Some(neighbour) => {
                    let lane = TrafficState::lane_index(neighbour, t.direction.opposite());
                    state.admit(lane, r);
                    summary.transferred += f64::from(r);
                }
                None => summary.exited += f64::from(r),
            }
        }

        summary
    }

    /// Plan and apply in one call.
    pub fn propagate(
        &self,
        state: &mut TrafficState,
        topology: &GridTopology,
        effective: &[Phase],
    ) -> FlowSummary {
        let plan = self.plan(state, topology, effective);
        self.apply(&plan, state)
    }

    /// Queue already waiting in the lanes that would receive `id`'s outflow.
    ///
    /// Independent of `id`'s own phase: all four directions count when a
    /// neighbour exists.
    pub fn downstream_pressure(
        state: &TrafficState,
        topology: &GridTopology,
        id: IntersectionId,
    ) -> f32 {
        topology
            .downstream(id)
            .iter()
            .map(|&(direction, neighbour)| state.queue(neighbour, direction.opposite()))
            .sum()
    }
}
