//! Per-lane queue and wait bookkeeping.
//!
//! [`TrafficState`] stores two flat `f32` buffers laid out
//! intersection-major, lane-minor: lane `d` of intersection `i` lives at
//! `i * 4 + d.slot()`. The same layout is used for arrival draws, so an
//! arrival buffer can be added element-wise.

use crate::id::IntersectionId;
use crate::lane::{Direction, LANES_PER_INTERSECTION};

/// Queue lengths and accumulated waits for every lane of every intersection.
///
/// Invariant: every queue is `>= 0`. Mutators only ever add non-negative
/// amounts or subtract amounts capped at the current queue.
#[derive(Clone, Debug, PartialEq)]
pub struct TrafficState {
    queues: Vec<f32>,
    waits: Vec<f32>,
}

impl TrafficState {
    /// All-zero state for `intersections` intersections.
    pub fn new(intersections: usize) -> Self {
        let lanes = intersections * LANES_PER_INTERSECTION;
        Self {
            queues: vec![0.0; lanes],
            waits: vec![0.0; lanes],
        }
    }

    /// Flat buffer index of a lane.
    pub fn lane_index(id: IntersectionId, direction: Direction) -> usize {
        id.index() * LANES_PER_INTERSECTION + direction.slot()
    }

    /// Number of intersections tracked.
    pub fn intersection_count(&self) -> usize {
        self.queues.len() / LANES_PER_INTERSECTION
    }

    /// Total number of lanes (`4 * intersection_count`).
    pub fn lane_count(&self) -> usize {
        self.queues.len()
    }

    /// Zero every queue and wait.
    pub fn clear(&mut self) {
        self.queues.fill(0.0);
        self.waits.fill(0.0);
    }

    /// Queue length of one lane.
    pub fn queue(&self, id: IntersectionId, direction: Direction) -> f32 {
        self.queues[Self::lane_index(id, direction)]
    }

    /// Accumulated wait of one lane.
    pub fn wait(&self, id: IntersectionId, direction: Direction) -> f32 {
        self.waits[Self::lane_index(id, direction)]
    }

    /// The four queues of an intersection in N, S, E, W order.
    pub fn queues_of(&self, id: IntersectionId) -> &[f32] {
        let base = id.index() * LANES_PER_INTERSECTION;
        &self.queues[base..base + LANES_PER_INTERSECTION]
    }

    /// The four waits of an intersection in N, S, E, W order.
    pub fn waits_of(&self, id: IntersectionId) -> &[f32] {
        let base = id.index() * LANES_PER_INTERSECTION;
        &self.waits[base..base + LANES_PER_INTERSECTION]
    }

    /// Every queue, flat.
    pub fn queues(&self) -> &[f32] {
        &self.queues
    }

    /// Every wait, flat.
    pub fn waits(&self) -> &[f32] {
        &self.waits
    }

    /// Overwrite one lane's queue. Negative values are clamped to zero.
    pub fn set_queue(&mut self, id: IntersectionId, direction: Direction, value: f32) {
        self.queues[Self::lane_index(id, direction)] = value.max(0.0);
    }

    /// Overwrite one lane's wait. Negative values are clamped to zero.
    pub fn set_wait(&mut self, id: IntersectionId, direction: Direction, value: f32) {
        self.waits[Self::lane_index(id, direction)] = value.max(0.0);
    }

    /// Add one arrival count per lane.
    ///
    /// `arrivals` uses the flat lane layout and must have `lane_count()`
    /// entries. Negative counts are ignored.
    pub fn add_arrivals(&mut self, arrivals: &[f32]) {
        debug_assert_eq!(arrivals.len(), self.queues.len());
        for (q, &a) in self.queues.iter_mut().zip(arrivals) {
            *q += a.max(0.0);
        }
    }

    /// Add each lane's current queue to its wait.
    pub fn accumulate_wait(&mut self) {
        for (w, &q) in self.waits.iter_mut().zip(&self.queues) {
            *w += q;
        }
    }

    /// Remove up to `vehicles` from a lane; returns how many were removed.
    pub fn discharge(&mut self, lane: usize, vehicles: f32) -> f32 {
        let q = &mut self.queues[lane];
        let removed = vehicles.clamp(0.0, *q);
        *q -= removed;
        removed
    }

    /// Add `vehicles` to a lane's queue.
    pub fn admit(&mut self, lane: usize, vehicles: f32) {
        self.queues[lane] += vehicles.max(0.0);
    }

    /// Mark a lane as served this step: its accumulated wait drops to zero.
    pub fn serve(&mut self, lane: usize) {
        self.waits[lane] = 0.0;
    }

    /// Sum of all queues.
    pub fn total_queue(&self) -> f64 {
        self.queues.iter().map(|&q| f64::from(q)).sum()
    }

    /// Sum of all waits.
    pub fn total_wait(&self) -> f64 {
        self.waits.iter().map(|&w| f64::from(w)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const N: Direction = Direction::North;
    const E: Direction = Direction::East;

    #[test]
    fn new_state_is_zeroed() {
        let s = TrafficState::new(4);
        assert_eq!(s.intersection_count(), 4);
        assert_eq!(s.lane_count(), 16);
        assert_eq!(s.total_queue(), 0.0);
        assert_eq!(s.total_wait(), 0.0);
    }

    #[test]
    fn lane_index_is_intersection_major() {
        assert_eq!(TrafficState::lane_index(IntersectionId(0), N), 0);
        assert_eq!(TrafficState::lane_index(IntersectionId(1), N), 4);
        assert_eq!(TrafficState::lane_index(IntersectionId(2), E), 10);
    }

    #[test]
    fn wait_accumulates_post_arrival_queue() {
        let mut s = TrafficState::new(1);
        s.add_arrivals(&[2.0, 0.0, 1.0, 0.0]);
        s.accumulate_wait();
        s.add_arrivals(&[1.0, 0.0, 0.0, 0.0]);
        s.accumulate_wait();
        assert_eq!(s.waits_of(IntersectionId(0)), &[5.0, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn discharge_caps_at_queue() {
        let mut s = TrafficState::new(1);
        s.set_queue(IntersectionId(0), N, 2.0);
        let lane = TrafficState::lane_index(IntersectionId(0), N);
        assert_eq!(s.discharge(lane, 3.0), 2.0);
        assert_eq!(s.queue(IntersectionId(0), N), 0.0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut s = TrafficState::new(2);
        s.add_arrivals(&[1.0; 8]);
        s.accumulate_wait();
        s.clear();
        assert_eq!(s, TrafficState::new(2));
    }

    proptest! {
        #[test]
        fn queues_never_negative(
            ops in proptest::collection::vec((0usize..8, -5.0f32..5.0, any::<bool>()), 0..64)
        ) {
            let mut s = TrafficState::new(2);
            for (lane, amount, add) in ops {
                if add {
                    s.admit(lane, amount);
                } else {
                    s.discharge(lane, amount);
                }
            }
            prop_assert!(s.queues().iter().all(|&q| q >= 0.0));
        }
    }
}
