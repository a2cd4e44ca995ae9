//! Global congestion reward.
//!
//! `reward = -(Σ queue) - wait_weight · (Σ wait) - switch_penalty_total`,
//! read from the state after arrivals, wait accumulation and flow
//! propagation have all been applied for the step.

use junction_core::TrafficState;

/// The three cost terms of a reward and their total.
///
/// Every cost is reported as a non-negative magnitude; `total` is the
/// negated sum.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RewardBreakdown {
    /// Sum of all queues.
    pub congestion: f64,
    /// `wait_weight` times the sum of all waits.
    pub waiting: f64,
    /// Switch penalties incurred this step.
    pub switching: f64,
    /// `-(congestion + waiting + switching)`.
    pub total: f64,
}

/// Aggregates congestion, waiting, and switching costs into a scalar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RewardModel {
    wait_weight: f64,
}

impl Default for RewardModel {
    fn default() -> Self {
        Self { wait_weight: 0.1 }
    }
}

impl RewardModel {
    /// Create a model weighting accumulated wait by `wait_weight`.
    pub fn new(wait_weight: f64) -> Self {
        Self { wait_weight }
    }

    /// Weight applied to the summed wait.
    pub fn wait_weight(&self) -> f64 {
        self.wait_weight
    }

    /// Evaluate the reward for the current state.
    pub fn evaluate(&self, state: &TrafficState, switch_penalty_total: f64) -> RewardBreakdown {
        let congestion = state.total_queue();
        let waiting = self.wait_weight * state.total_wait();
        RewardBreakdown {
            congestion,
            waiting,
            switching: switch_penalty_total,
            total: -(congestion + waiting + switch_penalty_total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use junction_core::{Direction, IntersectionId};

    #[test]
    fn empty_state_without_switch_is_zero() {
        let s = TrafficState::new(4);
        let r = RewardModel::default().evaluate(&s, 0.0);
        assert_eq!(r.total, 0.0);
    }

    #[test]
    fn all_terms_contribute() {
        let mut s = TrafficState::new(2);
        s.set_queue(IntersectionId(0), Direction::North, 3.0);
        s.set_queue(IntersectionId(1), Direction::West, 2.0);
        s.set_wait(IntersectionId(1), Direction::East, 10.0);
        let r = RewardModel::default().evaluate(&s, 2.0);
        assert_eq!(r.congestion, 5.0);
        assert!((r.waiting - 1.0).abs() < 1e-12);
        assert_eq!(r.switching, 2.0);
        assert!((r.total - -8.0).abs() < 1e-12);
    }

    #[test]
    fn wait_weight_scales_waiting_term() {
        let mut s = TrafficState::new(1);
        s.set_wait(IntersectionId(0), Direction::South, 4.0);
        let r = RewardModel::new(0.5).evaluate(&s, 0.0);
        assert_eq!(r.waiting, 2.0);
        assert_eq!(r.total, -2.0);
    }
}
