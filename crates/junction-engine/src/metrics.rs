//! Per-step diagnostics for the traffic environment.
//!
//! [`StepMetrics`] captures timing, vehicle accounting, and signal
//! activity for a single step. It is exposed through
//! [`TrafficEnv::last_metrics()`](crate::TrafficEnv::last_metrics) and is
//! deliberately kept out of the step `info` record.

use junction_propagators::RewardBreakdown;

/// Timing and accounting collected during a single step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Vehicles that arrived this step.
    pub arrivals: f64,
    /// Vehicles discharged from green lanes.
    pub cleared: f64,
    /// Vehicles admitted to a neighbouring intersection.
    pub transferred: f64,
    /// Vehicles that left the grid at a boundary.
    pub exited: f64,
    /// Granted phase switches.
    pub switches_granted: u32,
    /// Switch requests overridden by the minimum green time.
    pub switches_denied: u32,
    /// Reward terms for this step.
    pub reward: RewardBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.arrivals, 0.0);
        assert_eq!(m.cleared, 0.0);
        assert_eq!(m.transferred, 0.0);
        assert_eq!(m.exited, 0.0);
        assert_eq!(m.switches_granted, 0);
        assert_eq!(m.switches_denied, 0);
        assert_eq!(m.reward, RewardBreakdown::default());
    }
}
