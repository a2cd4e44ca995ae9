//! Lockstep (synchronous) traffic environment.
//!
//! [`TrafficEnv`] is the user-facing `reset`/`step` API. Each call to
//! [`step()`](TrafficEnv::step) validates the action vector, then runs
//! one fixed pipeline over the owned state:
//!
//! ```text
//! arrivals → wait accumulation → signal resolution → flow → reward → observation
//! ```
//!
//! Validation happens before anything is touched, including the arrival
//! RNG, so a rejected step leaves the environment exactly as it was.
//!
//! # Ownership model
//!
//! `TrafficEnv` is [`Send`] but all mutating methods take `&mut self`.
//! [`snapshot()`](TrafficEnv::snapshot) borrows from `self`, so the
//! caller cannot step while holding one.

use std::time::Instant;

use indexmap::IndexMap;
use log::{debug, trace};
use smallvec::SmallVec;

use junction_core::{
    ActionError, IntersectionId, Phase, StepError, TickId, TrafficState, LANES_PER_INTERSECTION,
};
use junction_propagators::{
    ArrivalSource, FlowPropagator, PoissonArrivals, RewardModel, SignalController, SignalState,
};
use junction_space::GridTopology;

use crate::config::{ConfigError, EnvConfig};
use crate::metrics::StepMetrics;
use crate::observation::ObservationLayout;
use crate::spaces::{ActionSpace, ObservationSpace};

// Compile-time assertion: TrafficEnv is Send.
// Fails to compile if any field (notably the boxed arrival source) is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<TrafficEnv>();
    }
};

// ── Info ────────────────────────────────────────────────────────

/// Auxiliary per-step record returned alongside observations.
///
/// Ordered by insertion. The environment currently reports nothing here;
/// diagnostics live in [`TrafficEnv::last_metrics()`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Info {
    entries: IndexMap<String, f64>,
}

impl Info {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries.get(key).copied()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

// ── StepOutcome ─────────────────────────────────────────────────

/// Result of a successful [`TrafficEnv::step()`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// Observation of the state after this step.
    pub observation: Vec<f32>,
    /// Scalar reward for this step.
    pub reward: f64,
    /// Always `false`: episodes have no terminal state.
    pub terminated: bool,
    /// Always `false`: episode length is the caller's concern.
    pub truncated: bool,
    /// Auxiliary record (empty).
    pub info: Info,
}

// ── TrafficSnapshot ─────────────────────────────────────────────

/// Read-only view of the environment between steps.
#[derive(Clone, Copy)]
pub struct TrafficSnapshot<'e> {
    state: &'e TrafficState,
    topology: &'e GridTopology,
    signals: &'e SignalController,
    tick: TickId,
}

impl<'e> TrafficSnapshot<'e> {
    /// Tick this snapshot was taken at.
    pub fn tick_id(&self) -> TickId {
        self.tick
    }

    /// Number of intersections.
    pub fn intersection_count(&self) -> usize {
        self.topology.intersection_count()
    }

    /// Queues of `id` in N, S, E, W order.
    pub fn queues(&self, id: IntersectionId) -> &'e [f32] {
        self.state.queues_of(id)
    }

    /// Accumulated waits of `id` in N, S, E, W order.
    pub fn waits(&self, id: IntersectionId) -> &'e [f32] {
        self.state.waits_of(id)
    }

    /// Current phase of `id`, or `None` before its first step.
    pub fn phase(&self, id: IntersectionId) -> Option<Phase> {
        self.signals.state(id).phase()
    }

    /// Consecutive steps `id` has held its current phase.
    pub fn green_timer(&self, id: IntersectionId) -> u32 {
        self.signals.state(id).green_timer()
    }

    /// Queue already waiting in the lanes that receive `id`'s outflow.
    pub fn downstream_pressure(&self, id: IntersectionId) -> f32 {
        FlowPropagator::downstream_pressure(self.state, self.topology, id)
    }

    /// The full lane state.
    pub fn state(&self) -> &'e TrafficState {
        self.state
    }
}

impl std::fmt::Debug for TrafficSnapshot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrafficSnapshot")
            .field("tick", &self.tick)
            .field("total_queue", &self.state.total_queue())
            .field("total_wait", &self.state.total_wait())
            .finish()
    }
}

// ── TrafficEnv ──────────────────────────────────────────────────

/// Discrete-time traffic-signal control environment.
///
/// Created from an [`EnvConfig`] via [`new()`](TrafficEnv::new). Must be
/// [`reset()`](TrafficEnv::reset) before the first
/// [`step()`](TrafficEnv::step).
///
/// # Example
///
/// ```
/// use junction_engine::{EnvConfig, TrafficEnv};
///
/// let mut env = TrafficEnv::new(EnvConfig::grid_2x2()).unwrap();
/// let (obs, _info) = env.reset(Some(42));
/// assert_eq!(obs.len(), 36);
/// let out = env.step(&[0, 1, 0, 1]).unwrap();
/// assert!(out.reward <= 0.0);
/// ```
pub struct TrafficEnv {
    config: EnvConfig,
    topology: GridTopology,
    state: TrafficState,
    signals: SignalController,
    arrivals: Box<dyn ArrivalSource>,
    flow: FlowPropagator,
    reward: RewardModel,
    layout: ObservationLayout,
    initialized: bool,
    tick: TickId,
    episode: u64,
    last_metrics: StepMetrics,
    arrival_buf: Vec<f32>,
}

impl TrafficEnv {
    /// Create an environment with Poisson arrivals seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails validation.
    pub fn new(config: EnvConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let arrivals = PoissonArrivals::new(config.arrival_rate, config.seed)?;
        Self::with_arrivals(config, Box::new(arrivals))
    }

    /// Create an environment drawing arrivals from a caller-supplied source.
    ///
    /// `config.arrival_rate` and `config.seed` are still validated but the
    /// source is used as given.
    pub fn with_arrivals(
        config: EnvConfig,
        arrivals: Box<dyn ArrivalSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let topology = config.topology()?;
        let n = topology.intersection_count();
        let layout = ObservationLayout::for_topology(&topology);
        debug!(
            "traffic env: {}x{} grid, arrivals '{}', observation {:?}",
            topology.rows(),
            topology.cols(),
            arrivals.name(),
            layout
        );
        Ok(Self {
            state: TrafficState::new(n),
            signals: SignalController::new(n, config.signal_timing()),
            flow: config.flow(),
            reward: config.reward(),
            arrival_buf: vec![0.0; n * LANES_PER_INTERSECTION],
            topology,
            arrivals,
            layout,
            initialized: false,
            tick: TickId::default(),
            episode: 0,
            last_metrics: StepMetrics::default(),
            config,
        })
    }

    /// Start a new episode.
    ///
    /// Zeroes every queue and wait and returns all signals to their unset
    /// state. With `Some(seed)` the arrival source is reseeded; with
    /// `None` it continues its current stream.
    pub fn reset(&mut self, seed: Option<u64>) -> (Vec<f32>, Info) {
        if let Some(seed) = seed {
            self.arrivals.reseed(seed);
        }
        self.state.clear();
        self.signals.reset();
        self.tick = TickId::default();
        self.episode += 1;
        self.last_metrics = StepMetrics::default();
        self.initialized = true;
        debug!(
            "episode {} reset: {} intersections, seed {:?}",
            self.episode,
            self.topology.intersection_count(),
            seed
        );
        (self.observe(), Info::new())
    }

    /// Advance one step with one phase index per intersection.
    ///
    /// # Errors
    ///
    /// [`StepError::NotReset`] before the first [`reset()`](Self::reset);
    /// [`StepError::InvalidAction`] if `action` has the wrong length or
    /// holds a value outside `{0, 1}`. Neither mutates anything.
    pub fn step(&mut self, action: &[u32]) -> Result<StepOutcome, StepError> {
        if !self.initialized {
            return Err(StepError::NotReset);
        }
        let phases = self.decode(action)?;
        Ok(self.advance(&phases))
    }

    /// Advance one step with already-typed phases.
    ///
    /// # Errors
    ///
    /// As for [`step()`](Self::step), minus the domain check.
    pub fn step_phases(&mut self, phases: &[Phase]) -> Result<StepOutcome, StepError> {
        if !self.initialized {
            return Err(StepError::NotReset);
        }
        let expected = self.topology.intersection_count();
        if phases.len() != expected {
            return Err(ActionError::WrongLength {
                expected,
                got: phases.len(),
            }
            .into());
        }
        Ok(self.advance(phases))
    }

    fn decode(&self, action: &[u32]) -> Result<SmallVec<[Phase; 16]>, ActionError> {
        let expected = self.topology.intersection_count();
        if action.len() != expected {
            return Err(ActionError::WrongLength {
                expected,
                got: action.len(),
            });
        }
        action
            .iter()
            .enumerate()
            .map(|(i, &v)| Phase::decode(i, v))
            .collect()
    }

    fn advance(&mut self, requested: &[Phase]) -> StepOutcome {
        let start = Instant::now();

        self.arrivals.draw(&mut self.arrival_buf);
        let arrived: f64 = self.arrival_buf.iter().map(|&a| f64::from(a)).sum();
        self.state.add_arrivals(&self.arrival_buf);
        self.state.accumulate_wait();

        let resolution = self.signals.resolve(requested);
        let flow = self
            .flow
            .propagate(&mut self.state, &self.topology, &resolution.effective);
        let reward = self.reward.evaluate(&self.state, resolution.penalty_total);

        self.tick = TickId(self.tick.0 + 1);
        let observation = self.observe();

        self.last_metrics = StepMetrics {
            total_us: start.elapsed().as_micros() as u64,
            arrivals: arrived,
            cleared: flow.cleared,
            transferred: flow.transferred,
            exited: flow.exited,
            switches_granted: resolution.granted,
            switches_denied: resolution.denied,
            reward,
        };
        trace!(
            "tick {}: arrived {arrived}, cleared {}, reward {} (congestion {}, waiting {}, switching {})",
            self.tick.0,
            flow.cleared,
            reward.total,
            reward.congestion,
            reward.waiting,
            reward.switching
        );

        StepOutcome {
            observation,
            reward: reward.total,
            terminated: false,
            truncated: false,
            info: Info::new(),
        }
    }

    fn observe(&self) -> Vec<f32> {
        let mut obs = Vec::new();
        self.layout.assemble(&self.state, &self.topology, &mut obs);
        obs
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> TrafficSnapshot<'_> {
        TrafficSnapshot {
            state: &self.state,
            topology: &self.topology,
            signals: &self.signals,
            tick: self.tick,
        }
    }

    /// The action domain: `Discrete(2)` for one intersection,
    /// `MultiDiscrete([2; N])` otherwise.
    pub fn action_space(&self) -> ActionSpace {
        ActionSpace::for_intersections(self.topology.intersection_count())
    }

    /// The observation box.
    pub fn observation_space(&self) -> ObservationSpace {
        ObservationSpace {
            len: self.layout.len(self.topology.intersection_count()),
            low: 0.0,
            high: self.config.observation_high,
        }
    }

    /// The observation layout in use.
    pub fn observation_layout(&self) -> ObservationLayout {
        self.layout
    }

    /// Steps taken since the last reset.
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// Number of resets so far.
    pub fn episode(&self) -> u64 {
        self.episode
    }

    /// Whether [`reset()`](Self::reset) has been called.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Signal state of one intersection.
    pub fn signal(&self, id: IntersectionId) -> SignalState {
        self.signals.state(id)
    }

    /// The configuration this environment was built from.
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// The grid topology.
    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }
}

impl std::fmt::Debug for TrafficEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrafficEnv")
            .field("rows", &self.topology.rows())
            .field("cols", &self.topology.cols())
            .field("arrivals", &self.arrivals.name())
            .field("initialized", &self.initialized)
            .field("episode", &self.episode)
            .field("current_tick", &self.tick)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use junction_core::Direction;
    use junction_test_utils::{ConstantArrivals, ZeroArrivals};

    fn quiet(config: EnvConfig) -> TrafficEnv {
        TrafficEnv::with_arrivals(config, Box::new(ZeroArrivals)).unwrap()
    }

    // ── Lifecycle ───────────────────────────────────────────────

    #[test]
    fn step_before_reset_fails() {
        let mut env = TrafficEnv::new(EnvConfig::single_intersection()).unwrap();
        assert_eq!(env.step(&[0]), Err(StepError::NotReset));
        assert_eq!(env.current_tick(), TickId(0));
    }

    #[test]
    fn reset_returns_zero_observation() {
        let mut env = TrafficEnv::new(EnvConfig::grid_2x2()).unwrap();
        let (obs, info) = env.reset(Some(3));
        assert_eq!(obs, vec![0.0; 36]);
        assert!(info.is_empty());
        assert_eq!(env.episode(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = EnvConfig {
            cols: 0,
            ..EnvConfig::grid_2x2()
        };
        assert!(TrafficEnv::new(cfg).is_err());
    }

    #[test]
    fn tick_advances_and_resets() {
        let mut env = quiet(EnvConfig::single_intersection());
        env.reset(None);
        env.step(&[0]).unwrap();
        env.step(&[0]).unwrap();
        assert_eq!(env.current_tick(), TickId(2));
        env.reset(None);
        assert_eq!(env.current_tick(), TickId(0));
        assert_eq!(env.episode(), 2);
    }

    // ── Step contract ───────────────────────────────────────────

    #[test]
    fn quiet_single_step_is_all_zero() {
        let mut env = quiet(EnvConfig::single_intersection());
        env.reset(Some(0));
        let out = env.step(&[0]).unwrap();
        assert_eq!(out.observation, vec![0.0; 8]);
        assert_eq!(out.reward, 0.0);
        assert!(!out.terminated);
        assert!(!out.truncated);
        assert!(out.info.is_empty());
    }

    #[test]
    fn out_of_domain_action_leaves_state_untouched() {
        let mut env = TrafficEnv::new(EnvConfig::grid_2x2()).unwrap();
        env.reset(Some(9));
        env.step(&[0, 0, 0, 0]).unwrap();
        let before = env.snapshot().state().clone();
        let err = env.step(&[0, 2, 0, 0]).unwrap_err();
        assert_eq!(
            err,
            StepError::InvalidAction(ActionError::OutOfDomain { index: 1, value: 2 })
        );
        assert_eq!(env.snapshot().state(), &before);
        assert_eq!(env.current_tick(), TickId(1));
    }

    #[test]
    fn wrong_length_is_rejected() {
        let mut env = quiet(EnvConfig::grid_2x2());
        env.reset(None);
        assert_eq!(
            env.step(&[0, 1]),
            Err(StepError::InvalidAction(ActionError::WrongLength {
                expected: 4,
                got: 2
            }))
        );
        assert_eq!(
            env.step_phases(&[Phase::NorthSouth]),
            Err(StepError::InvalidAction(ActionError::WrongLength {
                expected: 4,
                got: 1
            }))
        );
    }

    #[test]
    fn constant_arrivals_then_clearance() {
        let mut env = TrafficEnv::with_arrivals(
            EnvConfig::single_intersection(),
            Box::new(ConstantArrivals::new(1.0)),
        )
        .unwrap();
        env.reset(None);
        let out = env.step(&[0]).unwrap();
        // NS lanes cleared (1 ≤ saturation 3), EW lanes keep their vehicle.
        assert_eq!(
            out.observation,
            vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0]
        );
        // -(2 queued) - 0.1·(2 waiting)
        assert!((out.reward - -2.2).abs() < 1e-9);
        let m = env.last_metrics();
        assert_eq!(m.arrivals, 4.0);
        assert_eq!(m.cleared, 2.0);
        assert_eq!(m.exited, 2.0);
    }

    #[test]
    fn snapshot_exposes_signal_state() {
        let mut env = quiet(EnvConfig::grid_2x2());
        env.reset(None);
        let snap = env.snapshot();
        assert_eq!(snap.phase(IntersectionId(0)), None);
        env.step_phases(&[Phase::EastWest; 4]).unwrap();
        let snap = env.snapshot();
        assert_eq!(snap.phase(IntersectionId(2)), Some(Phase::EastWest));
        assert_eq!(snap.green_timer(IntersectionId(2)), 1);
        assert_eq!(snap.tick_id(), TickId(1));
        assert_eq!(snap.queues(IntersectionId(3))[Direction::West.slot()], 0.0);
    }

    #[test]
    fn spaces_match_grid() {
        let env = quiet(EnvConfig::grid(2, 3));
        assert_eq!(env.action_space().dims(), 6);
        let space = env.observation_space();
        assert_eq!(space.len, 54);
        assert_eq!(space.high, 5000.0);
        let single = quiet(EnvConfig::single_intersection());
        assert_eq!(single.action_space(), ActionSpace::Discrete { n: 2 });
        assert_eq!(single.observation_space().len, 8);
    }
}
