//! Per-intersection signal state machine with minimum-green enforcement.
//!
//! The controller may override the requested phase. That override is
//! expressed as a pure function, [`SignalTiming::transition`], from
//! `(state, requested)` to `(effective, next_state, penalty)`;
//! [`SignalController`] only stores the resulting states.
//!
//! ```text
//!   Unset ──request p──▶ Active{p, 1}
//!   Active{x, t} ──request x──────────────▶ Active{x, t+1}
//!   Active{x, t} ──request y, t < min─────▶ Active{x, t+1}   (denied)
//!   Active{x, t} ──request y, t >= min────▶ Active{y, 1}     (granted, penalty)
//! ```

use junction_core::{IntersectionId, Phase};
use log::debug;
use smallvec::SmallVec;

/// Signal state of one intersection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalState {
    /// No phase has been enacted since the last reset.
    Unset,
    /// `phase` has been the effective phase for `green_timer` consecutive
    /// steps, counting the step it was set.
    Active {
        /// The last effective phase.
        phase: Phase,
        /// Consecutive steps `phase` has held.
        green_timer: u32,
    },
}

impl SignalState {
    /// The last effective phase, if any.
    pub fn phase(self) -> Option<Phase> {
        match self {
            SignalState::Unset => None,
            SignalState::Active { phase, .. } => Some(phase),
        }
    }

    /// Consecutive steps the current phase has held; 0 when unset.
    pub fn green_timer(self) -> u32 {
        match self {
            SignalState::Unset => 0,
            SignalState::Active { green_timer, .. } => green_timer,
        }
    }
}

/// How a request was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// First phase after reset; always accepted, never penalised.
    Initial,
    /// The request matched the current phase.
    Held,
    /// A change was requested before the minimum green time elapsed.
    Denied,
    /// A change was requested and enacted.
    Granted,
}

/// Result of one state-machine step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Phase actually enacted this step.
    pub effective: Phase,
    /// State after this step.
    pub next: SignalState,
    /// Reward deduction incurred (non-zero only when `Granted`).
    pub penalty: f64,
    /// How the request was handled.
    pub outcome: SwitchOutcome,
}

/// Timing constants shared by every intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignalTiming {
    /// Steps a phase must hold before a switch is granted.
    pub min_green_time: u32,
    /// Reward deduction per granted switch.
    pub switch_penalty: f64,
}

impl Default for SignalTiming {
    fn default() -> Self {
        Self {
            min_green_time: 3,
            switch_penalty: 2.0,
        }
    }
}

impl SignalTiming {
    /// Advance one intersection's signal given the requested phase.
    pub fn transition(&self, state: SignalState, requested: Phase) -> Transition {
        match state {
            SignalState::Unset => Transition {
                effective: requested,
                next: SignalState::Active {
                    phase: requested,
                    green_timer: 1,
                },
                penalty: 0.0,
                outcome: SwitchOutcome::Initial,
            },
            SignalState::Active { phase, green_timer } if phase == requested => Transition {
                effective: phase,
                next: SignalState::Active {
                    phase,
                    green_timer: green_timer.saturating_add(1),
                },
                penalty: 0.0,
                outcome: SwitchOutcome::Held,
            },
            SignalState::Active { phase, green_timer } if green_timer < self.min_green_time => {
                Transition {
                    effective: phase,
                    next: SignalState::Active {
                        phase,
                        green_timer: green_timer.saturating_add(1),
                    },
                    penalty: 0.0,
                    outcome: SwitchOutcome::Denied,
                }
            }
            SignalState::Active { .. } => Transition {
                effective: requested,
                next: SignalState::Active {
                    phase: requested,
                    green_timer: 1,
                },
                penalty: self.switch_penalty,
                outcome: SwitchOutcome::Granted,
            },
        }
    }
}

/// Effective phases for one step across all intersections.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Effective phase per intersection, in index order.
    pub effective: SmallVec<[Phase; 16]>,
    /// Sum of switch penalties incurred this step.
    pub penalty_total: f64,
    /// Number of granted switches.
    pub granted: u32,
    /// Number of denied switches.
    pub denied: u32,
}

/// One signal state machine per intersection.
#[derive(Clone, Debug)]
pub struct SignalController {
    timing: SignalTiming,
    states: Vec<SignalState>,
}

impl SignalController {
    /// All intersections start `Unset`.
    pub fn new(intersections: usize, timing: SignalTiming) -> Self {
        Self {
            timing,
            states: vec![SignalState::Unset; intersections],
        }
    }

    /// Timing constants in force.
    pub fn timing(&self) -> &SignalTiming {
        &self.timing
    }

    /// Return every intersection to `Unset`.
    pub fn reset(&mut self) {
        self.states.fill(SignalState::Unset);
    }

    /// Current state of one intersection.
    pub fn state(&self, id: IntersectionId) -> SignalState {
        self.states[id.index()]
    }

    /// Current state of every intersection.
    pub fn states(&self) -> &[SignalState] {
        &self.states
    }

    /// Apply one requested phase per intersection.
    ///
    /// `requested` must have one entry per intersection; callers validate
    /// the length before any state is touched.
    pub fn resolve(&mut self, requested: &[Phase]) -> Resolution {
        debug_assert_eq!(requested.len(), self.states.len());
        let mut resolution = Resolution {
            effective: SmallVec::with_capacity(requested.len()),
            penalty_total: 0.0,
            granted: 0,
            denied: 0,
        };

        for (i, (state, &req)) in self.states.iter_mut().zip(requested).enumerate() {
            let t = self.timing.transition(*state, req);
            match t.outcome {
                SwitchOutcome::Granted => {
                    resolution.granted += 1;
                    debug!("intersection {i}: switch to {} granted", t.effective);
                }
                SwitchOutcome::Denied => {
                    resolution.denied += 1;
                    debug!(
                        "intersection {i}: switch to {req} denied, {} held {} of {} steps",
                        t.effective,
                        state.green_timer(),
                        self.timing.min_green_time
                    );
                }
                SwitchOutcome::Initial | SwitchOutcome::Held => {}
            }
            *state = t.next;
            resolution.penalty_total += t.penalty;
            resolution.effective.push(t.effective);
        }

        resolution
    }
}
