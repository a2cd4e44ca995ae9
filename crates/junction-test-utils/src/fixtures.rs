//! Deterministic arrival sources.
//!
//! - [`ZeroArrivals`]: nothing ever arrives.
//! - [`ConstantArrivals`]: the same amount on every lane every step.
//! - [`ScriptedArrivals`]: replays a fixed list of per-step frames.

use junction_propagators::ArrivalSource;

/// Draws zero on every lane.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroArrivals;

impl ArrivalSource for ZeroArrivals {
    fn name(&self) -> &str {
        "zero"
    }

    fn reseed(&mut self, _seed: u64) {}

    fn draw(&mut self, out: &mut [f32]) {
        out.fill(0.0);
    }
}

/// Draws `per_lane` on every lane, every step.
#[derive(Clone, Copy, Debug)]
pub struct ConstantArrivals {
    pub per_lane: f32,
}

impl ConstantArrivals {
    pub fn new(per_lane: f32) -> Self {
        Self { per_lane }
    }
}

impl ArrivalSource for ConstantArrivals {
    fn name(&self) -> &str {
        "constant"
    }

    fn reseed(&mut self, _seed: u64) {}

    fn draw(&mut self, out: &mut [f32]) {
        out.fill(self.per_lane);
    }
}

/// Replays `frames` in order, one per draw, then draws zeros.
///
/// Each frame uses the flat lane layout; a frame shorter than the lane
/// count leaves the remaining lanes at zero. Reseeding rewinds to the
/// first frame.
#[derive(Clone, Debug, Default)]
pub struct ScriptedArrivals {
    frames: Vec<Vec<f32>>,
    cursor: usize,
}

impl ScriptedArrivals {
    pub fn new(frames: Vec<Vec<f32>>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// A script whose only arrivals are `amount` vehicles on `lane` in
    /// the first step.
    pub fn single(lanes: usize, lane: usize, amount: f32) -> Self {
        let mut frame = vec![0.0; lanes];
        frame[lane] = amount;
        Self::new(vec![frame])
    }
}

impl ArrivalSource for ScriptedArrivals {
    fn name(&self) -> &str {
        "scripted"
    }

    fn reseed(&mut self, _seed: u64) {
        self.cursor = 0;
    }

    fn draw(&mut self, out: &mut [f32]) {
        out.fill(0.0);
        if let Some(frame) = self.frames.get(self.cursor) {
            for (o, &a) in out.iter_mut().zip(frame) {
                *o = a;
            }
        }
        self.cursor += 1;
    }
}
