//! Benchmark profiles and utilities for the Junction environment.
//!
//! - [`reference_profile`]: the 2×2 reference grid
//! - [`stress_profile`]: a 32×32 grid (1024 intersections)
//! - [`cyclic_actions`]: a deterministic fixed-time controller

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use junction_core::Phase;
use junction_engine::EnvConfig;

/// The 2×2 reference grid with the given seed.
pub fn reference_profile(seed: u64) -> EnvConfig {
    EnvConfig {
        seed,
        ..EnvConfig::grid_2x2()
    }
}

/// A 32×32 grid with the reference constants.
pub fn stress_profile(seed: u64) -> EnvConfig {
    EnvConfig {
        seed,
        ..EnvConfig::grid(32, 32)
    }
}

/// Fixed-time control: every intersection holds each phase for `period`
/// steps, alternating, starting with north-south.
pub fn cyclic_actions(intersections: usize, tick: u64, period: u64) -> Vec<u32> {
    let phase = if (tick / period.max(1)) % 2 == 0 {
        Phase::NorthSouth
    } else {
        Phase::EastWest
    };
    vec![phase.action(); intersections]
}
