//! Deterministic per-side and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each arrival process gets its own `SmallRng` seeded by:
//!
//!   seed = global_seed XOR ((side_index + 1) * MIXING_CONSTANT)
//!
//! so the two sides never share RNG state and a given seed always produces
//! the same arrival gaps for each side, independent of thread interleaving.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{ArrivalProfile, Side};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── ArrivalRng ────────────────────────────────────────────────────────────────

/// Per-side deterministic RNG.  Owned by exactly one arrival thread.
pub struct ArrivalRng(SmallRng);

impl ArrivalRng {
    /// Seed deterministically from the run's global seed and a side.
    pub fn new(global_seed: u64, side: Side) -> Self {
        let seed = global_seed ^ (side.index() as u64 + 1).wrapping_mul(MIXING_CONSTANT);
        ArrivalRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw the next inter-arrival gap, in units, uniformly from
    /// `[base, base + spread)`.
    pub fn next_gap(&mut self, profile: &ArrivalProfile) -> f64 {
        if profile.spread_units <= 0.0 {
            return profile.base_units;
        }
        profile.base_units + self.0.gen_range(0.0..profile.spread_units)
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for set-up decisions such as randomized preloads.
///
/// Used only on the thread that builds the simulation.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
