//! Random source used by spawning and feedback phrases
//!
//! The simulation only ever needs two draws: an index into a small table and
//! a unit float for vertical placement. Keeping the seam this narrow lets
//! tests script exact kinds, heights and phrases.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of the random draws the simulation makes
pub trait RandomSource {
    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;
    /// Uniform float in `[0, 1)`
    fn unit(&mut self) -> f32;
}

/// Adapter for any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<Pcg32> {
    /// Seeded PCG stream, reproducible per run seed
    pub fn seeded(seed: u64) -> Self {
        Self(Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }

    fn unit(&mut self) -> f32 {
        self.0.random::<f32>()
    }
}

/// Replays fixed draws in order, cycling when exhausted
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    pub picks: Vec<usize>,
    pub units: Vec<f32>,
    pick_cursor: usize,
    unit_cursor: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new(picks: Vec<usize>, units: Vec<f32>) -> Self {
        Self {
            picks,
            units,
            pick_cursor: 0,
            unit_cursor: 0,
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn pick(&mut self, len: usize) -> usize {
        let value = if self.picks.is_empty() {
            0
        } else {
            self.picks[self.pick_cursor % self.picks.len()]
        };
        self.pick_cursor += 1;
        value % len
    }

    fn unit(&mut self) -> f32 {
        let value = if self.units.is_empty() {
            0.5
        } else {
            self.units[self.unit_cursor % self.units.len()]
        };
        self.unit_cursor += 1;
        value
    }
}
