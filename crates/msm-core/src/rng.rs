//! The single deterministic RNG shared by every sub-model of a run.
//!
//! # Determinism strategy
//!
//! One `SmallRng` is seeded from the run's master seed and lent (`&mut`) to
//! every sub-model in the fixed yearly order.  It is never re-seeded or
//! split: deriving per-model streams would correlate sampling across models
//! that see the same year.  Given the same seed and the same initial
//! population, the whole event sequence is bit-identical between runs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.
///
/// Used only from the single thread that applies events.  Parallel scoring
/// never draws random numbers.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` helpers
    /// (`rand::seq::index::sample`, distributions, …).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice; `None` if it is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// `amount` distinct indices from `0..length`, in sampling order.
    ///
    /// Returns all indices (shuffled) when `amount >= length`.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, length, amount.min(length)).into_vec()
    }
}
