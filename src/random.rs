//! Uniform random draws for cycle decisions.
//!
//! The gate core only ever needs values uniformly distributed in `[0, 1)`.
//! `UniformSource` is that seam: production code wraps a `rand` generator in
//! [`RngSource`], tests replay a fixed list of draws with [`SequenceSource`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform draws in `[0, 1)`.
pub trait UniformSource {
    /// Draws the next value, uniformly distributed in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
}

/// A `UniformSource` backed by any `rand` generator.
///
/// # Examples
///
/// ```
/// use bleedgate::{RngSource, UniformSource};
///
/// let mut a = RngSource::seed_from_u64(7);
/// let mut b = RngSource::seed_from_u64(7);
/// assert_eq!(a.next_uniform(), b.next_uniform());
/// ```
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng = StdRng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Creates a source seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Creates a reproducible source from a 64-bit seed.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for RngSource<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> UniformSource for RngSource<R> {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// Replays a fixed list of draws, cycling back to the start when exhausted.
///
/// An empty list always yields `0.0`.
///
/// # Examples
///
/// ```
/// use bleedgate::{SequenceSource, UniformSource};
///
/// let mut draws = SequenceSource::new([0.25, 0.75]);
/// assert_eq!(draws.next_uniform(), 0.25);
/// assert_eq!(draws.next_uniform(), 0.75);
/// assert_eq!(draws.next_uniform(), 0.25);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    draws: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// Creates a source replaying `draws` in order.
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: 0,
        }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for SequenceSource {
    fn next_uniform(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}
