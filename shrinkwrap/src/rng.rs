//! Randomness capability handed to generators on every call.
//!
//! Generators never own randomness. A driver creates one [`RandomSource`] per
//! test execution and lends it mutably to each `generate` call, which keeps
//! runs reproducible from a seed and keeps concurrent evaluations apart.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Source of pseudo-random integers
pub trait RandomSource {
    /// Draw the next unbounded 64-bit value
    fn next_u64(&mut self) -> u64;

    /// Draw a value uniformly from `[0, bound)`; returns 0 when `bound` is 0
    fn below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        // Rejection sampling keeps the draw unbiased
        let zone = u64::MAX - (u64::MAX % bound);
        loop {
            let value = self.next_u64();
            if value < zone {
                return value % bound;
            }
        }
    }

    /// Draw a value uniformly from the inclusive range `[min, max]`
    fn between(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        let span = (max as i128 - min as i128) as u128 + 1;
        if span > u64::MAX as u128 {
            return self.next_u64() as i64;
        }
        (min as i128 + self.below(span as u64) as i128) as i64
    }
}

/// Adapter exposing any `rand` RNG as a [`RandomSource`]
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    inner: R,
}

impl<R: RngCore> RngSource<R> {
    /// Wrap an RNG
    pub fn new(rng: R) -> Self {
        Self { inner: rng }
    }

    /// Get a mutable reference to the inner RNG
    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwrap the inner RNG
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        self.inner.gen_range(0..bound)
    }

    fn between(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.inner.gen_range(min..=max)
    }
}

/// Trait for building random sources for a test execution
pub trait RngProvider: Send + Sync {
    /// The RNG type backing the produced sources
    type Rng: RngCore + Clone + Send;

    /// Create a source, seeded when `seed` is given
    fn create_source(&self, seed: Option<u64>) -> RngSource<Self::Rng>;
}

/// Default provider backed by `StdRng`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRngProvider;

impl RngProvider for DefaultRngProvider {
    type Rng = StdRng;

    fn create_source(&self, seed: Option<u64>) -> RngSource<StdRng> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        RngSource::new(rng)
    }
}

/// Create a source seeded from entropy
pub fn create_source() -> RngSource<StdRng> {
    DefaultRngProvider.create_source(None)
}

/// Create a reproducible source from a seed
pub fn create_seeded_source(seed: u64) -> RngSource<StdRng> {
    DefaultRngProvider.create_source(Some(seed))
}

/// Test double replaying a canned sequence of draws.
///
/// Every draw consumes the next scripted number, cycling back to the start
/// when the script runs out. Bounded draws reduce the scripted number modulo
/// the bound, so a script of `[0, 1]` alternates between the lowest and the
/// second-lowest value of any range.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Vec<u64>,
    position: usize,
}

impl ScriptedSource {
    /// Create a source replaying `script`; an empty script always yields 0
    pub fn new(script: impl Into<Vec<u64>>) -> Self {
        Self {
            script: script.into(),
            position: 0,
        }
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl RandomSource for ScriptedSource {
    fn next_u64(&mut self) -> u64 {
        if self.script.is_empty() {
            self.position += 1;
            return 0;
        }
        let value = self.script[self.position % self.script.len()];
        self.position += 1;
        value
    }

    fn below(&mut self, bound: u64) -> u64 {
        let value = self.next_u64();
        if bound == 0 { 0 } else { value % bound }
    }

    fn between(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        let span = (max as i128 - min as i128) as u128 + 1;
        let offset = self.next_u64() as u128 % span;
        (min as i128 + offset as i128) as i64
    }
}
