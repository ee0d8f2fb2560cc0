//! Shrink candidate sets and the engine that drives shrinking to a minimum.

use std::time::{Duration, Instant};

use crate::config::ShrinkConfig;
use crate::error::DomainError;
use crate::generator::Generator;
use crate::tuple::TupleShrinks;
use crate::value::{GeneratedValue, Value};

/// Candidates returned by one call to [`Generator::shrink`].
///
/// The set is finite and produced lazily. It is also restartable: cloning a
/// partially consumed set yields an iterator over the remaining candidates,
/// and cloning a fresh set replays it from the start.
#[derive(Debug, Clone)]
pub struct Shrinks {
    inner: Candidates,
}

#[derive(Debug, Clone)]
enum Candidates {
    List(std::vec::IntoIter<GeneratedValue>),
    Tuple(TupleShrinks),
}

impl Shrinks {
    /// The empty candidate set
    pub fn none() -> Self {
        Self::from_vec(Vec::new())
    }

    /// A set holding a single candidate
    pub fn one(candidate: GeneratedValue) -> Self {
        Self::from_vec(vec![candidate])
    }

    /// A set holding already materialised candidates, in order
    pub fn from_vec(candidates: Vec<GeneratedValue>) -> Self {
        Self {
            inner: Candidates::List(candidates.into_iter()),
        }
    }

    pub(crate) fn tuple(shrinks: TupleShrinks) -> Self {
        Self {
            inner: Candidates::Tuple(shrinks),
        }
    }
}

impl Iterator for Shrinks {
    type Item = GeneratedValue;

    fn next(&mut self) -> Option<GeneratedValue> {
        match &mut self.inner {
            Candidates::List(list) => list.next(),
            Candidates::Tuple(tuple) => tuple.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Candidates::List(list) => list.size_hint(),
            Candidates::Tuple(tuple) => tuple.size_hint(),
        }
    }
}

impl FromIterator<GeneratedValue> for Shrinks {
    fn from_iter<I: IntoIterator<Item = GeneratedValue>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

/// Result of a shrinking run
#[derive(Debug, Clone)]
pub struct ShrinkResult {
    /// Original value that failed
    pub original: GeneratedValue,
    /// Minimal value that still fails
    pub minimal: GeneratedValue,
    /// Number of shrinking steps taken
    pub shrink_steps: usize,
    /// Time spent shrinking
    pub shrink_duration: Duration,
    /// Whether shrinking ran to a local minimum rather than out of budget
    pub completed: bool,
}

impl ShrinkResult {
    /// Create a shrink result for when no shrinking was performed
    pub fn no_shrinking(original: GeneratedValue) -> Self {
        Self {
            minimal: original.clone(),
            original,
            shrink_steps: 0,
            shrink_duration: Duration::from_secs(0),
            completed: true,
        }
    }
}

/// Reference driver: follows failing candidates until none remain.
///
/// A property returns `true` when it holds. Starting from a failing value the
/// engine walks the candidate set and moves to the first candidate that still
/// fails, then shrinks again from there.
#[derive(Debug, Clone, Default)]
pub struct ShrinkEngine {
    config: ShrinkConfig,
}

impl ShrinkEngine {
    /// Create a new shrinking engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new shrinking engine with custom configuration
    pub fn with_config(config: ShrinkConfig) -> Self {
        Self { config }
    }

    /// Shrink `failing` within the domain of `generator`
    pub fn shrink<G, F>(
        &self,
        generator: &G,
        failing: GeneratedValue,
        property: F,
    ) -> Result<ShrinkResult, DomainError>
    where
        G: Generator + ?Sized,
        F: Fn(&Value) -> bool,
    {
        let start_time = Instant::now();

        // Nothing to do unless the original actually fails
        if property(failing.value()) {
            return Ok(ShrinkResult::no_shrinking(failing));
        }

        // None when the timeout is too large to represent
        let deadline = start_time.checked_add(self.config.timeout);
        let mut current = failing.clone();
        let mut shrink_steps = 0;
        let mut completed = true;

        loop {
            if shrink_steps >= self.config.max_steps {
                tracing::warn!(
                    generator = generator.name(),
                    steps = shrink_steps,
                    "shrinking stopped at the step budget"
                );
                completed = false;
                break;
            }

            let mut smaller = None;
            let mut timed_out = false;
            for candidate in generator.shrink(&current)? {
                if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                    timed_out = true;
                    break;
                }
                if !property(candidate.value()) {
                    smaller = Some(candidate);
                    break;
                }
            }

            if timed_out {
                tracing::warn!(
                    generator = generator.name(),
                    steps = shrink_steps,
                    "shrinking timed out"
                );
                completed = false;
                break;
            }
            let Some(smaller) = smaller else {
                break;
            };

            current = smaller;
            shrink_steps += 1;
            if self.config.verbose {
                tracing::info!(step = shrink_steps, value = %current, "found smaller failing value");
            } else {
                tracing::debug!(step = shrink_steps, value = %current, "found smaller failing value");
            }
        }

        tracing::debug!(
            generator = generator.name(),
            steps = shrink_steps,
            completed,
            "shrinking finished"
        );

        Ok(ShrinkResult {
            original: failing,
            minimal: current,
            shrink_steps,
            shrink_duration: start_time.elapsed(),
            completed,
        })
    }
}
